//! Rule-based intent classification for user utterances.
//!
//! Pure pattern matching, no collaborator calls. Rules run in priority
//! order and the first match wins — the order is a design decision, not
//! incidental (e.g. "show reports" must hit the list rule before the
//! incident-keyword scan sees "reports"). Unmatched input always falls
//! through to [`Intent::SafetyChat`]; classification never fails.

use std::sync::LazyLock;

use regex::Regex;

/// Static registry of South African emergency contacts.
pub const EMERGENCY_CONTACTS: &[(&str, &str)] = &[
    ("Police", "10111"),
    ("Ambulance", "10177"),
    ("Fire Brigade", "10177"),
    ("Gender-Based Violence Helpline", "0800 150 150"),
    ("Childline", "0800 055 555"),
    ("Crime Stop", "08600 10111"),
];

/// The kind of place a nearby-place query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Hospital,
    Clinic,
    PoliceStation,
}

impl PlaceKind {
    /// Search term handed to the place-search collaborator.
    pub fn query_term(&self) -> &'static str {
        match self {
            PlaceKind::Hospital => "hospital",
            PlaceKind::Clinic => "clinic",
            PlaceKind::PoliceStation => "police station",
        }
    }

    /// Emergency contact to suggest when place search comes up empty.
    pub fn fallback_contact(&self) -> (&'static str, &'static str) {
        match self {
            PlaceKind::Hospital | PlaceKind::Clinic => ("Ambulance", "10177"),
            PlaceKind::PoliceStation => ("Police", "10111"),
        }
    }
}

/// What the user is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    AboutBot,
    NearbyPlace(PlaceKind),
    EmergencyContacts,
    ListReports { area: Option<String> },
    MathOrTrivia,
    IncidentReport,
    SafetyChat,
}

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:hi|hiya|hello|hey|howzit|good\s+(?:morning|afternoon|evening))\b[\s,!.]*(?:vigil|there)?[\s!.?]*$")
        .unwrap()
});

static ABOUT_BOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:who|what)\s+are\s+you\b|\bwhat\s+(?:can|do)\s+you\s+do\b|\byour\s+name\b|\btell\s+me\s+about\s+yourself\b")
        .unwrap()
});

static NEARBY_PLACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:nearest|closest|nearby|find|where)\b[\s\S]*\b(hospital|clinic|police)\b")
        .unwrap()
});

static EMERGENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bemergency\s+(?:numbers?|contacts?|services?)\b|\bemergency\s+help\b|\b(?:hotline|helpline)\b|\bwho\s+(?:do|should|can)\s+i\s+(?:call|phone|contact)\b|\b(?:call|phone|contact)\b.*\b(?:police|ambulance|fire\s+brigade)\b|\b(?:police|ambulance|fire\s+brigade)\s+number\b")
        .unwrap()
});

static LIST_REPORTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:list|show|view|display|see|any)\b[\s\S]*\b(?:reports?|incidents?)\b|\brecent\s+reports?\b")
        .unwrap()
});

static LIST_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:reports?|incidents?)\b\s+(?:in|around|near|for)\s+([^?.!]+)").unwrap()
});

static MATH_OR_TRIVIA: LazyLock<Regex> = LazyLock::new(|| {
    // Bare arithmetic only when the whole utterance is a sum, so ISO dates
    // inside incident text don't deflect
    Regex::new(r"(?i)^\s*\d+\s*[-+*/x×]\s*\d+\s*[?.!]*\s*$|\b(?:what(?:'s|\s+is)|calculate|solve)\s+\d+\s*[-+*/x×]|\bsquare\s+root\b|\bcapital\s+of\b|\btell\s+me\s+a\s+joke\b|\bwho\s+is\s+the\s+(?:president|prime\s+minister)\b")
        .unwrap()
});

static INCIDENT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:theft|thief|steal\w*|stole|stolen|assault\w*|attack\w*|vandal\w*|trespass\w*|drug\w*|traffic|accident|hijack\w*|break[\s-]?in|broke\s+into|burgl\w*|suspicious|robbery|robbed|mugg\w*|stab\w*|report|incident|crime)\b")
        .unwrap()
});

/// Classify one utterance. Pure; the only state it consults is the static
/// pattern set.
pub fn classify(utterance: &str) -> Intent {
    let text = utterance.trim();

    if GREETING.is_match(text) {
        return Intent::Greeting;
    }
    if ABOUT_BOT.is_match(text) {
        return Intent::AboutBot;
    }
    if let Some(caps) = NEARBY_PLACE.captures(text) {
        let kind = match caps[1].to_lowercase().as_str() {
            "hospital" => PlaceKind::Hospital,
            "clinic" => PlaceKind::Clinic,
            _ => PlaceKind::PoliceStation,
        };
        return Intent::NearbyPlace(kind);
    }
    if EMERGENCY.is_match(text) {
        return Intent::EmergencyContacts;
    }
    if LIST_REPORTS.is_match(text) {
        let area = LIST_AREA
            .captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|a| !a.is_empty());
        return Intent::ListReports { area };
    }
    if MATH_OR_TRIVIA.is_match(text) {
        return Intent::MathOrTrivia;
    }
    if INCIDENT_KEYWORDS.is_match(text) {
        return Intent::IncidentReport;
    }
    Intent::SafetyChat
}
