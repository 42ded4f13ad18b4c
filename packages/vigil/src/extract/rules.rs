//! Rule-based field extraction.
//!
//! Deterministic regex/keyword heuristics. This is best-effort by design:
//! only the documented pattern classes are specified and tested; anything
//! else falls through to the model strategy or the restate prompt.

use std::sync::LazyLock;

use regex::Regex;

use crate::taxonomy;
use crate::types::{IdentitySnapshot, LocationSpec, PendingReport};

/// Placeholder used when no description survives extraction.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Default title when labeled fields exist but nothing names the incident.
pub const UNTITLED: &str = "Untitled Report";

static LEAD_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:please\s+)?(?:i(?:'d|\s+would)?\s+(?:like|want|need)\s+to\s+)?(?:create|make|submit|file|record|log)\s+(?:a\s+|an\s+)?(?:new\s+)?(?:crime\s+)?(?:report|incident)\s*[:\-]?\s*")
        .unwrap()
});

static LABELED_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:title|crime|type|incident)\s*[:\-]\s*([^,|.;\n]+)").unwrap()
});

static REPORT_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\breport\s+(?:a\s+|an\s+|the\s+)?([^,|.;\n]+)").unwrap()
});

static LABELED_DESC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:desc|description|details)\s*[:\-]\s*([^|;\n]+)").unwrap()
});

static AFTER_BECAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:because|after)\s+(.+)$").unwrap());

static LABELED_LOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:loc|location|place|area)\s*[:\-]\s*([^,|.;\n]+)").unwrap()
});

static PREP_LOC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:at|in|near|outside|around|by|close\s+to)\s+(.+)$").unwrap()
});

static GPS_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:my\s+location|current\s+location|use\s+gps|near\s+me|where\s+i\s+am)\b")
        .unwrap()
});

static LABELED_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:time|when|date)\s*[:\-]\s*([^,|.;\n]+)").unwrap()
});

static BARE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yesterday(?:\s+\d{1,2}:\d{2})?|last\s+night|today|right\s+now|now|\d+\s*(?:seconds?|secs?|minutes?|mins?|hours?|hrs?)\s*ago)\b")
        .unwrap()
});

static ANON_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\banon(?:ymous)?\s*[:\-]?\s*(?:true|yes|y|on|1)\b").unwrap()
});

/// Where a captured title stops being a title.
static TITLE_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s\b(?:at|in|on|near|outside|around|by|close\s+to|yesterday|last\s+night|today|now|because|after|and|while|when|that)\b")
        .unwrap()
});

/// Where a captured location phrase stops being a location.
static LOC_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s\b(?:yesterday|last\s+night|today|now|right\s+now|because|after|and|while|when)\b|[,.;|!?]")
        .unwrap()
});

/// Where any labeled capture stops (the next labeled field).
static LABEL_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:title|crime|type|desc|description|details|loc|location|place|area|time|when|date|anon(?:ymous)?)\s*[:\-]")
        .unwrap()
});

/// Extract a draft from an utterance, or `None` when nothing in it looks
/// like an incident (no labeled field and no category keyword).
pub fn extract(utterance: &str, identity: Option<IdentitySnapshot>) -> Option<PendingReport> {
    let stripped = LEAD_VERBS.replace(utterance.trim(), "").into_owned();
    if stripped.is_empty() {
        return None;
    }

    let labeled_title = LABELED_TITLE
        .captures(&stripped)
        .map(|c| clean(&truncate(&c[1], &LABEL_STOP)).to_string())
        .filter(|t| !t.is_empty());
    let labeled_desc = LABELED_DESC
        .captures(&stripped)
        .map(|c| clean(&truncate(&c[1], &LABEL_STOP)).to_string())
        .filter(|d| !d.is_empty());
    let labeled_loc = LABELED_LOC
        .captures(&stripped)
        .map(|c| clean(&truncate(&c[1], &LABEL_STOP)).to_string());
    let labeled_time = LABELED_TIME
        .captures(&stripped)
        .map(|c| clean(&truncate(&c[1], &LABEL_STOP)).to_string())
        .filter(|t| !t.is_empty());
    let anonymous = ANON_FLAG.is_match(&stripped);
    let any_labeled = labeled_title.is_some()
        || labeled_desc.is_some()
        || labeled_loc.is_some()
        || labeled_time.is_some()
        || anonymous;

    let inferred = taxonomy::infer_category(&stripped);

    let title = labeled_title
        .clone()
        .or_else(|| {
            REPORT_PHRASE
                .captures(utterance)
                .map(|c| clean(&truncate(&c[1], &TITLE_STOP)).to_string())
                .filter(|t| !t.is_empty())
        })
        .or_else(|| inferred.map(|c| c.as_str().to_string()));
    let title = match title {
        Some(t) => t,
        None if any_labeled => UNTITLED.to_string(),
        None => return None,
    };

    let description = labeled_desc
        .or_else(|| {
            AFTER_BECAUSE
                .captures(&stripped)
                .map(|c| clean(&c[1]).to_string())
        })
        .or_else(|| {
            let rest = remainder(&stripped);
            (!rest.is_empty()).then_some(rest)
        })
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    // Sentinel check before the preposition scan so "near me" does not
    // capture "me" as a place phrase.
    let location = match labeled_loc {
        Some(phrase) => LocationSpec::from_phrase(&phrase),
        None if GPS_INTENT.is_match(&stripped) => LocationSpec::CurrentLocation,
        None => PREP_LOC
            .captures(&stripped)
            .map(|c| clean(&truncate(&c[1], &LOC_STOP)).to_string())
            .filter(|p| !p.is_empty())
            .map(LocationSpec::Phrase)
            .unwrap_or_else(|| LocationSpec::Phrase(String::new())),
    };

    let incident_time = labeled_time.or_else(|| {
        BARE_TIME
            .captures(&stripped)
            .map(|c| clean(&c[1]).to_string())
    });

    let category = inferred.or_else(|| taxonomy::infer_category(&title));

    Some(
        PendingReport {
            title,
            category,
            description,
            location,
            incident_time,
            anonymous,
            user_name: None,
            user_email: None,
        }
        .with_identity(identity),
    )
}

/// Cut `text` at the first stop match.
fn truncate(text: &str, stop: &Regex) -> String {
    match stop.find(text) {
        Some(m) => text[..m.start()].to_string(),
        None => text.to_string(),
    }
}

/// The stripped utterance minus every recognized field phrase; used as the
/// fallback description.
fn remainder(stripped: &str) -> String {
    let mut rest = stripped.to_string();
    for re in [
        &*LABELED_TITLE,
        &*LABELED_DESC,
        &*LABELED_LOC,
        &*LABELED_TIME,
        &*ANON_FLAG,
    ] {
        rest = re.replace_all(&rest, "").into_owned();
    }
    clean(&rest).to_string()
}

fn clean(text: &str) -> &str {
    text.trim()
        .trim_matches(|c: char| c == ',' || c == '.' || c == '!' || c == '?' || c == '|')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Category;

    #[test]
    fn labeled_form_extracts_every_field() {
        let draft = extract(
            "create a report title: Theft desc: bike stolen from the rack loc: Hatfield time: yesterday 18:00, anon: yes",
            None,
        )
        .unwrap();
        assert_eq!(draft.title, "Theft");
        assert_eq!(draft.category, Some(Category::Theft));
        assert_eq!(draft.description, "bike stolen from the rack");
        assert_eq!(draft.location, LocationSpec::Phrase("Hatfield".into()));
        assert_eq!(draft.incident_time.as_deref(), Some("yesterday 18:00"));
        assert!(draft.anonymous);
    }

    #[test]
    fn natural_sentence_extracts_location_and_time() {
        let draft = extract("someone broke into my car near Menlyn yesterday", None).unwrap();
        assert_eq!(draft.category, Some(Category::Robbery));
        assert_eq!(draft.location, LocationSpec::Phrase("Menlyn".into()));
        assert_eq!(draft.incident_time.as_deref(), Some("yesterday"));
        assert!(draft.description.contains("broke into my car"));
    }

    #[test]
    fn report_phrase_becomes_the_title() {
        let draft = extract("I want to report a mugging at the taxi rank", None).unwrap();
        assert_eq!(draft.title, "mugging");
        assert_eq!(draft.category, Some(Category::Robbery));
        assert_eq!(draft.location, LocationSpec::Phrase("the taxi rank".into()));
    }

    #[test]
    fn gps_phrases_set_the_sentinel() {
        let draft = extract("report theft near me, use GPS", None).unwrap();
        assert_eq!(draft.location, LocationSpec::CurrentLocation);
    }

    #[test]
    fn missing_description_gets_the_placeholder() {
        let draft = extract("title: Vandalism loc: my location", None).unwrap();
        assert_eq!(draft.description, NO_DESCRIPTION);
        assert_eq!(draft.location, LocationSpec::CurrentLocation);
    }

    #[test]
    fn labeled_fields_without_a_title_default_to_untitled() {
        let draft = extract("desc: something happened loc: town square xyz", None).unwrap();
        assert_eq!(draft.title, UNTITLED);
    }

    #[test]
    fn unrecognizable_input_yields_none() {
        assert!(extract("asdf", None).is_none());
        assert!(extract("the weather is lovely", None).is_none());
    }

    #[test]
    fn identity_snapshot_lands_on_the_draft() {
        let identity = IdentitySnapshot {
            name: Some("Thandi M".into()),
            email: Some("thandi@example.com".into()),
        };
        let draft = extract("report a theft at the mall", Some(identity)).unwrap();
        assert_eq!(draft.user_name.as_deref(), Some("Thandi M"));
        assert_eq!(draft.user_email.as_deref(), Some("thandi@example.com"));
    }

    #[test]
    fn missing_time_stays_unset_for_commit_time_resolution() {
        let draft = extract("report vandalism at the park", None).unwrap();
        assert_eq!(draft.incident_time, None);
    }
}
