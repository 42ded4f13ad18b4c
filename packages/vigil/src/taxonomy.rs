//! The fixed incident taxonomy and category inference.
//!
//! Every persisted report carries exactly one taxonomy member or the
//! catch-all `Other` — never an arbitrary string. The keyword inference
//! table is the single shared function used by both extraction strategies
//! and by edit-time re-inference.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A recognized incident category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Theft,
    Vandalism,
    #[serde(rename = "Suspicious Activity")]
    SuspiciousActivity,
    Assault,
    Robbery,
    #[serde(rename = "Drug Activity")]
    DrugActivity,
    Trespassing,
    #[serde(rename = "Traffic Violation")]
    TrafficViolation,
    /// Catch-all for anything outside the official list.
    Other,
}

impl Category {
    /// The official categories, excluding the catch-all.
    pub const OFFICIAL: [Category; 8] = [
        Category::Theft,
        Category::Vandalism,
        Category::SuspiciousActivity,
        Category::Assault,
        Category::Robbery,
        Category::DrugActivity,
        Category::Trespassing,
        Category::TrafficViolation,
    ];

    /// Human label, matching the report-form picker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Theft => "Theft",
            Category::Vandalism => "Vandalism",
            Category::SuspiciousActivity => "Suspicious Activity",
            Category::Assault => "Assault",
            Category::Robbery => "Robbery",
            Category::DrugActivity => "Drug Activity",
            Category::Trespassing => "Trespassing",
            Category::TrafficViolation => "Traffic Violation",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a free-text category candidate onto the taxonomy.
///
/// Case-insensitive exact match against the official labels, folding a few
/// near-synonyms onto canonical members. Anything unmatched normalizes to
/// [`Category::Other`] — the same sentinel is used mid-dialogue and at
/// commit time. Idempotent.
pub fn normalize(candidate: &str) -> Category {
    let folded = candidate.trim().to_lowercase();
    match folded.as_str() {
        "theft" | "attempted theft" | "vehicle theft" => Category::Theft,
        "vandalism" => Category::Vandalism,
        "suspicious activity" => Category::SuspiciousActivity,
        "assault" => Category::Assault,
        "robbery" | "breaking and entering" | "burglary" => Category::Robbery,
        "drug activity" => Category::DrugActivity,
        "trespassing" => Category::Trespassing,
        "traffic violation" => Category::TrafficViolation,
        _ => Category::Other,
    }
}

/// One keyword class in the inference table.
struct InferenceRule {
    pattern: &'static str,
    category: Category,
}

/// Ordered keyword classes, first match wins. The last class is a weak
/// fallback: generic crime talk lands in Suspicious Activity rather than
/// inventing a specific incident type.
const INFERENCE_TABLE: &[InferenceRule] = &[
    InferenceRule {
        pattern: r"trespass",
        category: Category::Trespassing,
    },
    InferenceRule {
        pattern: r"attempt\w*\s+(?:\w+\s+)?(?:theft|steal|rob)",
        category: Category::Theft,
    },
    InferenceRule {
        pattern: r"\b(?:robbery|robbed|robbing|hold[\s-]?up|mugg\w*|break[\s-]?in|broke\s+into|breaking\s+and\s+entering|burgl\w*)",
        category: Category::Robbery,
    },
    InferenceRule {
        pattern: r"\b(?:theft|thief|thieves|steal\w*|stole|stolen|shoplift\w*|pickpocket\w*|hijack\w*)",
        category: Category::Theft,
    },
    InferenceRule {
        pattern: r"\b(?:assault\w*|attack\w*|fight\w*|stab\w*|shot|shoot\w*|gun|knife|weapon|beat\s+up|beaten)",
        category: Category::Assault,
    },
    InferenceRule {
        pattern: r"\b(?:vandal\w*|graffiti|smash\w*|damag\w*|broken\s+window)",
        category: Category::Vandalism,
    },
    InferenceRule {
        pattern: r"\b(?:drug\w*|dealing|dealer\w*|narcotic\w*)",
        category: Category::DrugActivity,
    },
    InferenceRule {
        pattern: r"\b(?:traffic|driving|drunk\s+driv\w*|speeding|reckless|accident|collision|crash\w*)",
        category: Category::TrafficViolation,
    },
    InferenceRule {
        pattern: r"\b(?:suspicious|loiter\w*|stalk\w*|prowl\w*|lurk\w*)",
        category: Category::SuspiciousActivity,
    },
    InferenceRule {
        pattern: r"\b(?:crime|criminal|police|report|incident|emergency|danger\w*|unsafe)",
        category: Category::SuspiciousActivity,
    },
];

static INFERENCE_REGEXES: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    INFERENCE_TABLE
        .iter()
        .map(|rule| {
            (
                Regex::new(&format!("(?i){}", rule.pattern)).unwrap(),
                rule.category,
            )
        })
        .collect()
});

/// Infer a category from free text via the shared keyword table.
///
/// Returns `None` when nothing in the text looks incident-shaped; the
/// caller decides whether that means "ask the user to restate".
pub fn infer_category(text: &str) -> Option<Category> {
    INFERENCE_REGEXES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_matches_official_labels_case_insensitively() {
        assert_eq!(normalize("theft"), Category::Theft);
        assert_eq!(normalize("Suspicious Activity"), Category::SuspiciousActivity);
        assert_eq!(normalize("TRAFFIC VIOLATION"), Category::TrafficViolation);
    }

    #[test]
    fn normalize_folds_synonyms() {
        assert_eq!(normalize("Attempted Theft"), Category::Theft);
        assert_eq!(normalize("Vehicle Theft"), Category::Theft);
        assert_eq!(normalize("Breaking and Entering"), Category::Robbery);
        assert_eq!(normalize("Burglary"), Category::Robbery);
    }

    #[test]
    fn normalize_unmatched_is_other() {
        assert_eq!(normalize("UFO sighting"), Category::Other);
        assert_eq!(normalize(""), Category::Other);
    }

    #[test]
    fn normalize_is_idempotent() {
        for category in Category::OFFICIAL.iter().chain([Category::Other].iter()) {
            let once = normalize(category.as_str());
            assert_eq!(normalize(once.as_str()), once);
        }
        // Catch-all fixpoint for arbitrary input too
        let other = normalize("something odd");
        assert_eq!(normalize(other.as_str()), other);
    }

    #[test]
    fn inference_first_match_wins() {
        // "trespassing" outranks the weak crime fallback
        assert_eq!(
            infer_category("someone is trespassing on the property"),
            Some(Category::Trespassing)
        );
        // break-in folds to Robbery before plain theft terms
        assert_eq!(
            infer_category("they broke into my car and stole the radio"),
            Some(Category::Robbery)
        );
        assert_eq!(
            infer_category("my phone was stolen"),
            Some(Category::Theft)
        );
    }

    #[test]
    fn inference_weak_fallback_and_none() {
        assert_eq!(
            infer_category("there is a crime problem here"),
            Some(Category::SuspiciousActivity)
        );
        assert_eq!(infer_category("the weather is lovely"), None);
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&Category::DrugActivity).unwrap();
        assert_eq!(json, "\"Drug Activity\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::DrugActivity);
    }
}
