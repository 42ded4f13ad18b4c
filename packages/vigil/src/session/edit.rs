//! In-confirmation field edits (`location: Menlyn, time: yesterday 21:00`).

use std::sync::LazyLock;

use regex::Regex;

use crate::taxonomy;
use crate::types::{LocationSpec, PendingReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Title,
    Category,
    Description,
    Location,
    Time,
    Anonymous,
}

static EDIT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(title|category|crime|type|desc|description|details|loc|location|place|area|time|when|date|anon|anonymous)\s*[:\-]\s*(.+?)\s*$",
    )
    .unwrap()
});

/// Parse an utterance as a list of edit clauses. Clauses are separated by
/// commas or pipes; anything that is not `field: value` is dropped, so an
/// empty result means the utterance was not an edit at all.
pub fn parse(input: &str) -> Vec<(EditField, String)> {
    input
        .split(|c| c == ',' || c == '|' || c == '\n')
        .filter_map(|clause| {
            let caps = EDIT_CLAUSE.captures(clause)?;
            let field = match caps[1].to_lowercase().as_str() {
                "title" => EditField::Title,
                "category" | "crime" | "type" => EditField::Category,
                "desc" | "description" | "details" => EditField::Description,
                "loc" | "location" | "place" | "area" => EditField::Location,
                "time" | "when" | "date" => EditField::Time,
                "anon" | "anonymous" => EditField::Anonymous,
                _ => return None,
            };
            Some((field, caps[2].trim().to_string()))
        })
        .collect()
}

/// Apply edits to the pending draft. Title and category edits re-run the
/// taxonomy pass so the draft never carries a stale category.
pub fn apply(draft: &mut PendingReport, edits: Vec<(EditField, String)>) {
    for (field, value) in edits {
        match field {
            EditField::Title => {
                draft.category = taxonomy::infer_category(&value);
                draft.title = value;
            }
            EditField::Category => draft.category = Some(taxonomy::normalize(&value)),
            EditField::Description => draft.description = value,
            EditField::Location => draft.location = LocationSpec::from_phrase(&value),
            EditField::Time => draft.incident_time = Some(value),
            EditField::Anonymous => {
                draft.anonymous =
                    matches!(value.to_lowercase().as_str(), "yes" | "y" | "true" | "on" | "1");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Category;

    fn draft() -> PendingReport {
        PendingReport {
            title: "Theft".into(),
            category: Some(Category::Theft),
            description: "bike stolen".into(),
            location: LocationSpec::Phrase("Hatfield".into()),
            incident_time: None,
            anonymous: false,
            user_name: None,
            user_email: None,
        }
    }

    #[test]
    fn multiple_clauses_split_on_commas() {
        let edits = parse("location: Menlyn, time: yesterday 21:00");
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0], (EditField::Location, "Menlyn".into()));
        assert_eq!(edits[1], (EditField::Time, "yesterday 21:00".into()));
    }

    #[test]
    fn non_edit_text_parses_to_nothing() {
        assert!(parse("maybe later").is_empty());
        assert!(parse("yes please").is_empty());
    }

    #[test]
    fn title_edit_reruns_category_inference() {
        let mut d = draft();
        apply(&mut d, parse("title: graffiti on the wall"));
        assert_eq!(d.title, "graffiti on the wall");
        assert_eq!(d.category, Some(Category::Vandalism));
    }

    #[test]
    fn category_edit_normalizes_through_the_taxonomy() {
        let mut d = draft();
        apply(&mut d, parse("category: breaking and entering"));
        assert_eq!(d.category, Some(Category::Robbery));
    }

    #[test]
    fn location_edit_recognizes_the_gps_sentinel() {
        let mut d = draft();
        apply(&mut d, parse("location: my location"));
        assert_eq!(d.location, LocationSpec::CurrentLocation);
    }

    #[test]
    fn anonymous_edit_flips_the_flag() {
        let mut d = draft();
        apply(&mut d, parse("anonymous: yes"));
        assert!(d.anonymous);
        apply(&mut d, parse("anonymous: no"));
        assert!(!d.anonymous);
    }
}
