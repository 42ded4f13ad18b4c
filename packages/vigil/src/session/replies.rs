//! Canned reply text and summary rendering.

use chrono::Utc;

use crate::classify::EMERGENCY_CONTACTS;
use crate::resolve::time::format_relative;
use crate::taxonomy::Category;
use crate::traits::Place;
use crate::types::{PendingReport, Report};

/// System persona for open-ended safety chat. Keeps the model on topic.
pub const VIGIL_PERSONA: &str = r#"You are Vigil, the EyesOnZA safety assistant.
Only discuss safety, area crime summaries, or reporting incidents.
If a user asks unrelated questions, reply:
"I'm here only to help with safety and reports.""#;

pub const GREETING: &str =
    "Hi, I'm Vigil — your safety assistant. Ask about area safety or report incidents.";

pub const ABOUT: &str = "I'm Vigil, the EyesOnZA safety assistant. I can list recent reports, \
check how safe an area looks, find nearby help, and file incident reports for you.";

pub const DEFLECTION: &str = "I'm here only to help with safety information, incident reports, \
and local area analysis. Please ask about those topics.";

pub const CONNECTION_ERROR: &str = "There was a problem connecting to Vigil.";

pub const STORE_ERROR: &str = "Error fetching reports.";

pub const NO_REPORTS: &str = "No reports found in the database.";

pub const RESTATE: &str = "I couldn't make out the incident details. Could you tell me what \
happened, where, and when?";

pub const CANCELLED: &str = "No problem — I've discarded that report.";

pub const WRITE_FAILED: &str = "I couldn't save your report just now. Your draft is still here \
— say \"yes\" to try again, or \"no\" to cancel.";

pub const PROTOCOL_REMINDER: &str = "Reply \"yes\" to submit this report or \"no\" to discard \
it. You can also adjust fields, e.g. `location: Menlyn` or `time: yesterday 21:00`.";

/// The structured confirmation summary shown while a draft is pending.
pub fn confirmation_summary(draft: &PendingReport) -> String {
    let category = draft.category.unwrap_or(Category::Other);
    let time = draft.incident_time.as_deref().unwrap_or("now");
    let anonymous = if draft.anonymous { "yes" } else { "no" };
    format!(
        "Here's what I've got:\n\
         • Incident: {}\n\
         • Category: {}\n\
         • Location: {}\n\
         • Time: {}\n\
         • Anonymous: {}\n\
         • Details: {}\n\n\
         Submit this report? (yes / no)\n\
         You can also adjust fields first, e.g. `location: Menlyn, time: yesterday 21:00`.",
        draft.title,
        category,
        draft.location.display(),
        time,
        anonymous,
        draft.description,
    )
}

/// The static emergency contact card.
pub fn emergency_contacts() -> String {
    let mut out = String::from("Emergency contacts:\n");
    for (name, number) in EMERGENCY_CONTACTS {
        out.push_str(&format!("• {} — {}\n", name, number));
    }
    out.push_str("If you are in immediate danger, call now.");
    out
}

/// Bullet list of the newest reports. `reports` must already be sorted
/// newest-first and capped by the caller.
pub fn report_list(reports: &[&Report]) -> String {
    let now = Utc::now();
    let mut out = String::from("Recent reports:\n");
    for report in reports {
        out.push_str(&format!(
            "• {} — {} ({})\n",
            report.title,
            report.location,
            format_relative(report.created_at, now),
        ));
    }
    out.trim_end().to_string()
}

/// Safety summary for an area-scoped query. `matched` must already be
/// sorted newest-first.
pub fn safety_summary(area: &str, matched: &[&Report]) -> String {
    if matched.is_empty() {
        return format!(
            "No recent reports near {}. It might be quiet — stay alert just in case.",
            area
        );
    }

    let total = matched.len();
    let mut out = format!(
        "Safety summary for {}:\nFound {} report{}.\n",
        area,
        total,
        if total > 1 { "s" } else { "" }
    );
    for report in matched.iter().take(3) {
        out.push_str(&format!("• {} — {}\n", report.title, report.description));
    }
    out.push_str(match total {
        0..=2 => "\nOnly a few reports — relatively calm area.",
        3..=5 => "\nSeveral reports — use caution.",
        _ => "\nMultiple incidents — avoid if possible.",
    });
    out
}

/// Bullet list of nearby places, capped at three.
pub fn place_list(kind_label: &str, places: &[Place]) -> String {
    let mut out = format!("Closest {} options I could find:\n", kind_label);
    for place in places.iter().take(3) {
        match &place.address {
            Some(address) => out.push_str(&format!("• {} — {}\n", place.name, address)),
            None => out.push_str(&format!("• {}\n", place.name)),
        }
    }
    out.trim_end().to_string()
}

/// Fallback when place search yields nothing.
pub fn place_fallback(contact: (&str, &str)) -> String {
    format!(
        "I couldn't look that up right now. For urgent help call {} on {}.",
        contact.0, contact.1
    )
}

/// Commit acknowledgment, with coordinates when the location resolved.
pub fn commit_success(coordinates: Option<(f64, f64)>) -> String {
    match coordinates {
        Some((lat, lng)) => format!(
            "Report created successfully.\nCoordinates: {:.4}, {:.4}",
            lat, lng
        ),
        None => "Report created successfully.".to_string(),
    }
}
