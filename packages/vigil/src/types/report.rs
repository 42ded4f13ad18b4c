//! Report types: the in-progress draft and the persisted record.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;

/// Identity captured from the active login at extraction time.
///
/// Re-read at commit time when the draft carries none; replaced outright by
/// anonymized values when the draft is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySnapshot {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Where an incident happened, as the user gave it.
///
/// `CurrentLocation` is the typed form of the "my location" sentinel; an
/// empty `Phrase` is treated the same way by the location resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSpec {
    /// Use the device position at commit time.
    CurrentLocation,
    /// A free-text place phrase, forward-geocoded at commit time.
    Phrase(String),
}

impl LocationSpec {
    /// Build a spec from extracted text, recognizing the sentinel phrases.
    pub fn from_phrase(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        if lower.is_empty()
            || lower.contains("my location")
            || lower.contains("current location")
            || lower.contains("near me")
            || lower.contains("use gps")
            || lower.contains("where i am")
        {
            Self::CurrentLocation
        } else {
            Self::Phrase(text.trim().to_string())
        }
    }

    /// The phrase to show the user in a confirmation summary.
    pub fn display(&self) -> &str {
        match self {
            Self::CurrentLocation => "your current location",
            Self::Phrase(p) => p,
        }
    }
}

/// The incident under construction, held in session memory until the user
/// confirms or cancels.
///
/// `incident_time` stays a raw phrase until commit so a malformed time never
/// blocks the dialogue; the time resolver pins it down when the write is
/// issued. At most one draft exists per session, carried inside the
/// `AwaitingConfirmation` state.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReport {
    pub title: String,
    pub category: Option<Category>,
    pub description: String,
    pub location: LocationSpec,
    /// Raw time phrase ("yesterday 21:00", "now", ISO string) or `None`,
    /// meaning "resolve to now at commit time".
    pub incident_time: Option<String>,
    pub anonymous: bool,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl PendingReport {
    /// Apply the identity snapshot captured at extraction time.
    pub fn with_identity(mut self, identity: Option<IdentitySnapshot>) -> Self {
        if let Some(id) = identity {
            self.user_name = id.name;
            self.user_email = id.email;
        }
        self
    }
}

/// The payload handed to the report store when a draft is committed.
///
/// Location is resolved to a human label plus optional coordinates; null
/// coordinates mean "location unknown" and must not be rendered as a map
/// pin. Identity fields are null when the report is anonymous (except the
/// "Anonymous" display name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub incident_time: DateTime<FixedOffset>,
}

/// A persisted report, as read back from the store.
///
/// Created only by a successful commit and never mutated by this crate;
/// `created_at` is assigned by the store at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub incident_time: DateTime<FixedOffset>,
    pub created_at: DateTime<Utc>,
}
