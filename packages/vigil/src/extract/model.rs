//! Model-based field extraction with a strict-JSON contract.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::extract::rules::NO_DESCRIPTION;
use crate::taxonomy;
use crate::traits::AssistantModel;
use crate::types::{IdentitySnapshot, LocationSpec, PendingReport};

/// System instruction for structured extraction. The model must answer
/// with JSON only; anything else is treated as extraction ambiguity.
pub const EXTRACT_SYSTEM_PROMPT: &str = r#"Extract a structured incident report from the user's message.

Output strict JSON only, no prose, with exactly these keys:
{
    "title": "short incident label",
    "description": "what happened, in the user's words",
    "location": "place phrase, or 'my location' if the user means their current position, or empty string",
    "incidentTime": "time phrase as given (e.g. 'yesterday 21:00', 'now') or null",
    "anonymous": true or false,
    "category": "one of: Theft, Vandalism, Suspicious Activity, Assault, Robbery, Drug Activity, Trespassing, Traffic Violation, Other"
}

If the message does not describe a reportable incident, output {"title": null}."#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelDraft {
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    incident_time: Option<String>,
    #[serde(default)]
    anonymous: bool,
    #[serde(default)]
    category: Option<String>,
}

/// Extract a draft via the language model.
///
/// `Ok(None)` means the model answered but the output was unusable (parse
/// failure or missing title) — the same ambiguity outcome as a rule miss.
/// `Err` means the call itself failed and a fallback strategy may retry.
pub async fn extract(
    ai: &dyn AssistantModel,
    utterance: &str,
    identity: Option<IdentitySnapshot>,
) -> Result<Option<PendingReport>> {
    let value = ai.complete_json(EXTRACT_SYSTEM_PROMPT, utterance).await?;

    let draft: ModelDraft = match serde_json::from_value(value) {
        Ok(draft) => draft,
        Err(e) => {
            debug!(error = %e, "model output did not match the extraction contract");
            return Ok(None);
        }
    };

    let Some(title) = draft.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    else {
        return Ok(None);
    };

    // Exact case-insensitive taxonomy match or the catch-all; the model is
    // never allowed to invent a category string.
    let category = taxonomy::normalize(draft.category.as_deref().unwrap_or(&title));

    let description = draft
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let location = LocationSpec::from_phrase(draft.location.as_deref().unwrap_or(""));

    Ok(Some(
        PendingReport {
            title,
            category: Some(category),
            description,
            location,
            incident_time: draft
                .incident_time
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            anonymous: draft.anonymous,
            user_name: None,
            user_email: None,
        }
        .with_identity(identity),
    ))
}
