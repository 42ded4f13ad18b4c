//! Field extraction: raw utterance to structured draft.
//!
//! One consolidated component with a configuration switch instead of the
//! near-duplicate rule-based/model-assisted variants that shipped over
//! time. Both strategies share the taxonomy inference table.

pub mod model;
pub mod rules;

use tracing::{debug, warn};

use crate::traits::AssistantModel;
use crate::types::{ExtractorStrategy, IdentitySnapshot, PendingReport};

/// Extract a draft using the configured strategy.
///
/// Never fails outward: a model-call failure in `Model` mode degrades to
/// `None` (the session asks the user to restate), and in `Hybrid` mode
/// falls back to the rule-based pass.
pub async fn extract(
    strategy: ExtractorStrategy,
    ai: &dyn AssistantModel,
    utterance: &str,
    identity: Option<IdentitySnapshot>,
) -> Option<PendingReport> {
    match strategy {
        ExtractorStrategy::Rules => rules::extract(utterance, identity),
        ExtractorStrategy::Model => match model::extract(ai, utterance, identity).await {
            Ok(draft) => draft,
            Err(e) => {
                warn!(error = %e, "model extraction failed");
                None
            }
        },
        ExtractorStrategy::Hybrid => {
            match model::extract(ai, utterance, identity.clone()).await {
                Ok(Some(draft)) => Some(draft),
                Ok(None) => {
                    debug!("model extraction ambiguous, falling back to rules");
                    rules::extract(utterance, identity)
                }
                Err(e) => {
                    warn!(error = %e, "model extraction failed, falling back to rules");
                    rules::extract(utterance, identity)
                }
            }
        }
    }
}
