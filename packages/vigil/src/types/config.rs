//! Configuration for the intake pipeline.

use std::time::Duration;

/// How the field extractor turns an utterance into a draft.
///
/// The assistant shipped as several near-duplicate variants over time
/// (rule-based only, then model-assisted); this switch consolidates them
/// into one code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorStrategy {
    /// Deterministic regex/keyword rules, no model call.
    Rules,
    /// Model-based extraction with a strict-JSON contract.
    Model,
    /// Model first, falling back to rules when the model call fails or
    /// returns unusable JSON.
    #[default]
    Hybrid,
}

/// Tunables for a [`Vigil`](crate::session::Vigil) instance.
#[derive(Debug, Clone)]
pub struct VigilConfig {
    /// Extraction strategy for incident-bearing utterances.
    pub strategy: ExtractorStrategy,

    /// Country qualifier appended to forward-geocode queries.
    pub country: String,

    /// How many reports an unscoped "list reports" answer shows.
    pub max_listed_reports: usize,

    /// Radius for the area safety summary, in kilometers.
    pub nearby_radius_km: f64,

    /// Bound on the device-position call. A timeout is fatal for the turn
    /// and is not retried.
    pub location_timeout: Duration,
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            strategy: ExtractorStrategy::default(),
            country: "South Africa".to_string(),
            max_listed_reports: 5,
            nearby_radius_km: 5.0,
            location_timeout: Duration::from_secs(8),
        }
    }
}
