//! Typed errors for the intake library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Collaborator failures are
//! always recoverable per turn; the dialogue session catches them and
//! answers the user instead of propagating.

use thiserror::Error;

/// Errors that can occur while processing a dialogue turn.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Language-model service unavailable or failed
    #[error("AI service error: {0}")]
    Ai(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Persistence operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Forward or reverse geocoding failed
    #[error("geocoding error: {0}")]
    Geocoding(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Device location unavailable (GPS off, hardware failure)
    #[error("device location error: {0}")]
    DeviceLocation(String),

    /// Device location did not answer within the configured bound
    #[error("device location timed out")]
    DeviceLocationTimeout,

    /// Location permission was not granted
    #[error("location permission denied")]
    PermissionDenied,

    /// Model returned output that is not the strict JSON we asked for.
    ///
    /// Treated identically to extraction ambiguity by the session.
    #[error("malformed model output: {0}")]
    MalformedModelOutput(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for intake operations.
pub type Result<T> = std::result::Result<T, VigilError>;
