//! Data types shared across the intake pipeline.

pub mod config;
pub mod message;
pub mod report;

pub use config::{ExtractorStrategy, VigilConfig};
pub use message::{ChatMessage, Role};
pub use report::{IdentitySnapshot, LocationSpec, NewReport, PendingReport, Report};
