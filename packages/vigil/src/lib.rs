//! Vigil: conversational incident-report intake for the EyesOnZA community
//! safety app.
//!
//! The crate owns the dialogue core: intent classification, field
//! extraction, the confirm/cancel/edit state machine, and commit-time
//! resolution of location and time. Everything external (language model,
//! report store, geocoding, device location, identity, speech) sits behind
//! a trait, so the whole conversation can run against mocks.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vigil::ai::OpenAi;
//! use vigil::geo::NominatimGeocoder;
//! use vigil::session::{DialogueSession, Vigil};
//! use vigil::stores::MemoryStore;
//!
//! let vigil = Vigil::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(OpenAi::from_env()?),
//!     Arc::new(NominatimGeocoder::new()),
//!     Arc::new(device),   // platform DeviceLocator
//!     Arc::new(identity), // platform IdentityProvider
//! );
//!
//! let mut session = DialogueSession::new();
//! let reply = vigil.handle_turn(&mut session, "someone broke into my car near Menlyn").await;
//! ```

pub mod ai;
pub mod classify;
pub mod error;
pub mod extract;
pub mod geo;
pub mod resolve;
pub mod session;
pub mod stores;
pub mod taxonomy;
pub mod testing;
pub mod traits;
pub mod types;

pub use classify::{classify, Intent, PlaceKind};
pub use error::{Result, VigilError};
pub use session::{DialogueSession, SessionState, Vigil};
pub use taxonomy::Category;
pub use types::{
    ChatMessage, ExtractorStrategy, IdentitySnapshot, LocationSpec, NewReport, PendingReport,
    Report, Role, VigilConfig,
};
