//! Collaborator trait abstractions.
//!
//! The intake core owns no I/O of its own; everything external (storage,
//! geocoding, device location, language model, identity, speech) is
//! consumed through these narrow traits so the dialogue logic can be
//! exercised against mocks.

pub mod ai;
pub mod device;
pub mod geo;
pub mod identity;
pub mod speech;
pub mod store;

pub use ai::AssistantModel;
pub use device::{DeviceLocator, Permission, Position};
pub use geo::{GeocodedPlace, Geocoder, Place};
pub use identity::IdentityProvider;
pub use speech::SpeechPlayer;
pub use store::ReportStore;
