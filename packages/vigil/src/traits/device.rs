//! Device location collaborator trait.

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// A device GPS fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// The device location service.
///
/// `current_position` has no timeout of its own; the location resolver
/// bounds the call and treats a timeout as fatal for the turn.
#[async_trait]
pub trait DeviceLocator: Send + Sync {
    async fn request_permission(&self) -> Result<Permission>;

    async fn current_position(&self) -> Result<Position>;
}
