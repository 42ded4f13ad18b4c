//! Identity collaborator trait.

use crate::types::IdentitySnapshot;

/// Read-only view of the active login.
///
/// Snapshots are taken at extraction time and again at commit time; the
/// core never writes identity anywhere except onto the report payload.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<IdentitySnapshot>;
}
