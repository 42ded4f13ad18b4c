//! Deferred resolution of draft fields at commit time.

pub mod location;
pub mod time;

pub use location::{LocationResolver, ResolvedLocation};
