//! Geocoding collaborator trait.

use async_trait::async_trait;

use crate::error::Result;

/// A forward-geocoded location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// One hit from a place search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub address: Option<String>,
}

/// Forward/reverse geocoding and place search.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode an address phrase. `Ok(None)` means "not found", which the
    /// location resolver degrades rather than treating as an error.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>>;

    /// Turn coordinates back into a human label.
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;

    /// Free-text place search ("hospital near -25.77,28.19").
    async fn search_places(&self, query: &str) -> Result<Vec<Place>>;
}
