//! Nominatim (OpenStreetMap) geocoder.
//!
//! Usage policy requires a descriptive User-Agent and modest request rates;
//! the session only geocodes at commit time and for explicit area queries,
//! which keeps us well under the limit.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::{Result, VigilError};
use crate::traits::{GeocodedPlace, Geocoder, Place};

const BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "Vigil/1.0 (EyesOnZA community safety)";

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseHit {
    display_name: String,
}

/// HTTP geocoder backed by the public Nominatim instance.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point at a different instance (self-hosted Nominatim, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| VigilError::Geocoding(Box::new(e)))?
            .json()
            .await
            .map_err(|e| VigilError::Geocoding(Box::new(e)))
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedPlace>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(address)
        );
        let hits: Vec<SearchHit> = self.get_json(&url).await?;

        let Some(hit) = hits.into_iter().next() else {
            debug!(address = %address, "no geocoding result");
            return Ok(None);
        };

        let latitude: f64 = hit
            .lat
            .parse()
            .map_err(|e| VigilError::Geocoding(Box::new(e)))?;
        let longitude: f64 = hit
            .lon
            .parse()
            .map_err(|e| VigilError::Geocoding(Box::new(e)))?;
        debug!(address = %address, latitude, longitude, "geocoded");

        Ok(Some(GeocodedPlace {
            latitude,
            longitude,
            display_name: hit.display_name,
        }))
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, latitude, longitude
        );
        match self.get_json::<ReverseHit>(&url).await {
            Ok(hit) => Ok(Some(hit.display_name)),
            Err(e) => {
                // Nominatim answers reverse misses with an error object, not
                // an empty list; treat any decode failure as "no label".
                warn!(error = %e, "reverse geocode miss");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn search_places(&self, query: &str) -> Result<Vec<Place>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=5",
            self.base_url,
            urlencoding::encode(query)
        );
        let hits: Vec<SearchHit> = self.get_json(&url).await?;

        Ok(hits
            .into_iter()
            .map(|hit| {
                // display_name is "Name, Suburb, City, ..."; split off the
                // leading segment as the place name.
                let (name, address) = match hit.display_name.split_once(", ") {
                    Some((name, rest)) => (name.to_string(), Some(rest.to_string())),
                    None => (hit.display_name, None),
                };
                Place { name, address }
            })
            .collect())
    }
}
