//! Location resolution with a defined fallback order.
//!
//! All underlying I/O failures are caught and degrade to the
//! "no coordinates" branch; resolution never propagates a hard error to
//! the dialogue session.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::error::{Result, VigilError};
use crate::traits::{DeviceLocator, Geocoder, Permission, Position};
use crate::types::LocationSpec;

/// The outcome of resolving a location spec.
///
/// Always carries a label; null coordinates mean "location unknown" and
/// must not be presented as a map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub label: String,
}

impl ResolvedLocation {
    fn unknown(label: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            label: label.into(),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Resolves a location phrase (or the current-location sentinel) into
/// coordinates plus a human label.
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    device: Arc<dyn DeviceLocator>,
    country: String,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        device: Arc<dyn DeviceLocator>,
        country: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            geocoder,
            device,
            country: country.into(),
            timeout,
        }
    }

    /// Resolve a spec. Infallible by design: every failure path yields a
    /// labeled "unknown" placeholder instead of an error.
    #[instrument(skip(self))]
    pub async fn resolve(&self, spec: &LocationSpec) -> ResolvedLocation {
        match spec {
            LocationSpec::CurrentLocation => self.resolve_device(None).await,
            LocationSpec::Phrase(phrase) if phrase.trim().is_empty() => {
                self.resolve_device(None).await
            }
            LocationSpec::Phrase(phrase) => self.resolve_phrase(phrase).await,
        }
    }

    /// Forward-geocode a phrase with the country qualifier, falling back to
    /// the device path (which keeps the original phrase as label).
    async fn resolve_phrase(&self, phrase: &str) -> ResolvedLocation {
        let query = format!("{}, {}", phrase.trim(), self.country);
        match self.geocoder.geocode(&query).await {
            Ok(Some(place)) => {
                debug!(query = %query, label = %place.display_name, "forward geocode hit");
                ResolvedLocation {
                    latitude: Some(place.latitude),
                    longitude: Some(place.longitude),
                    label: place.display_name,
                }
            }
            Ok(None) => {
                debug!(query = %query, "forward geocode found nothing, trying device location");
                self.resolve_device(Some(phrase)).await
            }
            Err(e) => {
                warn!(error = %e, query = %query, "forward geocode failed, trying device location");
                self.resolve_device(Some(phrase)).await
            }
        }
    }

    /// Device-position path. `fallback_label` preserves the user's phrase
    /// when we got here because geocoding it failed.
    async fn resolve_device(&self, fallback_label: Option<&str>) -> ResolvedLocation {
        match self.device.request_permission().await {
            Ok(Permission::Granted) => {}
            Ok(Permission::Denied) => {
                return ResolvedLocation::unknown(match fallback_label {
                    Some(phrase) => phrase.to_string(),
                    None => "Unspecified (permission denied)".to_string(),
                });
            }
            Err(e) => {
                warn!(error = %e, "permission request failed");
                return ResolvedLocation::unknown(
                    fallback_label.unwrap_or("Unknown Location").to_string(),
                );
            }
        }

        match self.position_with_timeout().await {
            Ok(position) => {
                let label = match self
                    .geocoder
                    .reverse_geocode(position.latitude, position.longitude)
                    .await
                {
                    Ok(Some(label)) => label,
                    Ok(None) => "Current Location".to_string(),
                    Err(e) => {
                        warn!(error = %e, "reverse geocode failed");
                        "Current Location".to_string()
                    }
                };
                ResolvedLocation {
                    latitude: Some(position.latitude),
                    longitude: Some(position.longitude),
                    label,
                }
            }
            Err(e) => {
                warn!(error = %e, "device position unavailable");
                ResolvedLocation::unknown(
                    fallback_label.unwrap_or("Unknown Location").to_string(),
                )
            }
        }
    }

    /// Bound the GPS fix; a timeout is fatal for this turn, not retried.
    async fn position_with_timeout(&self) -> Result<Position> {
        tokio::time::timeout(self.timeout, self.device.current_position())
            .await
            .map_err(|_| VigilError::DeviceLocationTimeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDeviceLocator, MockGeocoder};

    fn resolver(geocoder: MockGeocoder, device: MockDeviceLocator) -> LocationResolver {
        LocationResolver::new(
            Arc::new(geocoder),
            Arc::new(device),
            "South Africa",
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn phrase_resolves_via_forward_geocoding_with_country() {
        let geocoder =
            MockGeocoder::new().with_place("Menlyn, South Africa", -25.7826, 28.2760, "Menlyn, Pretoria");
        let r = resolver(geocoder, MockDeviceLocator::granted_at(0.0, 0.0));
        let resolved = r.resolve(&LocationSpec::Phrase("Menlyn".into())).await;
        assert_eq!(resolved.coordinates(), Some((-25.7826, 28.2760)));
        assert_eq!(resolved.label, "Menlyn, Pretoria");
    }

    #[tokio::test]
    async fn sentinel_uses_device_and_reverse_geocode() {
        let geocoder = MockGeocoder::new().with_reverse_label("Hatfield, Pretoria");
        let r = resolver(geocoder, MockDeviceLocator::granted_at(-25.75, 28.23));
        let resolved = r.resolve(&LocationSpec::CurrentLocation).await;
        assert_eq!(resolved.coordinates(), Some((-25.75, 28.23)));
        assert_eq!(resolved.label, "Hatfield, Pretoria");
    }

    #[tokio::test]
    async fn sentinel_without_reverse_label_is_current_location() {
        let r = resolver(MockGeocoder::new(), MockDeviceLocator::granted_at(-25.75, 28.23));
        let resolved = r.resolve(&LocationSpec::CurrentLocation).await;
        assert_eq!(resolved.label, "Current Location");
    }

    #[tokio::test]
    async fn permission_denied_yields_labeled_unknown() {
        let r = resolver(MockGeocoder::new(), MockDeviceLocator::denied());
        let resolved = r.resolve(&LocationSpec::CurrentLocation).await;
        assert_eq!(resolved.coordinates(), None);
        assert_eq!(resolved.label, "Unspecified (permission denied)");
    }

    #[tokio::test]
    async fn failed_geocode_then_failed_device_keeps_the_phrase() {
        // Geocoder knows nothing; device denies permission
        let r = resolver(MockGeocoder::new(), MockDeviceLocator::denied());
        let resolved = r.resolve(&LocationSpec::Phrase("Shoprite".into())).await;
        assert_eq!(resolved.coordinates(), None);
        assert_eq!(resolved.label, "Shoprite");
    }

    #[tokio::test]
    async fn slow_gps_fix_times_out_without_coordinates() {
        let device = MockDeviceLocator::granted_at(-25.75, 28.23)
            .with_delay(Duration::from_millis(500));
        let r = resolver(MockGeocoder::new(), device);
        let resolved = r.resolve(&LocationSpec::CurrentLocation).await;
        assert_eq!(resolved.coordinates(), None);
        assert_eq!(resolved.label, "Unknown Location");
    }

    #[tokio::test]
    async fn empty_phrase_behaves_like_the_sentinel() {
        let geocoder = MockGeocoder::new().with_reverse_label("Arcadia");
        let r = resolver(geocoder, MockDeviceLocator::granted_at(-25.74, 28.21));
        let resolved = r.resolve(&LocationSpec::Phrase("  ".into())).await;
        assert_eq!(resolved.label, "Arcadia");
    }
}
