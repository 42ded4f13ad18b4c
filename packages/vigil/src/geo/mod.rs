//! Geographic helpers and the HTTP geocoder.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(distance_km(-25.75, 28.23, -25.75, 28.23) < 1e-9);
    }

    #[test]
    fn pretoria_to_johannesburg_is_about_55km() {
        // Church Square to Johannesburg CBD
        let d = distance_km(-25.7461, 28.1881, -26.2041, 28.0473);
        assert!((50.0..60.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = distance_km(-25.78, 28.27, -25.75, 28.23);
        let b = distance_km(-25.75, 28.23, -25.78, 28.27);
        assert!((a - b).abs() < 1e-9);
    }
}
