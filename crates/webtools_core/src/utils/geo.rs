//! Great-circle distance between two coordinates.

use serde::{Deserialize, Serialize};

/// Equatorial Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, degrees.
    pub lat: f64,
    /// Longitude, degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine distance between `a` and `b`, in kilometers, rounded to four
/// decimal places.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let rad_lat1 = a.lat.to_radians();
    let rad_lat2 = b.lat.to_radians();
    let d_lat = rad_lat1 - rad_lat2;
    let d_lng = a.lng.to_radians() - b.lng.to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + rad_lat1.cos() * rad_lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let s = 2.0 * h.sqrt().asin() * EARTH_RADIUS_KM;

    (s * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = GeoPoint::new(39.9042, 116.4074);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn quarter_meridian() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0));
        let expected = (EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2 * 10_000.0).round() / 10_000.0;
        assert_eq!(d, expected);
    }

    #[test]
    fn beijing_to_shanghai() {
        let d = distance_km(
            GeoPoint::new(39.9042, 116.4074),
            GeoPoint::new(31.2304, 121.4737),
        );
        assert!((1066.0..1070.0).contains(&d), "got {d}");
    }

    #[test]
    fn symmetric_and_rounded() {
        let a = GeoPoint::new(22.5431, 114.0579);
        let b = GeoPoint::new(23.1291, 113.2644);
        assert_eq!(distance_km(a, b), distance_km(b, a));
        let d = distance_km(a, b);
        assert_eq!((d * 10_000.0).round() / 10_000.0, d);
    }
}
