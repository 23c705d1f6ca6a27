//! Coordinate validation and spherical-earth distance.

use serde::{Deserialize, Serialize};

use super::foundation::{DomainError, ErrorCode};

/// Mean earth radius in meters, as used by the haversine distance.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A validated WGS-84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting out-of-range or non-finite components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::new(
                ErrorCode::BadCoordinates,
                format!("latitude must be within [-90, 90], got {}", lat),
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::new(
                ErrorCode::BadCoordinates,
                format!("longitude must be within [-180, 180], got {}", lng),
            ));
        }
        Ok(Self { lat, lng })
    }

    /// Great-circle distance to another point in meters.
    pub fn distance_meters(&self, other: &Coordinates) -> f64 {
        haversine_meters(self, other)
    }

    /// Whether another point lies within `radius_meters` of this one.
    pub fn within_radius(&self, other: &Coordinates, radius_meters: f64) -> bool {
        self.distance_meters(other) <= radius_meters
    }
}

/// Haversine distance between two points on a sphere of
/// [`EARTH_RADIUS_METERS`].
pub fn haversine_meters(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_coordinates() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let result = Coordinates::new(90.5, 0.0);
        assert!(matches!(result, Err(e) if e.code == ErrorCode::BadCoordinates));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let result = Coordinates::new(0.0, -180.1);
        assert!(matches!(result, Err(e) if e.code == ErrorCode::BadCoordinates));
    }

    #[test]
    fn rejects_non_finite_components() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Coordinates::new(30.2672, -97.7431).unwrap();
        assert_eq!(p.distance_meters(&p), 0.0);
    }

    #[test]
    fn distance_matches_known_short_hop() {
        // ~42 m apart in downtown Austin.
        let venue = Coordinates::new(30.2672, -97.7431).unwrap();
        let caller = Coordinates::new(30.2675, -97.7428).unwrap();

        let d = venue.distance_meters(&caller);
        assert!((40.0..45.0).contains(&d), "expected ~42m, got {}", d);
    }

    #[test]
    fn distance_matches_known_city_pair() {
        // Paris -> London is roughly 344 km.
        let paris = Coordinates::new(48.8566, 2.3522).unwrap();
        let london = Coordinates::new(51.5074, -0.1278).unwrap();

        let d = haversine_meters(&paris, &london);
        assert!((333_000.0..355_000.0).contains(&d), "got {}", d);
    }

    #[test]
    fn within_radius_is_inclusive_of_nearby_points() {
        let venue = Coordinates::new(30.2672, -97.7431).unwrap();
        let near = Coordinates::new(30.2675, -97.7428).unwrap();
        let far = Coordinates::new(30.2700, -97.7500).unwrap();

        assert!(venue.within_radius(&near, 100.0));
        assert!(!venue.within_radius(&far, 100.0));
    }
}
