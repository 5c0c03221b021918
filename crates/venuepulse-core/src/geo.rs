//! Great-circle distance between venue coordinates.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;
/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns a validation error if either component is not finite or lies
    /// outside [-90, 90] / [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, ValidationError> {
        check_range("latitude", lat, 90.0)?;
        check_range("longitude", lng, 180.0)?;
        Ok(Self { lat, lng })
    }
}

fn check_range(field: &str, value: f64, limit: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::invalid(field, "must be a finite number"));
    }
    if !(-limit..=limit).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(())
}

/// Central angle between two points, in radians (haversine).
fn central_angle(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // rounding can push h a hair above 1 for antipodal points
    2.0 * h.min(1.0).sqrt().asin()
}

/// Distance in miles between two points.
pub fn calculate_distance(a: Coordinates, b: Coordinates) -> f64 {
    EARTH_RADIUS_MILES * central_angle(a, b)
}

/// Distance in kilometres between two points.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    EARTH_RADIUS_KM * central_angle(a, b)
}

/// Short label for a venue card, e.g. "2.4 mi".
pub fn format_distance(miles: f64) -> String {
    if miles < 0.1 {
        "<0.1 mi".to_string()
    } else {
        format!("{miles:.1} mi")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn identical_points_are_zero_apart() {
        let p = at(47.6062, -122.3321);
        assert_eq!(calculate_distance(p, p), 0.0);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let seattle = at(47.6062, -122.3321);
        let portland = at(45.5152, -122.6784);
        assert_eq!(
            calculate_distance(seattle, portland),
            calculate_distance(portland, seattle)
        );
    }

    #[test]
    fn known_city_pair() {
        // Seattle to Portland is roughly 145 miles as the crow flies
        let d = calculate_distance(at(47.6062, -122.3321), at(45.5152, -122.6784));
        assert!((d - 145.0).abs() < 3.0, "got {d}");
    }

    #[test]
    fn km_and_miles_agree() {
        let a = at(40.7128, -74.0060);
        let b = at(34.0522, -118.2437);
        let ratio = distance_km(a, b) / calculate_distance(a, b);
        assert!((ratio - EARTH_RADIUS_KM / EARTH_RADIUS_MILES).abs() < 1e-12);
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = calculate_distance(at(0.0, 0.0), at(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_MILES).abs() < 1e-6);
    }

    #[test]
    fn coordinates_validate_ranges() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(matches!(
            Coordinates::new(f64::NAN, 0.0),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn distance_labels() {
        assert_eq!(format_distance(0.0), "<0.1 mi");
        assert_eq!(format_distance(0.05), "<0.1 mi");
        assert_eq!(format_distance(2.44), "2.4 mi");
        assert_eq!(format_distance(12.0), "12.0 mi");
    }
}
