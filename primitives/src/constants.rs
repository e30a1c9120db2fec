//! Geodesic and check-in policy constants.

// Distance Engine
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// Coordinate bounds (decimal degrees)
pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

// Proximity policy
/// Applies only when the caller supplies no radius; a stored location radius always wins.
pub const DEFAULT_RADIUS_METERS: f64 = 50.0;
pub const MIN_LOCATION_RADIUS_METERS: f64 = 10.0;

/// Degrees per meter along a meridian.
#[inline]
pub fn meters_to_latitude_degrees(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_METERS).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_latitude_degrees() {
        let one_degree = EARTH_RADIUS_METERS * core::f64::consts::PI / 180.0;
        assert!((meters_to_latitude_degrees(one_degree) - 1.0).abs() < 1e-12);
        assert_eq!(meters_to_latitude_degrees(0.0), 0.0);
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_constants_valid() {
        assert!(MIN_LOCATION_RADIUS_METERS <= DEFAULT_RADIUS_METERS);
        assert!(LATITUDE_MIN < LATITUDE_MAX);
        assert!(LONGITUDE_MIN < LONGITUDE_MAX);
    }
}
