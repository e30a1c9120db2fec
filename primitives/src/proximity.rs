//! Proximity policy: turns a distance and an allowed radius into a verdict.

use crate::constants::DEFAULT_RADIUS_METERS;
use crate::format::to_fixed;
use crate::geo::haversine_distance;
use crate::types::{Coordinate, LocationRecord, ValidationVerdict};

/// Validates `(user_lat, user_lon)` against `(target_lat, target_lon)`.
///
/// `radius_meters` of `None` falls back to [`DEFAULT_RADIUS_METERS`]. The boundary is
/// inclusive: a distance exactly equal to the radius is accepted.
pub fn validate_location(
    user_lat: f64,
    user_lon: f64,
    target_lat: f64,
    target_lon: f64,
    radius_meters: Option<f64>,
) -> ValidationVerdict {
    let radius = radius_meters.unwrap_or(DEFAULT_RADIUS_METERS);
    let distance = haversine_distance(user_lat, user_lon, target_lat, target_lon);
    verdict_for_distance(distance, radius)
}

/// Policy half of the validator, split out so callers holding a distance reuse it.
pub fn verdict_for_distance(distance: f64, radius: f64) -> ValidationVerdict {
    let is_valid = distance <= radius;

    let message = if is_valid {
        format!("Localização validada. Distância: {}m", to_fixed(distance, 2))
    } else {
        format!(
            "Fora do raio permitido. Distância: {}m (máximo: {}m)",
            to_fixed(distance, 2),
            radius
        )
    };

    ValidationVerdict {
        is_valid,
        distance,
        radius,
        message,
    }
}

/// Validates an observed position against a stored location using the location's own radius.
pub fn validate_against(observed: &Coordinate, location: &LocationRecord) -> ValidationVerdict {
    validate_location(
        observed.latitude,
        observed.longitude,
        location.latitude,
        location.longitude,
        Some(location.radius),
    )
}
