//! Haversine great-circle distance.

use crate::constants::EARTH_RADIUS_METERS;
use crate::types::Coordinate;

/// `deg * (π / 180)`, kept in this exact form so results match the web client bit for bit.
#[inline]
fn to_radians(degrees: f64) -> f64 {
    degrees * (core::f64::consts::PI / 180.0)
}

/// Distance in meters between `(user_lat, user_lon)` and `(target_lat, target_lon)`.
///
/// Total over finite input: identical points give `0.0`, antipodes give half the
/// circumference. Range checking is left to the caller.
pub fn haversine_distance(user_lat: f64, user_lon: f64, target_lat: f64, target_lon: f64) -> f64 {
    let d_lat = to_radians(target_lat - user_lat);
    let d_lon = to_radians(target_lon - user_lon);

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + to_radians(user_lat).cos()
            * to_radians(target_lat).cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[inline]
pub fn distance_between(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}
