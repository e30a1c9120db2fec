//! Core primitives for UNICHAMADA geolocated check-ins.
//!
//! Holds the Haversine distance engine, the proximity policy that turns a distance into an
//! accept/reject verdict, and the records exchanged with the attendance backend.

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod format;
pub mod geo;
pub mod proximity;
pub mod types;

pub use constants::*;
pub use errors::{CoordinateError, LocationRecordError};
pub use format::to_fixed;
pub use geo::{distance_between, haversine_distance};
pub use proximity::{validate_against, validate_location, verdict_for_distance};
pub use types::*;
