//! Core domain types for UNICHAMADA check-ins.
//!
//! Records that cross the backend boundary keep the REST API's field names on the wire.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_RADIUS_METERS, LATITUDE_MAX, LATITUDE_MIN, LONGITUDE_MAX, LONGITUDE_MIN,
    MIN_LOCATION_RADIUS_METERS,
};
use crate::errors::{CoordinateError, LocationRecordError};
use crate::format::to_fixed;
use crate::geo::distance_between;

// =============================================================================
// Identity Types
// =============================================================================

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LocationId(pub u64);

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Coordinates
// =============================================================================

/// Latitude/longitude in decimal degrees.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Unchecked; the Distance Engine accepts anything finite.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    pub fn is_within_bounds(&self) -> bool {
        Self::checked(self.latitude, self.longitude).is_ok()
    }

    /// Great-circle distance in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_between(self, other)
    }
}

impl core::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "({}, {})",
            to_fixed(self.latitude, 5),
            to_fixed(self.longitude, 5)
        )
    }
}

// =============================================================================
// Backend Records
// =============================================================================

/// Registered place a check-in must happen near.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    #[serde(rename = "descricao")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Allowed radius in meters.
    #[serde(rename = "raio")]
    pub radius: f64,
}

impl LocationRecord {
    /// Builds a record under the administrator creation rules. Records read back from the
    /// backend are deserialized directly and are not re-validated.
    pub fn new(
        id: LocationId,
        description: impl Into<String>,
        coordinate: Coordinate,
        radius: f64,
    ) -> Result<Self, LocationRecordError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(LocationRecordError::EmptyDescription);
        }

        match Coordinate::checked(coordinate.latitude, coordinate.longitude) {
            Ok(_) => {}
            Err(CoordinateError::LongitudeOutOfRange(lon)) => {
                return Err(LocationRecordError::LongitudeOutOfRange(lon))
            }
            Err(CoordinateError::LatitudeOutOfRange(lat)) => {
                return Err(LocationRecordError::LatitudeOutOfRange(lat))
            }
            Err(CoordinateError::NotFinite) => return Err(LocationRecordError::CoordinateNotFinite),
        }

        if !radius.is_finite() {
            return Err(LocationRecordError::RadiusNotFinite);
        }
        if radius < MIN_LOCATION_RADIUS_METERS {
            return Err(LocationRecordError::RadiusBelowMinimum(radius));
        }

        Ok(Self {
            id,
            description,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            radius,
        })
    }

    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Administrator form input before an id is assigned.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationDraft {
    #[serde(rename = "descricao")]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "raio")]
    pub radius: f64,
}

impl Default for LocationDraft {
    fn default() -> Self {
        Self {
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            radius: DEFAULT_RADIUS_METERS,
        }
    }
}

impl LocationDraft {
    pub fn into_record(self, id: LocationId) -> Result<LocationRecord, LocationRecordError> {
        LocationRecord::new(
            id,
            self.description,
            Coordinate::new(self.latitude, self.longitude),
            self.radius,
        )
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "localId", default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
}

impl EventRecord {
    pub const fn requires_location(&self) -> bool {
        self.location_id.is_some()
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Outcome of comparing one observed position against one target and radius.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub distance: f64,
    pub radius: f64,
    pub message: String,
}

impl ValidationVerdict {
    /// Short badge line shown next to the check-in form.
    pub fn summary(&self) -> String {
        if self.is_valid {
            format!(
                "✓ Você está no local do evento ({}m de distância)",
                to_fixed(self.distance, 0)
            )
        } else {
            format!(
                "✗ Você está fora do local do evento ({}m de distância, limite: {}m)",
                to_fixed(self.distance, 0),
                self.radius
            )
        }
    }
}

// =============================================================================
// Attendance Submission
// =============================================================================

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    #[serde(rename = "eventoId")]
    pub event_id: EventId,
    pub matricula: String,
    /// Unix seconds.
    #[serde(rename = "dataPresenca")]
    pub submitted_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl AttendanceSubmission {
    pub fn new(event_id: EventId, matricula: &str, submitted_at: u64) -> Self {
        Self {
            event_id,
            matricula: matricula.trim().to_string(),
            submitted_at,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.latitude = Some(position.latitude);
        self.longitude = Some(position.longitude);
        self
    }

    pub fn position(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.latitude?, self.longitude?))
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct AttendanceReceipt {
    pub id: u64,
    #[serde(rename = "eventoId")]
    pub event_id: EventId,
    pub matricula: String,
}

impl AttendanceReceipt {
    pub const SUCCESS_MESSAGE: &'static str = "Presença registrada com sucesso!";
}
