//! JSON fixture stand-in for the attendance REST API.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;
use unichamada_checkin::{AttendanceBackend, BackendError};
use unichamada_primitives::{
    validate_against, AttendanceReceipt, AttendanceSubmission, EventId, EventRecord, LocationId,
    LocationRecord, LocationRecordError,
};

pub type SubmissionsHandle = Arc<RwLock<Vec<AttendanceSubmission>>>;

#[derive(Debug, Default, Deserialize)]
pub struct Fixtures {
    #[serde(rename = "eventos", default)]
    pub events: Vec<EventRecord>,
    #[serde(rename = "localizacoes", default)]
    pub locations: Vec<LocationRecord>,
}

#[derive(Debug)]
pub enum FixtureError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidLocation(LocationId, LocationRecordError),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::Io(e) => write!(f, "Failed to read fixtures: {}", e),
            FixtureError::Parse(e) => write!(f, "Failed to parse fixtures: {}", e),
            FixtureError::InvalidLocation(id, e) => write!(f, "Location {}: {}", id, e),
        }
    }
}

impl std::error::Error for FixtureError {}

pub struct FixtureBackend {
    events: HashMap<EventId, EventRecord>,
    locations: HashMap<LocationId, LocationRecord>,
    submissions: SubmissionsHandle,
}

impl FixtureBackend {
    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(FixtureError::Io)?;
        let backend = Self::from_json(&raw)?;
        log::info!(
            "Loaded {} events and {} locations from {}",
            backend.events.len(),
            backend.locations.len(),
            path.display()
        );
        Ok(backend)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let fixtures: Fixtures = serde_json::from_str(raw).map_err(FixtureError::Parse)?;
        Self::from_fixtures(fixtures)
    }

    /// Locations go through the administrator creation rules on load.
    pub fn from_fixtures(fixtures: Fixtures) -> Result<Self, FixtureError> {
        let mut locations = HashMap::with_capacity(fixtures.locations.len());
        for location in fixtures.locations {
            let id = location.id;
            let checked = LocationRecord::new(
                id,
                location.description.clone(),
                location.coordinate(),
                location.radius,
            )
            .map_err(|e| FixtureError::InvalidLocation(id, e))?;
            locations.insert(id, checked);
        }

        let events = fixtures
            .events
            .into_iter()
            .map(|event| (event.id, event))
            .collect();

        Ok(Self {
            events,
            locations,
            submissions: Arc::new(RwLock::new(Vec::new())),
        })
    }

    pub fn submissions_handle(&self) -> SubmissionsHandle {
        self.submissions.clone()
    }

    /// Server-side proximity check for submissions that carry raw coordinates.
    fn check_reported_position(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<(), BackendError> {
        let Some(position) = submission.position() else {
            return Ok(());
        };
        let Some(location_id) = self
            .events
            .get(&submission.event_id)
            .and_then(|event| event.location_id)
        else {
            return Ok(());
        };
        let location = self
            .locations
            .get(&location_id)
            .ok_or(BackendError::LocationNotFound(location_id))?;

        let verdict = validate_against(&position, location);
        if verdict.is_valid {
            Ok(())
        } else {
            Err(BackendError::Rejected(verdict.message))
        }
    }
}

#[async_trait::async_trait]
impl AttendanceBackend for FixtureBackend {
    async fn fetch_event(&self, id: EventId) -> Result<EventRecord, BackendError> {
        self.events
            .get(&id)
            .cloned()
            .ok_or(BackendError::EventNotFound(id))
    }

    async fn fetch_location(&self, id: LocationId) -> Result<LocationRecord, BackendError> {
        self.locations
            .get(&id)
            .cloned()
            .ok_or(BackendError::LocationNotFound(id))
    }

    async fn submit_attendance(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceReceipt, BackendError> {
        if !self.events.contains_key(&submission.event_id) {
            return Err(BackendError::EventNotFound(submission.event_id));
        }
        self.check_reported_position(submission)?;

        let mut guard = self.submissions.write().await;
        let duplicate = guard
            .iter()
            .any(|s| s.event_id == submission.event_id && s.matricula == submission.matricula);
        if duplicate {
            return Err(BackendError::Rejected(
                "Presença já registrada para este evento".into(),
            ));
        }

        guard.push(submission.clone());
        Ok(AttendanceReceipt {
            id: guard.len() as u64,
            event_id: submission.event_id,
            matricula: submission.matricula.clone(),
        })
    }
}
