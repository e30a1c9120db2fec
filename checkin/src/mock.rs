//! Deterministic collaborator fakes for exercising the check-in flow.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Mutex;
use unichamada_primitives::{
    AttendanceReceipt, AttendanceSubmission, Coordinate, EventId, EventRecord, LocationId,
    LocationRecord,
};

use crate::errors::{BackendError, PositionError};
use crate::traits::{AttendanceBackend, PositionProvider};

/// Replays scripted results in order, then repeats the fallback.
pub struct ScriptedPositionProvider {
    script: Mutex<VecDeque<Result<Coordinate, PositionError>>>,
    fallback: Option<Result<Coordinate, PositionError>>,
    calls: AtomicUsize,
}

impl ScriptedPositionProvider {
    pub fn new(script: Vec<Result<Coordinate, PositionError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always(position: Coordinate) -> Self {
        Self::new(Vec::new()).with_fallback(Ok(position))
    }

    pub fn denied(reason: &str) -> Self {
        let denial = PositionError::PermissionDenied(reason.to_string());
        Self::new(Vec::new()).with_fallback(Err(denial))
    }

    pub fn with_fallback(mut self, fallback: Result<Coordinate, PositionError>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PositionProvider for ScriptedPositionProvider {
    async fn request_position(&self) -> Result<Coordinate, PositionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.script.lock().await.pop_front() {
            return next;
        }
        self.fallback
            .clone()
            .unwrap_or_else(|| Err(PositionError::Unavailable("Script exhausted".into())))
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    events: HashMap<EventId, EventRecord>,
    locations: Mutex<HashMap<LocationId, LocationRecord>>,
    submissions: Mutex<Vec<AttendanceSubmission>>,
    rejection: Option<String>,
    submit_calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: EventRecord) -> Self {
        self.events.insert(event.id, event);
        self
    }

    pub fn with_location(mut self, location: LocationRecord) -> Self {
        self.locations.get_mut().insert(location.id, location);
        self
    }

    /// Every submission is refused with `message`.
    pub fn rejecting(mut self, message: &str) -> Self {
        self.rejection = Some(message.to_string());
        self
    }

    /// Simulates an administrator editing the record while a check-in is open.
    pub async fn replace_location(&self, location: LocationRecord) {
        self.locations.lock().await.insert(location.id, location);
    }

    pub async fn submissions(&self) -> Vec<AttendanceSubmission> {
        self.submissions.lock().await.clone()
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AttendanceBackend for InMemoryBackend {
    async fn fetch_event(&self, id: EventId) -> Result<EventRecord, BackendError> {
        self.events
            .get(&id)
            .cloned()
            .ok_or(BackendError::EventNotFound(id))
    }

    async fn fetch_location(&self, id: LocationId) -> Result<LocationRecord, BackendError> {
        self.locations
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(BackendError::LocationNotFound(id))
    }

    async fn submit_attendance(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceReceipt, BackendError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.rejection {
            return Err(BackendError::Rejected(message.clone()));
        }

        let mut guard = self.submissions.lock().await;
        guard.push(submission.clone());
        Ok(AttendanceReceipt {
            id: guard.len() as u64,
            event_id: submission.event_id,
            matricula: submission.matricula.clone(),
        })
    }
}
