//! Direct validation flow: the raw position travels with the submission and the backend
//! makes the proximity decision. No local verdict is computed.

use unichamada_primitives::{AttendanceReceipt, AttendanceSubmission, Coordinate, EventId};

use crate::errors::CheckInError;
use crate::flow::unix_now;
use crate::traits::{AttendanceBackend, PositionProvider};

#[derive(Clone, Debug, Default)]
pub struct DirectValidation {
    position: Option<Coordinate>,
    event_id: Option<EventId>,
    matricula: String,
}

impl DirectValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn set_event(&mut self, event_id: Option<EventId>) {
        self.event_id = event_id;
    }

    pub fn set_matricula(&mut self, matricula: impl Into<String>) {
        self.matricula = matricula.into();
    }

    /// Captures a fresh position. On failure any earlier capture is kept.
    pub async fn capture<P: PositionProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<Coordinate, CheckInError> {
        let position = provider.request_position().await?;
        log::info!("Captured position {} for direct validation", position);
        self.position = Some(position);
        Ok(position)
    }

    pub fn prepare(&self, submitted_at: u64) -> Result<AttendanceSubmission, CheckInError> {
        let position = self.position.ok_or(CheckInError::PositionNotCaptured)?;
        let event_id = self.event_id.ok_or(CheckInError::MissingEventId)?;
        if self.matricula.trim().is_empty() {
            return Err(CheckInError::MissingMatricula);
        }

        Ok(AttendanceSubmission::new(event_id, &self.matricula, submitted_at)
            .with_position(position))
    }

    /// Submits and clears the form fields on success; the captured position stays.
    pub async fn submit<B: AttendanceBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<AttendanceReceipt, CheckInError> {
        let submission = self.prepare(unix_now())?;
        let receipt = backend.submit_attendance(&submission).await?;
        self.event_id = None;
        self.matricula.clear();
        Ok(receipt)
    }
}
