//! Async check-in orchestrator driving a [`CheckInSession`] with real collaborators.

use std::time::{SystemTime, UNIX_EPOCH};

use unichamada_primitives::{AttendanceReceipt, EventId};

use crate::errors::CheckInError;
use crate::state::{CheckInSession, LocationCheck};
use crate::traits::{AttendanceBackend, PositionProvider};

pub struct CheckInFlow<P, B> {
    provider: P,
    backend: B,
    session: CheckInSession,
}

impl<P: PositionProvider, B: AttendanceBackend> CheckInFlow<P, B> {
    pub fn new(provider: P, backend: B) -> Self {
        Self {
            provider,
            backend,
            session: CheckInSession::new(),
        }
    }

    pub fn session(&self) -> &CheckInSession {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the event and its location, then issues the automatic first position request.
    ///
    /// Backend failures are returned. Position failures are not: they land in
    /// [`LocationCheck::PositionDenied`] and wait for [`Self::request_position`].
    pub async fn open(&mut self, event_id: EventId) -> Result<LocationCheck, CheckInError> {
        let event = self.backend.fetch_event(event_id).await?;
        let location_id = event.location_id;
        self.session.load_event(event);

        if let Some(location_id) = location_id {
            let location = self.backend.fetch_location(location_id).await?;
            self.session.load_location(location)?;
        }

        if self.session.should_request_position() {
            self.acquire_position().await;
        }

        Ok(self.session.state().clone())
    }

    /// Explicit user retry or re-request.
    pub async fn request_position(&mut self) -> LocationCheck {
        self.acquire_position().await;
        self.session.state().clone()
    }

    /// Re-fetches the event's location record and revalidates against it.
    pub async fn reload_location(&mut self) -> Result<LocationCheck, CheckInError> {
        let location_id = self
            .session
            .event()
            .ok_or(CheckInError::EventNotLoaded)?
            .location_id;

        if let Some(location_id) = location_id {
            let location = self.backend.fetch_location(location_id).await?;
            self.session.load_location(location)?;
        }
        Ok(self.session.state().clone())
    }

    /// Rejects locally on any unmet precondition; only then calls the backend.
    pub async fn submit(&mut self, matricula: &str) -> Result<AttendanceReceipt, CheckInError> {
        let submission = self.session.authorize(matricula, unix_now())?;
        let receipt = self.backend.submit_attendance(&submission).await?;
        log::info!(
            "Attendance {} registered for event {}",
            receipt.id,
            receipt.event_id
        );
        Ok(receipt)
    }

    pub fn into_parts(self) -> (P, B, CheckInSession) {
        (self.provider, self.backend, self.session)
    }

    async fn acquire_position(&mut self) {
        let Some(ticket) = self.session.begin_position_request() else {
            return;
        };

        match self.provider.request_position().await {
            Ok(position) => {
                self.session.position_acquired(ticket, position);
            }
            Err(error) => {
                self.session.position_failed(ticket, error);
            }
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
