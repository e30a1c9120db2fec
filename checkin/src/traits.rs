//! Collaborator seams: the device position capability and the attendance backend.

use unichamada_primitives::{
    AttendanceReceipt, AttendanceSubmission, Coordinate, EventId, EventRecord, LocationId,
    LocationRecord,
};

use crate::errors::{BackendError, PositionError};

/// One-shot device position request. It resolves once or fails once and cannot be cancelled.
#[async_trait::async_trait]
pub trait PositionProvider: Send + Sync {
    async fn request_position(&self) -> Result<Coordinate, PositionError>;
}

#[async_trait::async_trait]
impl<T: PositionProvider + ?Sized> PositionProvider for Box<T> {
    async fn request_position(&self) -> Result<Coordinate, PositionError> {
        (**self).request_position().await
    }
}

#[async_trait::async_trait]
pub trait AttendanceBackend: Send + Sync {
    async fn fetch_event(&self, id: EventId) -> Result<EventRecord, BackendError>;

    async fn fetch_location(&self, id: LocationId) -> Result<LocationRecord, BackendError>;

    async fn submit_attendance(
        &self,
        submission: &AttendanceSubmission,
    ) -> Result<AttendanceReceipt, BackendError>;
}
