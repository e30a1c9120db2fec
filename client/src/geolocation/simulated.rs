use unichamada_checkin::{PositionError, PositionProvider};
use unichamada_primitives::Coordinate;

/// Device whose position capability always fails the same way.
pub struct FailingGeolocation {
    error: PositionError,
}

impl FailingGeolocation {
    pub fn new(error: PositionError) -> Self {
        Self { error }
    }
}

#[async_trait::async_trait]
impl PositionProvider for FailingGeolocation {
    async fn request_position(&self) -> Result<Coordinate, PositionError> {
        log::debug!("Simulated geolocation failure: {}", self.error);
        Err(self.error.clone())
    }
}
