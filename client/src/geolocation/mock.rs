use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;
use unichamada_checkin::{PositionError, PositionProvider};
use unichamada_primitives::{meters_to_latitude_degrees, Coordinate};

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub position: Coordinate,
    /// Fixes land uniformly inside a disc of this radius around `position`.
    pub jitter_meters: f64,
    pub seed: u64,
    /// Requests refused with `denial_reason` before the first fix.
    pub denials: u32,
    pub denial_reason: String,
    pub latency: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            position: Coordinate::default(),
            jitter_meters: 5.0,
            seed: 42,
            denials: 0,
            denial_reason: super::DEFAULT_DENIAL_REASON.to_string(),
            latency: Duration::ZERO,
        }
    }
}

pub struct MockGeolocation {
    rng: Mutex<ChaCha8Rng>,
    config: MockConfig,
    requests: AtomicU32,
}

impl MockGeolocation {
    pub fn new(config: MockConfig) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(config.seed)),
            config,
            requests: AtomicU32::new(0),
        }
    }

    #[cfg(test)]
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    fn jittered(&self, rng: &mut ChaCha8Rng) -> Coordinate {
        let base = self.config.position;
        if self.config.jitter_meters <= 0.0 {
            return base;
        }

        let bearing = rng.gen_range(0.0..TAU);
        let offset = self.config.jitter_meters * rng.gen::<f64>().sqrt();

        let d_lat = meters_to_latitude_degrees(offset * bearing.cos());
        let lat_scale = base.latitude.to_radians().cos().max(1e-6);
        let d_lon = meters_to_latitude_degrees(offset * bearing.sin()) / lat_scale;

        Coordinate::new(base.latitude + d_lat, base.longitude + d_lon)
    }
}

#[async_trait::async_trait]
impl PositionProvider for MockGeolocation {
    async fn request_position(&self) -> Result<Coordinate, PositionError> {
        let attempt = self.requests.fetch_add(1, Ordering::SeqCst);

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if attempt < self.config.denials {
            log::debug!("Mock geolocation denying request {}", attempt + 1);
            return Err(PositionError::PermissionDenied(
                self.config.denial_reason.clone(),
            ));
        }

        let mut rng = self.rng.lock().await;
        let position = self.jittered(&mut rng);
        log::debug!("Mock geolocation fix {}", position);
        Ok(position)
    }
}
