pub mod mock;
pub mod simulated;

pub use mock::{MockConfig, MockGeolocation};
pub use simulated::FailingGeolocation;

use std::time::Duration;

use unichamada_checkin::{PositionError, PositionProvider};
use unichamada_primitives::Coordinate;

pub const DEFAULT_DENIAL_REASON: &str = "User denied Geolocation";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum GeolocationMode {
    #[default]
    Mock,
    Denied,
    Unavailable,
    Timeout,
    Disabled,
}

impl std::str::FromStr for GeolocationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "denied" => Ok(Self::Denied),
            "unavailable" => Ok(Self::Unavailable),
            "timeout" => Ok(Self::Timeout),
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            _ => Err(format!("Unknown geolocation mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    pub mode: GeolocationMode,
    pub position: Coordinate,
    pub jitter_meters: f64,
    pub seed: u64,
    pub denials: u32,
    pub denial_reason: String,
    pub latency: Duration,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            mode: GeolocationMode::Mock,
            position: Coordinate::default(),
            jitter_meters: 5.0,
            seed: 42,
            denials: 0,
            denial_reason: DEFAULT_DENIAL_REASON.to_string(),
            latency: Duration::ZERO,
        }
    }
}

pub fn create_provider(config: &GeolocationConfig) -> Box<dyn PositionProvider> {
    match config.mode {
        GeolocationMode::Mock => {
            log::info!(
                "Mock geolocation at {} - jitter: {}m, seed: {}",
                config.position,
                config.jitter_meters,
                config.seed
            );
            Box::new(MockGeolocation::new(MockConfig {
                position: config.position,
                jitter_meters: config.jitter_meters,
                seed: config.seed,
                denials: config.denials,
                denial_reason: config.denial_reason.clone(),
                latency: config.latency,
            }))
        }
        GeolocationMode::Denied => Box::new(FailingGeolocation::new(
            PositionError::PermissionDenied(config.denial_reason.clone()),
        )),
        GeolocationMode::Unavailable => Box::new(FailingGeolocation::new(
            PositionError::Unavailable("Position unavailable".into()),
        )),
        GeolocationMode::Timeout => Box::new(FailingGeolocation::new(PositionError::Timeout(
            "Timeout expired".into(),
        ))),
        GeolocationMode::Disabled => {
            log::info!("Device geolocation disabled");
            Box::new(FailingGeolocation::new(PositionError::Unsupported))
        }
    }
}
