use std::path::PathBuf;
use std::time::Duration;

use unichamada_primitives::{Coordinate, DEFAULT_RADIUS_METERS};

use crate::geolocation::{GeolocationConfig, GeolocationMode, DEFAULT_DENIAL_REASON};

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about = "UNICHAMADA - geolocated attendance check-in",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Great-circle distance in meters between two points.
    Distance(DistanceCmd),

    /// Check a position against a target and radius.
    Validate(ValidateCmd),

    /// Location-gated check-in for an event.
    CheckIn(CheckInCmd),

    /// Submit attendance with raw coordinates for the server to judge.
    ValidarPresenca(DirectCmd),
}

#[derive(Debug, clap::Args)]
pub struct DistanceCmd {
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}

#[derive(Debug, clap::Args)]
pub struct ValidateCmd {
    #[arg(allow_negative_numbers = true)]
    pub user_lat: f64,
    #[arg(allow_negative_numbers = true)]
    pub user_lon: f64,
    #[arg(allow_negative_numbers = true)]
    pub target_lat: f64,
    #[arg(allow_negative_numbers = true)]
    pub target_lon: f64,

    #[arg(long, default_value_t = DEFAULT_RADIUS_METERS)]
    pub radius: f64,
}

#[derive(Debug, clap::Args)]
pub struct CheckInCmd {
    #[arg(long)]
    pub fixtures: PathBuf,

    #[arg(long)]
    pub event: u64,

    #[arg(long)]
    pub matricula: String,

    /// Times to press "capture location" again after a failure.
    #[arg(long, default_value = "0")]
    pub retries: u32,

    #[clap(flatten)]
    pub geolocation: GeolocationArgs,
}

#[derive(Debug, clap::Args)]
pub struct DirectCmd {
    #[arg(long)]
    pub fixtures: PathBuf,

    #[arg(long)]
    pub event: Option<u64>,

    #[arg(long)]
    pub matricula: String,

    #[clap(flatten)]
    pub geolocation: GeolocationArgs,
}

#[derive(Debug, clap::Args)]
pub struct GeolocationArgs {
    #[arg(long, default_value = "mock")]
    pub geolocation_mode: String,

    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub lon: f64,

    #[arg(long, default_value = "5")]
    pub jitter_meters: f64,

    #[arg(long, default_value = "42")]
    pub mock_seed: u64,

    #[arg(long, default_value = "0")]
    pub mock_denials: u32,

    #[arg(long, default_value = DEFAULT_DENIAL_REASON)]
    pub denial_reason: String,

    #[arg(long, default_value = "0")]
    pub latency_ms: u64,
}

impl GeolocationArgs {
    pub fn to_config(&self) -> Result<GeolocationConfig, String> {
        let mode: GeolocationMode = self.geolocation_mode.parse()?;
        Ok(GeolocationConfig {
            mode,
            position: Coordinate::new(self.lat, self.lon),
            jitter_meters: self.jitter_meters,
            seed: self.mock_seed,
            denials: self.mock_denials,
            denial_reason: self.denial_reason.clone(),
            latency: Duration::from_millis(self.latency_ms),
        })
    }
}
