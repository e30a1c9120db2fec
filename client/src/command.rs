use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use unichamada_checkin::{CheckInFlow, DirectValidation, LocationCheck};
use unichamada_primitives::{haversine_distance, validate_location, EventId};

use crate::backend::FixtureBackend;
use crate::cli::{CheckInCmd, Cli, DirectCmd, Subcommand};
use crate::geolocation::create_provider;
use crate::report;

pub async fn run() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.subcommand {
        Subcommand::Distance(cmd) => {
            report::distance(haversine_distance(cmd.lat1, cmd.lon1, cmd.lat2, cmd.lon2));
            Ok(ExitCode::SUCCESS)
        }
        Subcommand::Validate(cmd) => {
            let verdict = validate_location(
                cmd.user_lat,
                cmd.user_lon,
                cmd.target_lat,
                cmd.target_lon,
                Some(cmd.radius),
            );
            report::verdict(&verdict);
            Ok(exit_code(verdict.is_valid))
        }
        Subcommand::CheckIn(cmd) => check_in(cmd).await.map(exit_code),
        Subcommand::ValidarPresenca(cmd) => validar_presenca(cmd).await.map(exit_code),
    }
}

async fn check_in(cmd: CheckInCmd) -> Result<bool, Box<dyn Error>> {
    let config = cmd.geolocation.to_config()?;
    let backend = FixtureBackend::from_path(&cmd.fixtures)?;
    let mut flow = CheckInFlow::new(create_provider(&config), backend);

    let mut state = match flow.open(EventId::new(cmd.event)).await {
        Ok(state) => state,
        Err(e) => {
            report::failure(&e);
            return Ok(false);
        }
    };
    report::state(&state, flow.session());

    let mut retries = cmd.retries;
    while matches!(state, LocationCheck::PositionDenied(_)) && retries > 0 {
        retries -= 1;
        log::info!("Retrying position capture, {} retries left", retries);
        state = flow.request_position().await;
        report::state(&state, flow.session());
    }

    match flow.submit(&cmd.matricula).await {
        Ok(receipt) => {
            log::debug!(
                "{} submissions recorded",
                flow.backend().submissions_handle().read().await.len()
            );
            report::receipt(&receipt);
            Ok(true)
        }
        Err(e) => {
            report::failure(&e);
            Ok(false)
        }
    }
}

async fn validar_presenca(cmd: DirectCmd) -> Result<bool, Box<dyn Error>> {
    let config = cmd.geolocation.to_config()?;
    let backend = FixtureBackend::from_path(&cmd.fixtures)?;
    let provider = create_provider(&config);

    let mut form = DirectValidation::new();
    if let Err(e) = form.capture(provider.as_ref()).await {
        report::failure(&e);
    }
    form.set_event(cmd.event.map(EventId::new));
    form.set_matricula(cmd.matricula);

    match form.submit(&backend).await {
        Ok(receipt) => {
            log::debug!(
                "{} submissions recorded",
                backend.submissions_handle().read().await.len()
            );
            report::receipt(&receipt);
            Ok(true)
        }
        Err(e) => {
            report::failure(&e);
            Ok(false)
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
