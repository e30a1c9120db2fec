//! UNICHAMADA check-in client.

mod backend;
mod cli;
mod command;
mod geolocation;
mod report;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    command::run().await
}
