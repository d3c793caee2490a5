//! Command-line interface for the EcoRoute engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod route;

pub use error::CliError;

use route::{RouteArgs, run_route};

pub(crate) const ARG_STOP: &str = "stop";
pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_CARGO_WEIGHT_KG: &str = "cargo-weight-kg";
pub(crate) const ARG_CARGO_TYPE: &str = "cargo-type";
pub(crate) const ARG_MAX_DELIVERY_HOURS: &str = "max-delivery-hours";
pub(crate) const ARG_VEHICLE_TYPE: &str = "vehicle-type";
pub(crate) const ARG_OPTIMIZER_URL: &str = "optimizer-url";
pub(crate) const ARG_OSRM_URL: &str = "osrm-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_STOP: &str = "ECOROUTE_STOP";
pub(crate) const ENV_CARGO_WEIGHT_KG: &str = "ECOROUTE_CARGO_WEIGHT_KG";

/// Run the EcoRoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// optimization service cannot be reached or declines the request, or the
/// result cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ecoroute",
    about = "Optimise multi-stop freight routes and plan their map rendering",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit stops for optimization and print the render plan.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
