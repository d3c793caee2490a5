//! Route command implementation for the EcoRoute CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ecoroute_core::{
    CargoType, DEFAULT_MAX_DELIVERY_HOURS, DirectionsProvider, OptimizationClient,
    ParseLabelError, PipelineOutcome, RenderPlan, RoutePipeline, RouteSummary, StopRequest,
    VehicleClass,
};
use ecoroute_data::optimizer::DEFAULT_TIMEOUT_SECS;
use ecoroute_data::{
    HttpOptimizationClient, HttpOptimizationClientConfig, OsrmDirectionsProvider,
    OsrmDirectionsProviderConfig,
};
use log::{debug, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::open_utf8_file;
use crate::{
    ARG_CARGO_TYPE, ARG_CARGO_WEIGHT_KG, ARG_MAX_DELIVERY_HOURS, ARG_OPTIMIZER_URL, ARG_OSRM_URL,
    ARG_REQUEST, ARG_STOP, ARG_TIMEOUT_SECS, ARG_VEHICLE_TYPE, CliError, ENV_CARGO_WEIGHT_KG,
    ENV_STOP,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Submit an ordered list of stops to the optimization \
                 service, resolve a ground path for road and rail routes, \
                 and print the resulting render plan and route summary as \
                 JSON. Stops come from positional arguments, repeated --stop \
                 flags, or a JSON request file.",
    about = "Optimise a multi-stop route"
)]
#[ortho_config(prefix = "ECOROUTE")]
pub(crate) struct RouteArgs {
    /// Stop addresses in submission order.
    #[arg(value_name = "stop")]
    #[serde(default)]
    pub(crate) stops: Vec<String>,
    /// Additional stop address; may be repeated.
    #[arg(long = ARG_STOP, value_name = "address")]
    #[serde(default)]
    pub(crate) stop: Vec<String>,
    /// Path to a JSON file containing a stop request.
    #[arg(long = ARG_REQUEST, value_name = "path")]
    #[serde(default)]
    pub(crate) request: Option<Utf8PathBuf>,
    /// Cargo weight in kilograms.
    #[arg(long = ARG_CARGO_WEIGHT_KG, value_name = "kg")]
    #[serde(default)]
    pub(crate) cargo_weight_kg: Option<f64>,
    /// Cargo category: standard, perishable or hazardous.
    #[arg(long = ARG_CARGO_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) cargo_type: Option<String>,
    /// Maximum delivery window in hours.
    #[arg(long = ARG_MAX_DELIVERY_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) max_delivery_hours: Option<u32>,
    /// Preferred vehicle: electric_van, diesel_van or diesel_truck.
    #[arg(long = ARG_VEHICLE_TYPE, value_name = "vehicle")]
    #[serde(default)]
    pub(crate) vehicle_type: Option<String>,
    /// Base URL of the optimization service.
    #[arg(long = ARG_OPTIMIZER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) optimizer_url: Option<String>,
    /// Base URL of the OSRM server used for ground directions.
    #[arg(long = ARG_OSRM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_url: Option<String>,
    /// Timeout applied to each HTTP request.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Where the stop request comes from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RequestSource {
    /// A JSON file decoded at run time.
    File(Utf8PathBuf),
    /// Stops and cargo options given as flags.
    Inline(StopRequest),
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) request: RequestSource,
    pub(crate) optimizer_url: String,
    pub(crate) osrm_url: String,
    pub(crate) timeout: Duration,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let RouteArgs {
            stops,
            stop,
            request,
            cargo_weight_kg,
            cargo_type,
            max_delivery_hours,
            vehicle_type,
            optimizer_url,
            osrm_url,
            timeout_secs,
        } = args;
        let stops: Vec<String> = stops.into_iter().chain(stop).collect();

        // Cargo flags only shape inline requests; a request file carries its own.
        let request = match request {
            Some(_) if !stops.is_empty() => {
                return Err(CliError::ConflictingStops {
                    request: ARG_REQUEST,
                });
            }
            Some(path) => RequestSource::File(path),
            None => {
                let weight = cargo_weight_kg.ok_or(CliError::MissingArgument {
                    field: ARG_CARGO_WEIGHT_KG,
                    env: ENV_CARGO_WEIGHT_KG,
                })?;
                RequestSource::Inline(inline_request(
                    stops,
                    weight,
                    cargo_type,
                    max_delivery_hours,
                    vehicle_type,
                )?)
            }
        };

        Ok(Self {
            request,
            optimizer_url: optimizer_url
                .unwrap_or_else(|| HttpOptimizationClientConfig::default().base_url),
            osrm_url: osrm_url.unwrap_or_else(|| OsrmDirectionsProviderConfig::default().base_url),
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn inline_request(
    stops: Vec<String>,
    cargo_weight_kg: f64,
    cargo_type: Option<String>,
    max_delivery_hours: Option<u32>,
    vehicle_type: Option<String>,
) -> Result<StopRequest, CliError> {
    if stops.is_empty() {
        return Err(CliError::MissingArgument {
            field: ARG_STOP,
            env: ENV_STOP,
        });
    }
    let cargo_type: CargoType = parse_label(cargo_type, ARG_CARGO_TYPE)?.unwrap_or_default();
    let vehicle: Option<VehicleClass> = parse_label(vehicle_type, ARG_VEHICLE_TYPE)?;
    let request = StopRequest::new(
        stops,
        cargo_weight_kg,
        cargo_type,
        max_delivery_hours.unwrap_or(DEFAULT_MAX_DELIVERY_HOURS),
    )?;
    Ok(match vehicle {
        Some(vehicle) => request.with_vehicle_preference(vehicle),
        None => request,
    })
}

fn parse_label<T>(value: Option<String>, field: &'static str) -> Result<Option<T>, CliError>
where
    T: FromStr<Err = ParseLabelError>,
{
    value
        .map(|label| {
            label
                .parse()
                .map_err(|source| CliError::InvalidLabel { field, source })
        })
        .transpose()
}

/// Pipeline with type-erased transports so tests can substitute stubs.
pub(crate) type DynRoutePipeline =
    RoutePipeline<Box<dyn OptimizationClient>, Box<dyn DirectionsProvider>>;

/// Builds the pipeline for the current route invocation.
pub(crate) trait RoutePipelineBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRoutePipeline, CliError>;
}

pub(crate) struct DefaultRoutePipelineBuilder;

impl RoutePipelineBuilder for DefaultRoutePipelineBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRoutePipeline, CliError> {
        let client = HttpOptimizationClient::with_config(
            HttpOptimizationClientConfig::new(config.optimizer_url.clone())
                .with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildOptimizationClient {
            base_url: config.optimizer_url.clone(),
            source,
        })?;
        let directions = OsrmDirectionsProvider::with_config(
            OsrmDirectionsProviderConfig::new(config.osrm_url.clone()).with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildDirectionsProvider {
            base_url: config.osrm_url.clone(),
            source,
        })?;
        let client: Box<dyn OptimizationClient> = Box::new(client);
        let directions: Box<dyn DirectionsProvider> = Box::new(directions);
        Ok(RoutePipeline::new(client, directions))
    }
}

/// JSON document printed by the `route` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    pub(crate) plan: RenderPlan,
    pub(crate) summary: RouteSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) warning: Option<String>,
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &DefaultRoutePipelineBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RoutePipelineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_route(args, builder)?;
    write_route_report(writer, &report)
}

fn execute_route(
    args: RouteArgs,
    builder: &dyn RoutePipelineBuilder,
) -> Result<RouteReport, CliError> {
    let config = args.into_config()?;
    let request = match &config.request {
        RequestSource::File(path) => load_stop_request(path)?,
        RequestSource::Inline(request) => request.clone(),
    };
    let pipeline = builder.build(&config)?;
    debug!(
        "routing {} stops via {}",
        request.stops().len(),
        config.optimizer_url
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    match runtime.block_on(pipeline.submit(&request))? {
        PipelineOutcome::Published(outcome) => {
            let warning = outcome.warning.map(|degraded| {
                warn!("{degraded}; the map shows markers without a path");
                degraded.to_string()
            });
            Ok(RouteReport {
                plan: outcome.plan,
                summary: outcome.summary,
                warning,
            })
        }
        PipelineOutcome::Superseded { submission } => Err(CliError::Superseded { submission }),
    }
}

/// Loads a JSON-encoded [`StopRequest`] from disk.
pub(crate) fn load_stop_request(path: &Utf8Path) -> Result<StopRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route_report(writer: &mut dyn Write, report: &RouteReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
