//! Error types emitted by the EcoRoute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ecoroute_core::{ParseLabelError, PipelineError, StopRequestError, SubmissionId};
use ecoroute_data::{ClientBuildError, ProviderBuildError};
use thiserror::Error;

/// Errors emitted by the EcoRoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// Stops were given both inline and through a request file.
    #[error("pass stops either inline or with --{request}, not both")]
    ConflictingStops {
        /// Name of the request file flag.
        request: &'static str,
    },
    /// A cargo type or vehicle class label was not recognised.
    #[error("invalid --{field}: {source}")]
    InvalidLabel {
        /// Flag carrying the label.
        field: &'static str,
        /// Parser error.
        #[source]
        source: ParseLabelError,
    },
    /// The assembled stop request was rejected.
    #[error("invalid stop request: {0}")]
    InvalidRequest(#[from] StopRequestError),
    /// Opening the request file failed.
    #[error("failed to open stop request at {path:?}: {source}")]
    OpenRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// IO error.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded or failed validation.
    #[error("failed to parse stop request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the optimization client failed.
    #[error("failed to build optimization client for {base_url:?}: {source}")]
    BuildOptimizationClient {
        /// Configured service URL.
        base_url: String,
        /// Build error.
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the directions provider failed.
    #[error("failed to build directions provider for {base_url:?}: {source}")]
    BuildDirectionsProvider {
        /// Configured OSRM URL.
        base_url: String,
        /// Build error.
        #[source]
        source: ProviderBuildError,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The submission failed; a declined request shows the service message.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// Another submission replaced this one before it was published.
    #[error("submission {submission} was superseded")]
    Superseded {
        /// The replaced submission.
        submission: SubmissionId,
    },
    /// Serialising the route report failed.
    #[error("failed to serialise route report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the route report failed.
    #[error("failed to write route report: {0}")]
    WriteReport(#[source] std::io::Error),
}
