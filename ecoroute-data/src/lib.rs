//! Transport adapters for the EcoRoute engine.
//!
//! Responsibilities:
//! - Talk HTTP to the route optimization service.
//! - Talk HTTP to an OSRM routing server for ground directions.
//! - Own the wire formats of both services.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `ecoroute-core`).
//! - Keep blocking I/O off async executors; every call is async.
//!
//! Invariants:
//! - No global mutable state.

pub mod optimizer;
pub mod routing;

pub use optimizer::{ClientBuildError, HttpOptimizationClient, HttpOptimizationClientConfig};
pub use routing::{OsrmDirectionsProvider, OsrmDirectionsProviderConfig, ProviderBuildError};
