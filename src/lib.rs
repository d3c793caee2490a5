//! Facade crate for the EcoRoute route-resolution engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP
//! transports behind the `http` feature.

#![forbid(unsafe_code)]

pub use ecoroute_core::{
    CargoType, DirectionsError, DirectionsProvider, DirectionsRequest, GroundRoute, Marker,
    Modality, NetworkError, OptimizationClient, OptimizationResult, PathStyle, PipelineError,
    PipelineOutcome, Position, RenderOutcome, RenderPlan, RoutePipeline, RouteSummary,
    RoutingDegraded, StopRequest, StopRequestError, TravelMode, ValidatedResult, ValidationError,
    VehicleClass, ViewState, ViewStateStore, build_render_plan, resolve_ground_route,
    resolve_modality, validate,
};

#[cfg(feature = "http")]
pub use ecoroute_data::{
    HttpOptimizationClient, HttpOptimizationClientConfig, OsrmDirectionsProvider,
    OsrmDirectionsProviderConfig,
};
