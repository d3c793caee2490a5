//! Core route-resolution engine for EcoRoute.
//!
//! A submission flows through a fixed set of stages:
//!
//! 1. an [`OptimizationClient`] turns a [`StopRequest`] into an
//!    [`OptimizationResult`];
//! 2. [`validate`] checks the result's structural invariants and yields a
//!    [`ValidatedResult`];
//! 3. [`resolve_modality`] classifies the route as Air, Rail or Road;
//! 4. ground modalities without service geometry go through
//!    [`resolve_ground_route`], which retries failed Transit lookups as
//!    Driving;
//! 5. [`build_render_plan`] produces the [`RenderPlan`], which is published
//!    into a [`ViewStateStore`] only if no newer submission has started.
//!
//! [`RoutePipeline`] wires these together. Transport implementations live
//! in `ecoroute-data`. Scripted test doubles live in `test_support` behind
//! the `test-support` feature.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod directions;
mod ground;
mod modality;
mod optimization;
mod pipeline;
mod position;
mod render;
mod request;
mod summary;
mod validation;
mod view;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use directions::{
    DirectionsError, DirectionsProvider, DirectionsRequest, TravelMode, Waypoint,
};
pub use ground::{FailedAttempt, GroundRoute, RoutingDegraded, resolve_ground_route};
pub use modality::{Modality, resolve_modality};
pub use optimization::{
    BackhaulOpportunity, NetworkError, OptimizationClient, OptimizationResult,
    PoolingOpportunity, ResultStatus,
};
pub use pipeline::{
    DECLINED_WITHOUT_MESSAGE, PipelineError, PipelineOutcome, RenderOutcome, RoutePipeline,
};
pub use position::Position;
pub use render::{Bounds, Marker, PathStyle, RenderPlan, build_render_plan};
pub use request::{
    CargoType, DEFAULT_MAX_DELIVERY_HOURS, ParseLabelError, StopRequest, StopRequestError,
    VehicleClass,
};
pub use summary::RouteSummary;
pub use validation::{ValidatedResult, ValidationError, validate};
pub use view::{
    DEFAULT_FOCUS, PublishOutcome, SubmissionId, SubmissionTicket, ViewState, ViewStateStore,
};
