//! Test helpers for writing request files and stubbing the route pipeline.

use std::cell::RefCell;

use camino::Utf8Path;
use ecoroute_core::test_support::{ScriptedDirectionsProvider, StubOptimizationClient};
use ecoroute_core::{
    DirectionsError, DirectionsProvider, OptimizationClient, OptimizationResult, Position,
    RoutePipeline,
};

use crate::CliError;
use crate::route::{DynRoutePipeline, RouteConfig, RoutePipelineBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn stops_json() -> &'static str {
    r#"{
        "stops": ["New Delhi, India", "Agra, India", "Jaipur, India"],
        "cargo_weight_kg": 500.0,
        "cargo_type": "Perishable",
        "max_delivery_hours": 48
    }"#
}

/// Builds pipelines around a canned optimization result and directions replies.
pub(super) struct StubRoutePipelineBuilder {
    result: OptimizationResult,
    replies: RefCell<Vec<Result<Vec<Position>, DirectionsError>>>,
    config: RefCell<Option<RouteConfig>>,
}

impl StubRoutePipelineBuilder {
    pub(super) fn new(
        result: OptimizationResult,
        replies: Vec<Result<Vec<Position>, DirectionsError>>,
    ) -> Self {
        Self {
            result,
            replies: RefCell::new(replies),
            config: RefCell::new(None),
        }
    }

    /// Configuration the last pipeline was built for.
    pub(super) fn config(&self) -> Option<RouteConfig> {
        self.config.borrow().clone()
    }
}

impl RoutePipelineBuilder for StubRoutePipelineBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DynRoutePipeline, CliError> {
        self.config.replace(Some(config.clone()));
        let client: Box<dyn OptimizationClient> =
            Box::new(StubOptimizationClient::with_result(self.result.clone()));
        let directions: Box<dyn DirectionsProvider> =
            Box::new(ScriptedDirectionsProvider::new(self.replies.take()));
        Ok(RoutePipeline::new(client, directions))
    }
}
