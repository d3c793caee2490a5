//! One submission from stop list to published render plan.

use log::{debug, warn};
use thiserror::Error;

use crate::{
    DirectionsProvider, DirectionsRequest, Modality, NetworkError, OptimizationClient,
    Position, RenderPlan, RouteSummary, RoutingDegraded, StopRequest, SubmissionId,
    SubmissionTicket, TravelMode, ValidatedResult, ValidationError, ViewStateStore,
    build_render_plan, resolve_ground_route, resolve_modality, validate,
};

/// Shown when a declined result carries no message of its own.
pub const DECLINED_WITHOUT_MESSAGE: &str = "optimization service declined the request";

/// Reasons a submission produced no render plan.
///
/// None of these touch the view state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The optimization service could not be reached or answered garbage.
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// The service declined the request; `message` is the service's text
    /// verbatim, or [`DECLINED_WITHOUT_MESSAGE`] when it sent none.
    #[error("{message}")]
    Rejected {
        /// Service message.
        message: String,
    },
    /// The service's result broke a structural invariant.
    #[error("optimization result rejected: {0}")]
    Validation(#[from] ValidationError),
}

/// A plan that was published to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Submission that produced the plan.
    pub submission: SubmissionId,
    /// Published plan.
    pub plan: RenderPlan,
    /// Side-panel data.
    pub summary: RouteSummary,
    /// Set when ground routing degraded to an empty path.
    pub warning: Option<RoutingDegraded>,
}

/// Result of [`RoutePipeline::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The plan is now the current view.
    Published(RenderOutcome),
    /// A newer submission started first; nothing was published.
    Superseded {
        /// This run's submission.
        submission: SubmissionId,
    },
}

/// Optimization client, directions provider and view store wired together.
#[cfg_attr(
    feature = "test-support",
    doc = r#"
# Examples

```
use ecoroute_core::{
    CargoType, PipelineOutcome, RoutePipeline, StopRequest,
    test_support::{ScriptedDirectionsProvider, StubOptimizationClient, block_on, delhi_agra_jaipur},
};

let pipeline = RoutePipeline::new(
    StubOptimizationClient::with_result(delhi_agra_jaipur()),
    ScriptedDirectionsProvider::new([Ok(Vec::new())]),
);
let request = StopRequest::new(["New Delhi", "Agra", "Jaipur"], 500.0, CargoType::Standard, 48)?;
let outcome = block_on(pipeline.submit(&request))?;
assert!(matches!(outcome, PipelineOutcome::Published(_)));
# Ok::<(), Box<dyn std::error::Error>>(())
```
"#
)]
#[derive(Debug)]
pub struct RoutePipeline<C, D> {
    client: C,
    directions: D,
    view: ViewStateStore,
}

impl<C, D> RoutePipeline<C, D>
where
    C: OptimizationClient,
    D: DirectionsProvider,
{
    /// Pipeline with a fresh view store.
    pub fn new(client: C, directions: D) -> Self {
        Self::with_view(client, directions, ViewStateStore::new())
    }

    /// Pipeline publishing into `view`.
    pub const fn with_view(client: C, directions: D, view: ViewStateStore) -> Self {
        Self {
            client,
            directions,
            view,
        }
    }

    /// The view store plans are published to.
    pub const fn view(&self) -> &ViewStateStore {
        &self.view
    }

    /// The optimization client.
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// The directions provider.
    pub const fn directions(&self) -> &D {
        &self.directions
    }

    /// Run one submission.
    ///
    /// The submission supersedes any still in flight. A run that finishes
    /// after a newer submission started returns
    /// [`PipelineOutcome::Superseded`]; if it is already stale when the
    /// result is validated the directions provider is not contacted.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the service is unreachable, declines
    /// the request or returns a malformed result. The view is unchanged in
    /// every error case.
    pub async fn submit(&self, request: &StopRequest) -> Result<PipelineOutcome, PipelineError> {
        let ticket = self.view.begin_submission();
        debug!(
            "submission {} sending {} stops",
            ticket.id(),
            request.stops().len()
        );
        let result = self.client.submit(request).await?;
        if !result.is_success() {
            let message = result
                .message
                .clone()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| DECLINED_WITHOUT_MESSAGE.to_owned());
            warn!("optimization declined submission {}: {message}", ticket.id());
            return Err(PipelineError::Rejected { message });
        }
        let validated = validate(result)?;
        let modality = resolve_modality(validated.result());
        if !self.view.is_current(&ticket) {
            return Ok(self.superseded(&ticket));
        }
        let (ground_path, warning) = self.ground_path(&validated, modality).await;
        let plan = build_render_plan(&validated, modality, ground_path.as_deref());
        let summary = RouteSummary::from_result(&validated);
        Ok(self.publish(ticket, plan, summary, warning))
    }

    async fn ground_path(
        &self,
        validated: &ValidatedResult,
        modality: Modality,
    ) -> (Option<Vec<Position>>, Option<RoutingDegraded>) {
        if !modality.is_ground() || validated.result().usable_road_geometry().is_some() {
            return (None, None);
        }
        let Some(request) =
            DirectionsRequest::from_result(validated, TravelMode::for_modality(modality))
        else {
            return (None, None);
        };
        let (path, warning) = resolve_ground_route(&self.directions, &request)
            .await
            .into_parts();
        (Some(path), warning)
    }

    fn publish(
        &self,
        ticket: SubmissionTicket,
        plan: RenderPlan,
        summary: RouteSummary,
        warning: Option<RoutingDegraded>,
    ) -> PipelineOutcome {
        let submission = ticket.id();
        match self.view.publish(ticket, plan.clone(), warning.clone()) {
            crate::PublishOutcome::Published => PipelineOutcome::Published(RenderOutcome {
                submission,
                plan,
                summary,
                warning,
            }),
            crate::PublishOutcome::Stale { .. } => PipelineOutcome::Superseded { submission },
        }
    }

    fn superseded(&self, ticket: &SubmissionTicket) -> PipelineOutcome {
        warn!(
            "submission {} superseded before routing; skipping directions",
            ticket.id()
        );
        PipelineOutcome::Superseded {
            submission: ticket.id(),
        }
    }
}
