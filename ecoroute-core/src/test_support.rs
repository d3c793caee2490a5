//! Deterministic test doubles for the optimization client and directions
//! provider, plus shared fixtures.
//!
//! The doubles record every call so tests can assert on what was sent, not
//! only on what came back.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    BackhaulOpportunity, DirectionsError, DirectionsProvider, DirectionsRequest, NetworkError,
    OptimizationClient, OptimizationResult, PoolingOpportunity, Position, StopRequest, TravelMode,
};

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be built.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("current-thread runtime should build")
        .block_on(future)
}

/// Stub [`OptimizationClient`] replaying scripted responses.
///
/// Responses are consumed in order; the last one repeats for any further
/// calls.
///
/// # Example
///
/// ```
/// use ecoroute_core::{CargoType, OptimizationClient, StopRequest};
/// use ecoroute_core::test_support::{StubOptimizationClient, block_on, delhi_agra_jaipur};
///
/// let client = StubOptimizationClient::with_result(delhi_agra_jaipur());
/// let request = StopRequest::new(["Agra"], 10.0, CargoType::Standard, 24)?;
/// let result = block_on(client.submit(&request))?;
/// assert!(result.is_success());
/// assert_eq!(client.calls(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct StubOptimizationClient {
    responses: RefCell<VecDeque<Result<OptimizationResult, NetworkError>>>,
    requests: RefCell<Vec<StopRequest>>,
}

impl StubOptimizationClient {
    /// Client replaying `responses` in order.
    #[must_use]
    pub fn scripted<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<OptimizationResult, NetworkError>>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            requests: RefCell::default(),
        }
    }

    /// Client that always answers with `result`.
    #[must_use]
    pub fn with_result(result: OptimizationResult) -> Self {
        Self::scripted([Ok(result)])
    }

    /// Client that always fails with `error`.
    #[must_use]
    pub fn with_error(error: NetworkError) -> Self {
        Self::scripted([Err(error)])
    }

    /// Number of submissions received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Requests received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<StopRequest> {
        self.requests.borrow().clone()
    }

    fn next_response(&self) -> Result<OptimizationResult, NetworkError> {
        let mut responses = self.responses.borrow_mut();
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        next.unwrap_or_else(|| {
            Err(NetworkError::MalformedResponse {
                message: "no scripted response".into(),
            })
        })
    }
}

#[async_trait(?Send)]
impl OptimizationClient for StubOptimizationClient {
    async fn submit(&self, request: &StopRequest) -> Result<OptimizationResult, NetworkError> {
        self.requests.borrow_mut().push(request.clone());
        self.next_response()
    }
}

#[derive(Debug)]
struct ScriptedReply {
    gate: Option<Arc<Notify>>,
    reply: Result<Vec<Position>, DirectionsError>,
}

/// [`DirectionsProvider`] answering from a queue of scripted replies.
///
/// Each call pops one reply. A gated reply waits for its [`Notify`] before
/// returning, which lets tests hold a lookup in flight while another
/// submission runs. Once the queue is empty every call fails with
/// [`DirectionsError::NoRoute`].
#[derive(Debug, Default)]
pub struct ScriptedDirectionsProvider {
    replies: RefCell<VecDeque<ScriptedReply>>,
    requests: RefCell<Vec<DirectionsRequest>>,
    in_flight: Cell<usize>,
}

impl ScriptedDirectionsProvider {
    /// Provider answering with `replies` in order.
    #[must_use]
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<Position>, DirectionsError>>,
    {
        Self {
            replies: RefCell::new(
                replies
                    .into_iter()
                    .map(|reply| ScriptedReply { gate: None, reply })
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Append a reply released only once `gate` is notified.
    #[must_use]
    pub fn then_gated(self, gate: Arc<Notify>, reply: Result<Vec<Position>, DirectionsError>) -> Self {
        self.replies.borrow_mut().push_back(ScriptedReply {
            gate: Some(gate),
            reply,
        });
        self
    }

    /// Append an ungated reply.
    #[must_use]
    pub fn then(self, reply: Result<Vec<Position>, DirectionsError>) -> Self {
        self.replies
            .borrow_mut()
            .push_back(ScriptedReply { gate: None, reply });
        self
    }

    /// Requests received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<DirectionsRequest> {
        self.requests.borrow().clone()
    }

    /// Travel modes of the requests received, in order.
    #[must_use]
    pub fn modes(&self) -> Vec<TravelMode> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.travel_mode)
            .collect()
    }

    /// Number of calls currently waiting on a gate.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }
}

#[async_trait(?Send)]
impl DirectionsProvider for ScriptedDirectionsProvider {
    async fn route(&self, request: &DirectionsRequest) -> Result<Vec<Position>, DirectionsError> {
        self.requests.borrow_mut().push(request.clone());
        let next = self.replies.borrow_mut().pop_front();
        let Some(ScriptedReply { gate, reply }) = next else {
            return Err(DirectionsError::NoRoute {
                message: "no scripted reply".into(),
            });
        };
        if let Some(gate) = gate {
            self.in_flight.set(self.in_flight.get() + 1);
            gate.notified().await;
            self.in_flight.set(self.in_flight.get() - 1);
        }
        reply
    }
}

/// Three-stop result: New Delhi, Agra and Jaipur visited as Delhi, Jaipur,
/// Agra by a diesel truck.
#[must_use]
pub fn delhi_agra_jaipur() -> OptimizationResult {
    let mut result = OptimizationResult::success(
        vec![
            "New Delhi, India".into(),
            "Agra, India".into(),
            "Jaipur, India".into(),
        ],
        vec![
            Position::new(28.6, 77.2),
            Position::new(27.1, 78.0),
            Position::new(26.9, 75.8),
        ],
        vec![0, 2, 1],
    )
    .with_vehicle("Heavy Diesel Truck");
    result.total_distance_km = Some(720.5);
    result.co2_emissions_kg = 252.18;
    result.trip_cost_inr = 28_820.0;
    result.capacity_utilization_percent = 5.0;
    result.pooling_opportunities = vec![PoolingOpportunity {
        city: "Agra, India".into(),
        item: "Leather Goods".into(),
        weight: 300.0,
        revenue_inr: 2_500.0,
    }];
    result.backhaul_opportunity = Some(BackhaulOpportunity {
        from_city: Some("Agra, India".into()),
        to_city: "New Delhi".into(),
        item: "Marble Handicrafts".into(),
        weight: 1_200.0,
        revenue_inr: 6_000.0,
    });
    result
}
