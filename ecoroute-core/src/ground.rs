//! Ground routing with a Transit-to-Driving fallback.
//!
//! The lookup is an explicit state machine:
//!
//! ```text
//! Start -> AwaitingResponse(mode) -> Resolved
//!                 |  Transit failed
//!                 v
//!              Retrying -> AwaitingResponse(Driving) -> Resolved | Failed
//! ```
//!
//! A Driving failure is terminal, so at most two provider calls are made.
//! Failure is not an error: the route degrades to an empty path and the
//! failed attempts are reported as a [`RoutingDegraded`] warning.

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::{DirectionsError, DirectionsProvider, DirectionsRequest, Position, TravelMode};

/// A provider call that did not produce a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt {
    /// Mode the request was issued with.
    pub travel_mode: TravelMode,
    /// Provider error.
    pub error: DirectionsError,
}

impl fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.travel_mode, self.error)
    }
}

/// Non-fatal warning raised when no ground path could be found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ground routing degraded after {} failed attempt(s): {}", .attempts.len(), join_attempts(.attempts))]
pub struct RoutingDegraded {
    /// Failed attempts in the order they were made.
    pub attempts: Vec<FailedAttempt>,
}

fn join_attempts(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of [`resolve_ground_route`].
#[derive(Debug, Clone, PartialEq)]
pub enum GroundRoute {
    /// The provider returned a path.
    Resolved {
        /// Provider geometry.
        path: Vec<Position>,
        /// Mode that succeeded.
        travel_mode: TravelMode,
        /// Attempts that failed before success.
        failed: Vec<FailedAttempt>,
    },
    /// Every permitted attempt failed.
    Failed(RoutingDegraded),
}

impl GroundRoute {
    /// Path to draw; empty when routing failed.
    #[must_use]
    pub fn path(&self) -> &[Position] {
        match self {
            Self::Resolved { path, .. } => path,
            Self::Failed(_) => &[],
        }
    }

    /// Degradation warning, if routing failed.
    #[must_use]
    pub const fn degraded(&self) -> Option<&RoutingDegraded> {
        match self {
            Self::Resolved { .. } => None,
            Self::Failed(warning) => Some(warning),
        }
    }

    /// Split into the path and the optional warning.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Position>, Option<RoutingDegraded>) {
        match self {
            Self::Resolved { path, .. } => (path, None),
            Self::Failed(warning) => (Vec::new(), Some(warning)),
        }
    }
}

enum State {
    Start,
    AwaitingResponse(TravelMode),
    Retrying,
}

/// Resolve a ground path for `request`, retrying Transit as Driving.
///
/// The request's own travel mode is the first attempt. A failure with
/// [`TravelMode::Transit`] reissues the identical request with
/// [`TravelMode::Driving`]; a failure with Driving ends in
/// [`GroundRoute::Failed`].
pub async fn resolve_ground_route<P>(provider: &P, request: &DirectionsRequest) -> GroundRoute
where
    P: DirectionsProvider + ?Sized,
{
    let mut failed = Vec::new();
    let mut state = State::Start;
    loop {
        state = match state {
            State::Start => {
                debug!(
                    "requesting {:?} directions through {} stops",
                    request.travel_mode,
                    request.stops().count()
                );
                State::AwaitingResponse(request.travel_mode)
            }
            State::AwaitingResponse(travel_mode) => {
                let attempt = request.with_travel_mode(travel_mode);
                match provider.route(&attempt).await {
                    Ok(path) => {
                        debug!("{travel_mode:?} directions resolved with {} points", path.len());
                        return GroundRoute::Resolved {
                            path,
                            travel_mode,
                            failed,
                        };
                    }
                    Err(error) => {
                        debug!("{travel_mode:?} directions failed: {error}");
                        failed.push(FailedAttempt { travel_mode, error });
                        match travel_mode {
                            TravelMode::Transit => State::Retrying,
                            TravelMode::Driving => {
                                let warning = RoutingDegraded { attempts: failed };
                                warn!("{warning}; rendering without a path");
                                return GroundRoute::Failed(warning);
                            }
                        }
                    }
                }
            }
            State::Retrying => {
                warn!("transit directions unavailable; retrying with driving");
                State::AwaitingResponse(TravelMode::Driving)
            }
        };
    }
}
