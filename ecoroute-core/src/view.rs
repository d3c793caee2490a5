//! Current map view and last-submission-wins publishing.
//!
//! Every submission takes a [`SubmissionTicket`] before it starts. A plan is
//! published only if its ticket is still the newest one issued, so a slow
//! older run can never overwrite the result of a newer submission. The
//! check and the write happen under the same lock.

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use crate::{Position, RenderPlan, RoutingDegraded};

/// Map centre before any route has been drawn: New Delhi.
pub const DEFAULT_FOCUS: Position = Position::new(28.6139, 77.2090);

/// Identifier of one submission; larger is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

impl SubmissionId {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Permission to publish the outcome of one submission.
///
/// Not `Clone`: each submission holds exactly one ticket.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    id: SubmissionId,
}

impl SubmissionTicket {
    /// The submission this ticket belongs to.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }
}

/// What the map currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Current plan; `None` until a run completes.
    pub plan: Option<RenderPlan>,
    /// Map centre.
    pub focus: Position,
    /// Degradation warning of the run that produced `plan`.
    pub warning: Option<RoutingDegraded>,
    /// Submission that produced `plan`.
    pub submission: Option<SubmissionId>,
}

impl ViewState {
    /// Empty view centred on `focus`.
    #[must_use]
    pub const fn centred_on(focus: Position) -> Self {
        Self {
            plan: None,
            focus,
            warning: None,
            submission: None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::centred_on(DEFAULT_FOCUS)
    }
}

/// Result of [`ViewStateStore::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The plan replaced the current view.
    Published,
    /// A newer submission exists; the plan was discarded.
    Stale {
        /// Newest submission issued so far.
        latest: SubmissionId,
    },
}

#[derive(Debug)]
struct Inner {
    view: ViewState,
    latest: u64,
}

/// Shared, lock-protected [`ViewState`] with a submission counter.
#[derive(Debug)]
pub struct ViewStateStore {
    inner: RwLock<Inner>,
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStateStore {
    /// Store with an empty view centred on [`DEFAULT_FOCUS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_focus(DEFAULT_FOCUS)
    }

    /// Store with an empty view centred on `focus`.
    #[must_use]
    pub fn with_focus(focus: Position) -> Self {
        Self {
            inner: RwLock::new(Inner {
                view: ViewState::centred_on(focus),
                latest: 0,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a ticket for a new submission, superseding all earlier ones.
    pub fn begin_submission(&self) -> SubmissionTicket {
        let mut inner = self.write();
        inner.latest += 1;
        let id = SubmissionId(inner.latest);
        debug!("submission {id} started");
        SubmissionTicket { id }
    }

    /// Whether `ticket` is still the newest submission.
    #[must_use]
    pub fn is_current(&self, ticket: &SubmissionTicket) -> bool {
        self.read().latest == ticket.id.0
    }

    /// Newest submission issued, if any.
    #[must_use]
    pub fn latest(&self) -> Option<SubmissionId> {
        let latest = self.read().latest;
        (latest > 0).then_some(SubmissionId(latest))
    }

    /// Replace the view with `plan` if `ticket` is still current.
    ///
    /// The focus moves to the plan's focus. A stale ticket leaves the view
    /// untouched.
    pub fn publish(
        &self,
        ticket: SubmissionTicket,
        plan: RenderPlan,
        warning: Option<RoutingDegraded>,
    ) -> PublishOutcome {
        let mut inner = self.write();
        if inner.latest != ticket.id.0 {
            let latest = SubmissionId(inner.latest);
            warn!(
                "discarding plan from submission {}; {latest} is newer",
                ticket.id
            );
            return PublishOutcome::Stale { latest };
        }
        inner.view = ViewState {
            focus: plan.focus,
            plan: Some(plan),
            warning,
            submission: Some(ticket.id),
        };
        debug!("published plan from submission {}", ticket.id);
        PublishOutcome::Published
    }

    /// Clone of the current view.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.read().view.clone()
    }
}
