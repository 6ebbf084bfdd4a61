//! Results of running a transaction.

use std::fmt;

use crate::action::ActionId;
use crate::item::ItemStack;
use crate::player::ActorId;

/// Identifies which stage of the protocol produced a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionPhase {
    /// One-shot guard, source check and balance check. Rejections here have no side effects.
    Precheck,
    Validate,
    Authorize,
    PreExecute,
    Commit,
}

impl TransactionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionPhase::Precheck => "precheck",
            TransactionPhase::Validate => "validate",
            TransactionPhase::Authorize => "authorize",
            TransactionPhase::PreExecute => "pre_execute",
            TransactionPhase::Commit => "commit",
        }
    }

    /// Whether a rejection in this phase resends inventories to the source.
    pub fn resyncs(&self) -> bool {
        matches!(
            self,
            TransactionPhase::Validate | TransactionPhase::Authorize | TransactionPhase::PreExecute
        )
    }
}

/// Why a transaction was not applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    AlreadyExecuted,
    SourceMismatch { expected: ActorId, found: ActorId },
    Empty,
    /// Leftover consumed (`have`) and produced (`need`) stacks after settling.
    Unbalanced {
        have: Vec<ItemStack>,
        need: Vec<ItemStack>,
    },
    /// The action's assumed prior state no longer holds.
    InvalidAction(ActionId),
    /// The transaction-level hook denied the batch.
    Cancelled,
    /// A craft or drop hook denied the action.
    Denied(ActionId),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::AlreadyExecuted => write!(f, "already executed"),
            RejectReason::SourceMismatch { expected, found } => {
                write!(f, "environment player {found} is not the source {expected}")
            }
            RejectReason::Empty => write!(f, "no actions"),
            RejectReason::Unbalanced { have, need } => write!(
                f,
                "unbalanced ({} unmatched consumed, {} unmatched produced)",
                have.len(),
                need.len()
            ),
            RejectReason::InvalidAction(id) => write!(f, "{id} is stale or invalid"),
            RejectReason::Cancelled => write!(f, "cancelled by hook"),
            RejectReason::Denied(id) => write!(f, "{id} denied by hook"),
        }
    }
}

/// A rejection and where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub phase: TransactionPhase,
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new(phase: TransactionPhase, reason: RejectReason) -> Self {
        Self { phase, reason }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rejected: {}", self.phase.as_str(), self.reason)
    }
}

/// Per-action results of the commit phase.
///
/// A failed action was already validated and authorized; its failure means
/// the side effect could not complete, and it is not rolled back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub succeeded: Vec<ActionId>,
    pub failed: Vec<ActionId>,
}

impl CommitReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of [`super::Transaction::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionOutcome {
    Committed(CommitReport),
    Rejected(Rejection),
}

impl TransactionOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Committed(_) => None,
        }
    }

    pub fn report(&self) -> Option<&CommitReport> {
        match self {
            Self::Committed(report) => Some(report),
            Self::Rejected(_) => None,
        }
    }
}
