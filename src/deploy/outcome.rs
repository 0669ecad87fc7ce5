// ABOUTME: Structured result of a deploy.
// ABOUTME: Separates confirmed readiness from unconfirmed and failed updates.

use crate::platform::{FunctionStatus, PushReport, RepositoryStatus};
use crate::types::{FunctionName, ImageRef};
use std::fmt;

/// How the function was pointed at the new image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// Existing function's code updated.
    Updated,
    /// Function did not exist and was created.
    Created,
}

impl fmt::Display for PublishAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishAction::Updated => write!(f, "updated"),
            PublishAction::Created => write!(f, "created"),
        }
    }
}

/// One status query made while waiting for readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollAttempt {
    /// The platform answered with this status.
    Observed(FunctionStatus),
    /// The query itself failed; treated as not yet ready.
    QueryFailed(String),
}

/// Result of waiting for the platform to finish the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// No polling was requested.
    NotRequested,
    /// The platform reported the update as successful.
    Ready { attempts: Vec<PollAttempt> },
    /// The platform reported the update as failed.
    Failed {
        reason: Option<String>,
        attempts: Vec<PollAttempt>,
    },
    /// The attempt budget ran out without a final status.
    TimedOut { attempts: Vec<PollAttempt> },
}

impl Readiness {
    pub fn attempts(&self) -> &[PollAttempt] {
        match self {
            Readiness::NotRequested => &[],
            Readiness::Ready { attempts }
            | Readiness::Failed { attempts, .. }
            | Readiness::TimedOut { attempts } => attempts,
        }
    }

    /// Number of status queries made.
    pub fn queries(&self) -> usize {
        self.attempts().len()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }

    /// True when the deploy went through but readiness was not confirmed.
    pub fn is_unconfirmed(&self) -> bool {
        matches!(self, Readiness::NotRequested | Readiness::TimedOut { .. })
    }
}

/// Everything a caller learns from a completed deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub function: FunctionName,
    pub image: ImageRef,
    pub function_arn: Option<String>,
    pub repository: RepositoryStatus,
    pub push: PushReport,
    pub action: PublishAction,
    pub readiness: Readiness,
}

impl DeployOutcome {
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.readiness, Readiness::Failed { .. })
    }
}
