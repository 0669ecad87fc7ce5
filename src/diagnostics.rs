// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

use crate::deploy::{PollAttempt, Readiness};

/// Collects non-fatal warnings during deployment operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Record what readiness polling left unresolved.
    pub fn record_readiness(&mut self, function: &str, readiness: &Readiness) {
        let failed_queries = readiness
            .attempts()
            .iter()
            .filter(|a| matches!(a, PollAttempt::QueryFailed(_)))
            .count();
        if failed_queries > 0 {
            self.warn(Warning::status_query(format!(
                "{failed_queries} of {} status queries for {function} failed",
                readiness.queries()
            )));
        }

        match readiness {
            Readiness::TimedOut { attempts } => self.warn(Warning::readiness_unconfirmed(format!(
                "{function} did not report a finished update after {} attempts",
                attempts.len()
            ))),
            Readiness::NotRequested => self.warn(Warning::readiness_unconfirmed(format!(
                "readiness of {function} was not checked"
            ))),
            Readiness::Ready { .. } | Readiness::Failed { .. } => {}
        }
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Deploy finished but the platform never confirmed the update.
    pub fn readiness_unconfirmed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ReadinessUnconfirmed,
            message: message.into(),
        }
    }

    /// Some status queries failed while polling.
    pub fn status_query(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::StatusQuery,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Readiness not requested or polling timed out.
    ReadinessUnconfirmed,
    /// A status query failed and was retried.
    StatusQuery,
}
