// ABOUTME: Bounded readiness polling after a function update.
// ABOUTME: Records every attempt instead of only logging failures.

use super::outcome::{PollAttempt, Readiness};
use super::request::ReadinessPolicy;
use crate::platform::{FunctionOps, FunctionStatus};
use crate::types::FunctionName;

/// Query the function status until it is final or the budget runs out.
///
/// Makes at most `policy.max_attempts` queries with `policy.interval`
/// between consecutive ones. A failed query counts as an attempt and the
/// loop carries on.
pub async fn poll_until_ready<F: FunctionOps + ?Sized>(
    functions: &F,
    name: &FunctionName,
    policy: &ReadinessPolicy,
) -> Readiness {
    let mut attempts = Vec::new();

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.interval).await;
        }

        match functions.get_function(name).await {
            Ok(info) => {
                tracing::debug!(function = %name, attempt, status = %info.status, "polled function");
                attempts.push(PollAttempt::Observed(info.status.clone()));
                match info.status {
                    FunctionStatus::Successful => return Readiness::Ready { attempts },
                    FunctionStatus::Failed { reason } => {
                        tracing::warn!(function = %name, ?reason, "function update failed");
                        return Readiness::Failed { reason, attempts };
                    }
                    FunctionStatus::InProgress | FunctionStatus::Unknown(_) => {}
                }
            }
            Err(e) => {
                tracing::warn!(function = %name, attempt, "waiting for function: {}", e);
                attempts.push(PollAttempt::QueryFailed(e.to_string()));
            }
        }
    }

    tracing::warn!(
        function = %name,
        attempts = policy.max_attempts,
        "function readiness polling timed out"
    );
    Readiness::TimedOut { attempts }
}
