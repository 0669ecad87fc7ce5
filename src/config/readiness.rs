// ABOUTME: Readiness polling settings.
// ABOUTME: Bounded attempt count and fixed interval between status queries.

use crate::deploy::ReadinessPolicy;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    /// Poll after publishing. `deploy --no-wait` overrides this.
    #[serde(default = "default_wait")]
    pub wait: bool,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            wait: default_wait(),
            max_attempts: default_max_attempts(),
            interval: default_interval(),
        }
    }
}

impl ReadinessConfig {
    /// Polling policy, or `None` when waiting is disabled.
    pub fn policy(&self) -> Option<ReadinessPolicy> {
        self.wait.then(|| ReadinessPolicy {
            max_attempts: self.max_attempts,
            interval: self.interval,
        })
    }
}

fn default_wait() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    ReadinessPolicy::default().max_attempts
}

fn default_interval() -> Duration {
    ReadinessPolicy::default().interval
}
