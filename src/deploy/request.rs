// ABOUTME: Inputs to a deploy: the per-call request and deployer settings.
// ABOUTME: Requests are immutable once built; settings come from config.

use crate::config::{DEFAULT_BASE_IMAGE, DEFAULT_PLATFORM};
use crate::types::{FunctionName, VersionTag};
use std::path::PathBuf;
use std::time::Duration;

/// One function deployment, built once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    function: FunctionName,
    code: String,
    requirements: Vec<String>,
    version: VersionTag,
    timeout: Duration,
    memory_size: u32,
}

impl DeploymentRequest {
    /// Request with no dependencies, version `latest`, 60s timeout and 1024 MB.
    pub fn new(function: FunctionName, code: impl Into<String>) -> Self {
        Self {
            function,
            code: code.into(),
            requirements: Vec::new(),
            version: VersionTag::latest(),
            timeout: Duration::from_secs(60),
            memory_size: 1024,
        }
    }

    pub fn requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn version(mut self, version: VersionTag) -> Self {
        self.version = version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn memory_size(mut self, memory_size: u32) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn function(&self) -> &FunctionName {
        &self.function
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn dependency_specifiers(&self) -> &[String] {
        &self.requirements
    }

    pub fn version_tag(&self) -> &VersionTag {
        &self.version
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    pub fn memory_size_mb(&self) -> u32 {
        self.memory_size
    }
}

/// Settings a deployer is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployerConfig {
    /// Execution role ARN. Only needed when the function has to be created.
    pub role: Option<String>,
    pub base_image: String,
    pub platform: String,
    /// Build contexts are written to `scratch_root/{function}`.
    pub scratch_root: PathBuf,
}

impl DeployerConfig {
    pub fn new(scratch_root: impl Into<PathBuf>) -> Self {
        Self {
            role: None,
            base_image: DEFAULT_BASE_IMAGE.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            scratch_root: scratch_root.into(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Bounded, fixed-interval readiness polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Maximum number of status queries.
    pub max_attempts: u32,
    /// Delay between consecutive queries.
    pub interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_secs(10),
        }
    }
}
