// ABOUTME: Shared types used across platform trait definitions.
// ABOUTME: Credentials, build/push reports, function specs and statuses.

use super::registry::RegistryError;
use crate::types::{FunctionName, ImageRef, normalize_registry};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Short-lived registry credentials. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredentials {
    /// Username.
    pub username: String,
    /// Password or token.
    pub password: String,
    /// Registry host without scheme, e.g. `123.dkr.ecr.eu-west-1.amazonaws.com`.
    pub endpoint: String,
}

impl RegistryCredentials {
    /// Decode a base64 `user:password` authorization token.
    pub fn from_token(token: &str, endpoint: &str) -> Result<Self, RegistryError> {
        let decoded = STANDARD
            .decode(token.trim())
            .map_err(|e| RegistryError::MalformedToken(e.to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| RegistryError::MalformedToken("token is not valid UTF-8".to_string()))?;
        let (username, password) = decoded.split_once(':').ok_or_else(|| {
            RegistryError::MalformedToken("expected `user:password`".to_string())
        })?;

        let endpoint = normalize_registry(endpoint);
        if endpoint.is_empty() {
            return Err(RegistryError::MalformedToken(
                "empty registry endpoint".to_string(),
            ));
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Outcome of ensuring a repository exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryStatus {
    Created,
    AlreadyExists,
}

/// Input for an image build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Directory holding the Dockerfile and sources.
    pub context_dir: PathBuf,
    /// Tag to apply to the built image.
    pub tag: ImageRef,
    /// Target platform, e.g. `linux/amd64`.
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of log lines the build emitted.
    pub log_lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Number of progress entries the push emitted.
    pub progress_lines: usize,
}

/// Everything needed to create an image-packaged function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: FunctionName,
    /// Execution role ARN.
    pub role: String,
    pub image: ImageRef,
    pub timeout: Duration,
    /// Memory size in MB.
    pub memory_size: u32,
}

/// Function state as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub arn: Option<String>,
    pub status: FunctionStatus,
}

/// Last-update status of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionStatus {
    Successful,
    InProgress,
    Failed { reason: Option<String> },
    /// Status missing or not recognised.
    Unknown(String),
}

impl fmt::Display for FunctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionStatus::Successful => write!(f, "Successful"),
            FunctionStatus::InProgress => write!(f, "InProgress"),
            FunctionStatus::Failed { reason: Some(r) } => write!(f, "Failed ({r})"),
            FunctionStatus::Failed { reason: None } => write!(f, "Failed"),
            FunctionStatus::Unknown(s) => write!(f, "Unknown ({s})"),
        }
    }
}
