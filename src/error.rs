// ABOUTME: Application-wide error types for lambship.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::platform::{ConnectError, FunctionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read source {}: {source}", path.display())]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("status query failed: {0}")]
    Status(#[from] FunctionError),

    #[error("function {function} did not become ready: {reason}")]
    NotReady { function: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
