// ABOUTME: Error types for deployment operations.
// ABOUTME: One variant per fatal step, plus a kind for programmatic handling.

use std::path::{Path, PathBuf};

use crate::platform::{FunctionError, ImageError, RegistryError};

/// Errors that abort a deploy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Build context could not be written.
    #[error("failed to write build context {}: {source}", path.display())]
    Context {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Registry credentials could not be obtained.
    #[error("registry authentication failed: {0}")]
    Authentication(String),

    /// Image build failed.
    #[error("image build failed: {0}")]
    Build(String),

    /// Repository creation failed for a reason other than "already exists".
    #[error("repository creation failed: {0}")]
    Repository(String),

    /// Image push failed, including errors reported inside the push stream.
    #[error("image push failed: {0}")]
    Push(String),

    /// Function update or creation failed.
    #[error("failed to publish function: {0}")]
    Publish(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Step at which a deploy failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Context,
    Authentication,
    Build,
    Repository,
    Push,
    Publish,
    Config,
}

impl DeployError {
    pub fn context(path: &Path, source: std::io::Error) -> Self {
        DeployError::Context {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        DeployError::Config(message.into())
    }

    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Context { .. } => DeployErrorKind::Context,
            DeployError::Authentication(_) => DeployErrorKind::Authentication,
            DeployError::Build(_) => DeployErrorKind::Build,
            DeployError::Repository(_) => DeployErrorKind::Repository,
            DeployError::Push(_) => DeployErrorKind::Push,
            DeployError::Publish(_) => DeployErrorKind::Publish,
            DeployError::Config(_) => DeployErrorKind::Config,
        }
    }
}

impl From<RegistryError> for DeployError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::RepositoryCreation { .. } => DeployError::Repository(err.to_string()),
            RegistryError::AuthorizationRejected(_) | RegistryError::MalformedToken(_) => {
                DeployError::Authentication(err.to_string())
            }
        }
    }
}

impl From<FunctionError> for DeployError {
    fn from(err: FunctionError) -> Self {
        DeployError::Publish(err.to_string())
    }
}

/// Extension trait to attribute image errors to the step that raised them.
pub trait ImageErrorExt<T> {
    fn context_build(self) -> Result<T, DeployError>;
    fn context_push(self) -> Result<T, DeployError>;
}

impl<T> ImageErrorExt<T> for Result<T, ImageError> {
    fn context_build(self) -> Result<T, DeployError> {
        self.map_err(|e| DeployError::Build(e.to_string()))
    }

    fn context_push(self) -> Result<T, DeployError> {
        self.map_err(|e| DeployError::Push(e.to_string()))
    }
}
