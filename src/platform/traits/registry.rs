// ABOUTME: Registry operations trait.
// ABOUTME: Short-lived push credentials and idempotent repository creation.

use super::shared_types::{RegistryCredentials, RepositoryStatus};
use crate::types::FunctionName;
use async_trait::async_trait;

#[async_trait]
pub trait RegistryOps: Send + Sync {
    /// Fetch fresh push credentials for the account's registry.
    async fn authorize(&self) -> Result<RegistryCredentials, RegistryError>;

    /// Create the repository named after the function. An existing
    /// repository is reported as `RepositoryStatus::AlreadyExists`.
    async fn create_repository(&self, name: &FunctionName)
    -> Result<RepositoryStatus, RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("authorization rejected: {0}")]
    AuthorizationRejected(String),

    #[error("malformed authorization token: {0}")]
    MalformedToken(String),

    #[error("failed to create repository {name}: {reason}")]
    RepositoryCreation { name: String, reason: String },
}
