// ABOUTME: Image operations trait for container engines.
// ABOUTME: Build an image from a context directory and push it to a registry.

use super::shared_types::{BuildReport, BuildRequest, PushReport, RegistryCredentials};
use crate::types::ImageRef;
use async_trait::async_trait;

/// Image operations: build, push.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Build the context directory into an image tagged `request.tag`.
    async fn build_image(&self, request: &BuildRequest) -> Result<BuildReport, ImageError>;

    /// Push a tagged image. Errors reported inside the progress stream fail
    /// the push.
    async fn push_image(
        &self,
        reference: &ImageRef,
        credentials: &RegistryCredentials,
    ) -> Result<PushReport, ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("cannot read build context: {0}")]
    Context(String),

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("authentication failed for registry: {0}")]
    AuthenticationFailed(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
