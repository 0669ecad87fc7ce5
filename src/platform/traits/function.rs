// ABOUTME: Function operations trait for the compute platform.
// ABOUTME: Update code, create a function, and read its configuration.

use super::shared_types::{FunctionInfo, FunctionSpec};
use crate::types::{FunctionName, ImageRef};
use async_trait::async_trait;

#[async_trait]
pub trait FunctionOps: Send + Sync {
    /// Point an existing function at a new image.
    ///
    /// Returns `FunctionError::NotFound` when the function does not exist.
    async fn update_function_code(
        &self,
        name: &FunctionName,
        image: &ImageRef,
    ) -> Result<FunctionInfo, FunctionError>;

    /// Create an image-packaged function.
    ///
    /// Returns `FunctionError::AlreadyExists` when another caller created it
    /// first.
    async fn create_function(&self, spec: &FunctionSpec) -> Result<FunctionInfo, FunctionError>;

    /// Read the current configuration and update status.
    async fn get_function(&self, name: &FunctionName) -> Result<FunctionInfo, FunctionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("function not found: {0}")]
    NotFound(String),

    #[error("function already exists: {0}")]
    AlreadyExists(String),

    #[error("platform error: {0}")]
    Api(String),
}
