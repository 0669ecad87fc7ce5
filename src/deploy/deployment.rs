// ABOUTME: Generic deployment struct parameterized by state.
// ABOUTME: State types carry their own data for compile-time guarantees.

use super::context::BuildContext;
use super::outcome::PublishAction;
use super::request::{DeployerConfig, DeploymentRequest};
use super::state::{
    Authenticated, ContextWritten, ImageBuilt, ImagePushed, Initialized, Published,
    RepositoryReady,
};
use crate::platform::{BuildReport, PushReport, RepositoryStatus};
use crate::types::{FunctionName, ImageRef};

/// A deployment in progress, parameterized by its current state.
///
/// Each step consumes the deployment and returns it in the next state, so
/// the sequence context → credentials → build → repository → push →
/// publish cannot be reordered or skipped.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) config: DeployerConfig,
    pub(crate) request: DeploymentRequest,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    pub fn new(config: DeployerConfig, request: DeploymentRequest) -> Self {
        Deployment {
            config,
            request,
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn function(&self) -> &FunctionName {
        self.request.function()
    }

    pub fn request(&self) -> &DeploymentRequest {
        &self.request
    }

    pub fn config(&self) -> &DeployerConfig {
        &self.config
    }
}

impl Deployment<ContextWritten> {
    pub fn build_context(&self) -> &BuildContext {
        &self.state.context
    }
}

impl Deployment<Authenticated> {
    /// Reference the image will be built and pushed under.
    pub fn image(&self) -> &ImageRef {
        &self.state.image
    }

    pub fn registry(&self) -> &str {
        &self.state.credentials.endpoint
    }
}

impl Deployment<ImageBuilt> {
    pub fn image(&self) -> &ImageRef {
        &self.state.image
    }

    pub fn build_report(&self) -> &BuildReport {
        &self.state.build
    }
}

impl Deployment<RepositoryReady> {
    pub fn image(&self) -> &ImageRef {
        &self.state.image
    }

    pub fn repository_status(&self) -> RepositoryStatus {
        self.state.repository
    }
}

impl Deployment<ImagePushed> {
    pub fn image(&self) -> &ImageRef {
        &self.state.image
    }

    pub fn push_report(&self) -> &PushReport {
        &self.state.push
    }
}

impl Deployment<Published> {
    pub fn image(&self) -> &ImageRef {
        &self.state.image
    }

    pub fn action(&self) -> PublishAction {
        self.state.action
    }

    pub fn function_arn(&self) -> Option<&str> {
        self.state.function.arn.as_deref()
    }
}
