// ABOUTME: Deployment state types for the type state pattern.
// ABOUTME: Each state carries the data produced by the step that reached it.

use super::context::BuildContext;
use super::outcome::PublishAction;
use crate::platform::{BuildReport, FunctionInfo, PushReport, RegistryCredentials, RepositoryStatus};
use crate::types::ImageRef;

/// Initial state: request accepted, nothing written yet.
/// Available actions: `write_context()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Build context written to disk.
/// Available actions: `authenticate()`
#[derive(Debug, Clone)]
pub struct ContextWritten {
    pub(crate) context: BuildContext,
}

/// Registry credentials obtained, image reference composed.
/// Available actions: `build_image()`
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub(crate) context: BuildContext,
    pub(crate) credentials: RegistryCredentials,
    pub(crate) image: ImageRef,
}

/// Image built and tagged locally.
/// Available actions: `ensure_repository()`
#[derive(Debug, Clone)]
pub struct ImageBuilt {
    pub(crate) credentials: RegistryCredentials,
    pub(crate) image: ImageRef,
    pub(crate) build: BuildReport,
}

/// Repository exists in the registry.
/// Available actions: `push_image()`
#[derive(Debug, Clone)]
pub struct RepositoryReady {
    pub(crate) credentials: RegistryCredentials,
    pub(crate) image: ImageRef,
    pub(crate) repository: RepositoryStatus,
}

/// Image pushed to the registry.
/// Available actions: `publish()`
#[derive(Debug, Clone)]
pub struct ImagePushed {
    pub(crate) image: ImageRef,
    pub(crate) repository: RepositoryStatus,
    pub(crate) push: PushReport,
}

/// Function points at the pushed image.
/// Available actions: `wait_until_ready()`, `finish()`
#[derive(Debug, Clone)]
pub struct Published {
    pub(crate) image: ImageRef,
    pub(crate) repository: RepositoryStatus,
    pub(crate) push: PushReport,
    pub(crate) action: PublishAction,
    pub(crate) function: FunctionInfo,
}
