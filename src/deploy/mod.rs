// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Build context, registry, image, function publish, readiness and progress.

mod context;
mod deployer;
mod deployment;
mod error;
mod outcome;
mod progress;
mod readiness;
mod request;
mod state;
mod transitions;

pub use context::{BuildContext, DOCKERFILE, MANIFEST, dockerfile, manifest, write_build_context};
pub use deployer::Deployer;
pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind, ImageErrorExt};
pub use outcome::{DeployOutcome, PollAttempt, PublishAction, Readiness};
pub use progress::DeployStep;
pub use readiness::poll_until_ready;
pub use request::{DeployerConfig, DeploymentRequest, ReadinessPolicy};
pub use state::{
    Authenticated, ContextWritten, ImageBuilt, ImagePushed, Initialized, Published,
    RepositoryReady,
};
