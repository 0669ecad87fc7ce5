// ABOUTME: Progress events emitted while a deploy runs.
// ABOUTME: Lets callers report each step without re-implementing the sequence.

use super::outcome::PublishAction;
use super::request::ReadinessPolicy;
use crate::types::ImageRef;

/// A step the deployer is about to run, or a notable result of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStep {
    WritingContext,
    Authenticating,
    Building { image: ImageRef },
    EnsuringRepository,
    /// The repository did not exist and was created.
    RepositoryCreated,
    Pushing,
    Publishing,
    Published { action: PublishAction },
    WaitingForReadiness { policy: ReadinessPolicy },
}
