// ABOUTME: Library entry point running the whole deploy sequence.
// ABOUTME: Owns its configuration and the three platform clients.

use super::Deployment;
use super::context::{BuildContext, write_build_context};
use super::error::DeployError;
use super::outcome::DeployOutcome;
use super::progress::DeployStep;
use super::request::{DeployerConfig, DeploymentRequest, ReadinessPolicy};
use crate::platform::{FunctionOps, ImageOps, RegistryOps, RepositoryStatus};

/// Packages, pushes and publishes functions.
pub struct Deployer<I, R, F> {
    config: DeployerConfig,
    images: I,
    registry: R,
    functions: F,
}

impl<I, R, F> Deployer<I, R, F>
where
    I: ImageOps,
    R: RegistryOps,
    F: FunctionOps,
{
    pub fn new(config: DeployerConfig, images: I, registry: R, functions: F) -> Self {
        Self {
            config,
            images,
            registry,
            functions,
        }
    }

    pub fn config(&self) -> &DeployerConfig {
        &self.config
    }

    pub fn images(&self) -> &I {
        &self.images
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn functions(&self) -> &F {
        &self.functions
    }

    /// Write the build context without touching any remote system.
    pub fn prepare(&self, request: &DeploymentRequest) -> Result<BuildContext, DeployError> {
        write_build_context(&self.config.scratch_root, &self.config.base_image, request)
    }

    /// Run the full sequence. With a policy, poll for readiness afterwards.
    pub async fn deploy(
        &self,
        request: &DeploymentRequest,
        readiness: Option<&ReadinessPolicy>,
    ) -> Result<DeployOutcome, DeployError> {
        self.deploy_with_progress(request, readiness, |_| {}).await
    }

    /// Run the full sequence, reporting each step to `progress`.
    pub async fn deploy_with_progress<P>(
        &self,
        request: &DeploymentRequest,
        readiness: Option<&ReadinessPolicy>,
        mut progress: P,
    ) -> Result<DeployOutcome, DeployError>
    where
        P: FnMut(DeployStep),
    {
        progress(DeployStep::WritingContext);
        let deployment = Deployment::new(self.config.clone(), request.clone()).write_context()?;

        progress(DeployStep::Authenticating);
        let deployment = deployment.authenticate(&self.registry).await?;

        progress(DeployStep::Building {
            image: deployment.image().clone(),
        });
        let deployment = deployment.build_image(&self.images).await?;

        progress(DeployStep::EnsuringRepository);
        let deployment = deployment.ensure_repository(&self.registry).await?;
        if deployment.repository_status() == RepositoryStatus::Created {
            progress(DeployStep::RepositoryCreated);
        }

        progress(DeployStep::Pushing);
        let deployment = deployment.push_image(&self.images).await?;

        progress(DeployStep::Publishing);
        let published = deployment.publish(&self.functions).await?;
        progress(DeployStep::Published {
            action: published.action(),
        });

        Ok(match readiness {
            Some(policy) => {
                progress(DeployStep::WaitingForReadiness { policy: *policy });
                published.wait_until_ready(&self.functions, policy).await
            }
            None => published.finish(),
        })
    }

    /// Run the full sequence, polling with `policy`, and call `on_ready`
    /// once if and only if the platform confirms the update.
    pub async fn deploy_with_callback<C>(
        &self,
        request: &DeploymentRequest,
        policy: &ReadinessPolicy,
        on_ready: C,
    ) -> Result<DeployOutcome, DeployError>
    where
        C: FnOnce(),
    {
        let outcome = self.deploy(request, Some(policy)).await?;
        if outcome.is_ready() {
            on_ready();
        }
        Ok(outcome)
    }
}
