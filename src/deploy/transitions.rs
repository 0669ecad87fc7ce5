// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::platform::{
    BuildRequest, FunctionError, FunctionOps, FunctionSpec, ImageOps, RegistryOps,
    RepositoryStatus,
};
use crate::types::ImageRef;

use super::Deployment;
use super::context::write_build_context;
use super::error::{DeployError, ImageErrorExt};
use super::outcome::{DeployOutcome, PublishAction, Readiness};
use super::readiness::poll_until_ready;
use super::request::ReadinessPolicy;
use super::state::{
    Authenticated, ContextWritten, ImageBuilt, ImagePushed, Initialized, Published,
    RepositoryReady,
};

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Deployment<S> {
    /// Internal helper to move into the next state.
    fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            config: self.config,
            request: self.request,
            state,
        }
    }
}

// =============================================================================
// Initialized -> ContextWritten -> Authenticated
// =============================================================================

impl Deployment<Initialized> {
    /// Write the Dockerfile, source module and manifest to the scratch directory.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Context` if the directory cannot be created or written.
    #[must_use = "deployment state must be used"]
    pub fn write_context(self) -> Result<Deployment<ContextWritten>, DeployError> {
        let context =
            write_build_context(&self.config.scratch_root, &self.config.base_image, &self.request)?;
        tracing::info!(function = %self.function(), dir = %context.dir().display(), "build context ready");
        Ok(self.transition(ContextWritten { context }))
    }
}

impl Deployment<ContextWritten> {
    /// Obtain short-lived registry credentials and compose the image reference.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Authentication` if the token request is rejected
    /// or the token cannot be decoded.
    #[must_use = "deployment state must be used"]
    pub async fn authenticate<R: RegistryOps + ?Sized>(
        self,
        registry: &R,
    ) -> Result<Deployment<Authenticated>, DeployError> {
        let credentials = registry.authorize().await?;
        let image = ImageRef::for_function(
            &credentials.endpoint,
            self.request.function(),
            self.request.version_tag(),
        );
        tracing::info!(registry = %credentials.endpoint, %image, "authenticated to registry");

        let context = self.state.context.clone();
        Ok(self.transition(Authenticated {
            context,
            credentials,
            image,
        }))
    }
}

// =============================================================================
// Authenticated -> ImageBuilt -> RepositoryReady -> ImagePushed
// =============================================================================

impl Deployment<Authenticated> {
    /// Build the platform-pinned image from the build context.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Build` on any build failure.
    #[must_use = "deployment state must be used"]
    pub async fn build_image<I: ImageOps + ?Sized>(
        self,
        images: &I,
    ) -> Result<Deployment<ImageBuilt>, DeployError> {
        let request = BuildRequest {
            context_dir: self.state.context.dir().to_path_buf(),
            tag: self.state.image.clone(),
            platform: self.config.platform.clone(),
        };
        let build = images.build_image(&request).await.context_build()?;
        tracing::info!(image = %self.state.image, platform = %request.platform, "image built");

        let Authenticated {
            credentials, image, ..
        } = self.state.clone();
        Ok(self.transition(ImageBuilt {
            credentials,
            image,
            build,
        }))
    }
}

impl Deployment<ImageBuilt> {
    /// Create the repository named after the function if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Repository` for any failure other than
    /// "already exists".
    #[must_use = "deployment state must be used"]
    pub async fn ensure_repository<R: RegistryOps + ?Sized>(
        self,
        registry: &R,
    ) -> Result<Deployment<RepositoryReady>, DeployError> {
        let repository = registry.create_repository(self.request.function()).await?;
        match repository {
            RepositoryStatus::Created => {
                tracing::info!(repository = %self.function(), "repository created")
            }
            RepositoryStatus::AlreadyExists => {
                tracing::info!(repository = %self.function(), "repository already exists")
            }
        }

        let ImageBuilt {
            credentials, image, ..
        } = self.state.clone();
        Ok(self.transition(RepositoryReady {
            credentials,
            image,
            repository,
        }))
    }
}

impl Deployment<RepositoryReady> {
    /// Push the tagged image with the registry credentials.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Push` if the push fails, including failures the
    /// engine reports inside the progress stream.
    #[must_use = "deployment state must be used"]
    pub async fn push_image<I: ImageOps + ?Sized>(
        self,
        images: &I,
    ) -> Result<Deployment<ImagePushed>, DeployError> {
        let push = images
            .push_image(&self.state.image, &self.state.credentials)
            .await
            .context_push()?;
        tracing::info!(image = %self.state.image, "image pushed");

        let image = self.state.image.clone();
        let repository = self.state.repository;
        Ok(self.transition(ImagePushed {
            image,
            repository,
            push,
        }))
    }
}

// =============================================================================
// ImagePushed -> Published
// =============================================================================

impl Deployment<ImagePushed> {
    /// Point the function at the pushed image, creating it if needed.
    ///
    /// A created function gets the request's timeout and memory size.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Publish` if the update fails for any reason
    /// other than "not found", or if creation fails. Returns
    /// `DeployError::Config` when creation is needed but no role is set.
    #[must_use = "deployment state must be used"]
    pub async fn publish<F: FunctionOps + ?Sized>(
        self,
        functions: &F,
    ) -> Result<Deployment<Published>, DeployError> {
        let name = self.request.function();
        let image = &self.state.image;

        let (action, function) = match functions.update_function_code(name, image).await {
            Ok(info) => (PublishAction::Updated, info),
            Err(FunctionError::NotFound(_)) => {
                tracing::info!(function = %name, "function not found, creating it");
                let spec = self.function_spec()?;
                match functions.create_function(&spec).await {
                    Ok(info) => (PublishAction::Created, info),
                    // Another caller created it between our update and create.
                    Err(FunctionError::AlreadyExists(_)) => {
                        (PublishAction::Updated, functions.update_function_code(name, image).await?)
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        };
        tracing::info!(function = %name, %action, status = %function.status, "function published");

        let ImagePushed {
            image,
            repository,
            push,
        } = self.state.clone();
        Ok(self.transition(Published {
            image,
            repository,
            push,
            action,
            function,
        }))
    }

    fn function_spec(&self) -> Result<FunctionSpec, DeployError> {
        let role = self.config.role.clone().ok_or_else(|| {
            DeployError::config_error(format!(
                "function {} does not exist and no execution role is configured",
                self.function()
            ))
        })?;

        Ok(FunctionSpec {
            name: self.request.function().clone(),
            role,
            image: self.state.image.clone(),
            timeout: self.request.timeout_duration(),
            memory_size: self.request.memory_size_mb(),
        })
    }
}

// =============================================================================
// Published -> DeployOutcome
// =============================================================================

impl Deployment<Published> {
    /// Poll until the platform reports the update as finished.
    ///
    /// Readiness is part of the outcome rather than an error: a timed out
    /// or failed update still leaves the function pointing at the new image.
    pub async fn wait_until_ready<F: FunctionOps + ?Sized>(
        self,
        functions: &F,
        policy: &ReadinessPolicy,
    ) -> DeployOutcome {
        let readiness = poll_until_ready(functions, self.request.function(), policy).await;
        self.into_outcome(readiness)
    }

    /// Finish without confirming readiness.
    pub fn finish(self) -> DeployOutcome {
        self.into_outcome(Readiness::NotRequested)
    }

    fn into_outcome(self, readiness: Readiness) -> DeployOutcome {
        let Published {
            image,
            repository,
            push,
            action,
            function,
        } = self.state;

        DeployOutcome {
            function: self.request.function().clone(),
            image,
            function_arn: function.arn,
            repository,
            push,
            action,
            readiness,
        }
    }
}
