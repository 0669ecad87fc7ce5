// ABOUTME: Bollard-based image builder and pusher.
// ABOUTME: Talks to the local Docker-compatible engine socket.

use crate::platform::error::{ConnectError, EngineSnafu};
use crate::platform::traits::{
    BuildReport, BuildRequest, ImageError, ImageOps, PushReport, RegistryCredentials,
};
use crate::types::ImageRef;
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::query_parameters::{BuildImageOptionsBuilder, PushImageOptionsBuilder};
use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use snafu::ResultExt;
use std::path::Path;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_build_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 400 || *status_code == 500 => {
            ImageError::BuildFailed(format!("{}: {}", image_name, message))
        }
        _ => ImageError::Runtime(format!("failed to build {}: {}", image_name, e)),
    }
}

fn map_push_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 401 || *status_code == 403 => {
            ImageError::AuthenticationFailed(message.clone())
        }
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => {
            ImageError::PushFailed(format!("{}: image not found locally: {}", image_name, message))
        }
        _ => ImageError::PushFailed(format!("{}: {}", image_name, e)),
    }
}

/// Error message embedded in a progress entry, if any.
///
/// The engine answers 200 and reports failures as `error`/`errorDetail`
/// fields inside the JSON stream, so every entry has to be checked.
fn embedded_error<T: Serialize>(entry: &T) -> Option<String> {
    let value = serde_json::to_value(entry).ok()?;
    let detail = value
        .get("errorDetail")
        .and_then(|d| d.get("message"))
        .and_then(|m| m.as_str());
    let error = value.get("error").and_then(|e| e.as_str());
    detail.or(error).map(str::to_string)
}

/// Pack the build context directory into an uncompressed tar archive.
fn tar_context(dir: &Path) -> std::io::Result<Vec<u8>> {
    let mut archive = tar::Builder::new(Vec::new());
    archive.follow_symlinks(true);
    archive.append_dir_all(".", dir)?;
    archive.into_inner()
}

// =============================================================================
// BollardEngine
// =============================================================================

/// Image builder backed by a Docker-compatible engine.
pub struct BollardEngine {
    client: Docker,
}

impl BollardEngine {
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect using `DOCKER_HOST` or the platform's default socket and
    /// check the engine answers.
    pub async fn connect_local() -> Result<Self, ConnectError> {
        let client = Docker::connect_with_local_defaults().context(EngineSnafu)?;
        client.ping().await.context(EngineSnafu)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ImageOps for BollardEngine {
    async fn build_image(&self, request: &BuildRequest) -> Result<BuildReport, ImageError> {
        let image_name = request.tag.to_string();

        let context_dir = request.context_dir.clone();
        let context = tokio::task::spawn_blocking(move || tar_context(&context_dir))
            .await
            .map_err(|e| ImageError::Context(e.to_string()))?
            .map_err(|e| ImageError::Context(format!("{}: {}", request.context_dir.display(), e)))?;

        let options = BuildImageOptionsBuilder::default()
            .dockerfile("Dockerfile")
            .t(&image_name)
            .platform(&request.platform)
            .rm(true)
            .build();

        let mut report = BuildReport::default();
        let mut stream =
            self.client
                .build_image(options, None, Some(bollard::body_full(Bytes::from(context))));

        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| map_build_error(e, &image_name))?;

            if let Some(message) = embedded_error(&info) {
                return Err(ImageError::BuildFailed(format!("{}: {}", image_name, message)));
            }

            if let Some(line) = info.stream.as_deref().map(str::trim_end)
                && !line.is_empty()
            {
                tracing::debug!(target: "lambship::build", "{}", line);
                report.log_lines += 1;
            }
        }

        Ok(report)
    }

    async fn push_image(
        &self,
        reference: &ImageRef,
        credentials: &RegistryCredentials,
    ) -> Result<PushReport, ImageError> {
        let image_name = reference.to_string();
        let tag = reference.tag();

        let options = PushImageOptionsBuilder::default().tag(tag).build();

        let docker_credentials = DockerCredentials {
            username: Some(credentials.username.clone()),
            password: Some(credentials.password.clone()),
            serveraddress: Some(credentials.endpoint.clone()),
            ..Default::default()
        };

        let mut report = PushReport::default();
        let mut stream = self.client.push_image(
            &reference.repository(),
            Some(options),
            Some(docker_credentials),
        );

        while let Some(result) = stream.next().await {
            let info = result.map_err(|e| map_push_error(e, &image_name))?;

            if let Some(message) = embedded_error(&info) {
                return Err(ImageError::PushFailed(format!("{}: {}", image_name, message)));
            }

            if let Some(status) = info.status.as_deref() {
                tracing::debug!(target: "lambship::push", "{}", status);
                report.progress_lines += 1;
            }
        }

        Ok(report)
    }
}
