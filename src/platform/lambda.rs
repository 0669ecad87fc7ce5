// ABOUTME: AWS Lambda implementation of FunctionOps.
// ABOUTME: Maps SDK errors and status enums onto platform types.

use crate::platform::traits::{
    FunctionError, FunctionInfo, FunctionOps, FunctionSpec, FunctionStatus,
};
use crate::types::{FunctionName, ImageRef};
use async_trait::async_trait;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::{FunctionCode, LastUpdateStatus, PackageType};

/// Map the function's last-update status.
///
/// Readiness follows `LastUpdateStatus` only; the function `State` is not
/// consulted.
fn function_status(
    last_update: Option<&LastUpdateStatus>,
    last_update_reason: Option<&str>,
) -> FunctionStatus {
    match last_update {
        Some(LastUpdateStatus::Successful) => FunctionStatus::Successful,
        Some(LastUpdateStatus::InProgress) => FunctionStatus::InProgress,
        Some(LastUpdateStatus::Failed) => FunctionStatus::Failed {
            reason: last_update_reason.map(str::to_string),
        },
        Some(other) => FunctionStatus::Unknown(other.as_str().to_string()),
        None => FunctionStatus::Unknown("no last update status".to_string()),
    }
}

pub struct LambdaFunctions {
    client: Client,
}

impl LambdaFunctions {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl FunctionOps for LambdaFunctions {
    async fn update_function_code(
        &self,
        name: &FunctionName,
        image: &ImageRef,
    ) -> Result<FunctionInfo, FunctionError> {
        let output = self
            .client
            .update_function_code()
            .function_name(name.as_str())
            .image_uri(image.to_string())
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_resource_not_found_exception() {
                    FunctionError::NotFound(name.to_string())
                } else {
                    FunctionError::Api(DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(FunctionInfo {
            arn: output.function_arn().map(str::to_string),
            status: function_status(
                output.last_update_status(),
                output.last_update_status_reason(),
            ),
        })
    }

    async fn create_function(&self, spec: &FunctionSpec) -> Result<FunctionInfo, FunctionError> {
        let timeout = i32::try_from(spec.timeout.as_secs())
            .map_err(|_| FunctionError::Api(format!("timeout out of range: {:?}", spec.timeout)))?;
        let memory_size = i32::try_from(spec.memory_size).map_err(|_| {
            FunctionError::Api(format!("memory size out of range: {}", spec.memory_size))
        })?;

        let output = self
            .client
            .create_function()
            .function_name(spec.name.as_str())
            .role(&spec.role)
            .code(FunctionCode::builder().image_uri(spec.image.to_string()).build())
            .package_type(PackageType::Image)
            .timeout(timeout)
            .memory_size(memory_size)
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_resource_conflict_exception() {
                    FunctionError::AlreadyExists(spec.name.to_string())
                } else {
                    FunctionError::Api(DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(FunctionInfo {
            arn: output.function_arn().map(str::to_string),
            status: function_status(
                output.last_update_status(),
                output.last_update_status_reason(),
            ),
        })
    }

    async fn get_function(&self, name: &FunctionName) -> Result<FunctionInfo, FunctionError> {
        let output = self
            .client
            .get_function()
            .function_name(name.as_str())
            .send()
            .await
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_resource_not_found_exception() {
                    FunctionError::NotFound(name.to_string())
                } else {
                    FunctionError::Api(DisplayErrorContext(&err).to_string())
                }
            })?;

        let Some(configuration) = output.configuration() else {
            return Ok(FunctionInfo {
                arn: None,
                status: FunctionStatus::Unknown("no configuration returned".to_string()),
            });
        };

        Ok(FunctionInfo {
            arn: configuration.function_arn().map(str::to_string),
            status: function_status(
                configuration.last_update_status(),
                configuration.last_update_status_reason(),
            ),
        })
    }
}
