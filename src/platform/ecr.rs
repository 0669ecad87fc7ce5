// ABOUTME: Amazon ECR implementation of RegistryOps.
// ABOUTME: Fetches push credentials and creates per-function repositories.

use crate::platform::traits::{RegistryCredentials, RegistryError, RegistryOps, RepositoryStatus};
use crate::types::FunctionName;
use async_trait::async_trait;
use aws_sdk_ecr::Client;
use aws_sdk_ecr::error::DisplayErrorContext;

pub struct EcrRegistry {
    client: Client,
}

impl EcrRegistry {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl RegistryOps for EcrRegistry {
    async fn authorize(&self) -> Result<RegistryCredentials, RegistryError> {
        let output = self
            .client
            .get_authorization_token()
            .send()
            .await
            .map_err(|e| RegistryError::AuthorizationRejected(DisplayErrorContext(&e).to_string()))?;

        let data = output.authorization_data().first().ok_or_else(|| {
            RegistryError::AuthorizationRejected("no authorization data returned".to_string())
        })?;
        let token = data
            .authorization_token()
            .ok_or_else(|| RegistryError::MalformedToken("token missing".to_string()))?;
        let endpoint = data
            .proxy_endpoint()
            .ok_or_else(|| RegistryError::MalformedToken("proxy endpoint missing".to_string()))?;

        RegistryCredentials::from_token(token, endpoint)
    }

    async fn create_repository(
        &self,
        name: &FunctionName,
    ) -> Result<RepositoryStatus, RegistryError> {
        match self
            .client
            .create_repository()
            .repository_name(name.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(RepositoryStatus::Created),
            Err(e) => {
                let err = e.into_service_error();
                if err.is_repository_already_exists_exception() {
                    Ok(RepositoryStatus::AlreadyExists)
                } else {
                    Err(RegistryError::RepositoryCreation {
                        name: name.to_string(),
                        reason: DisplayErrorContext(&err).to_string(),
                    })
                }
            }
        }
    }
}
