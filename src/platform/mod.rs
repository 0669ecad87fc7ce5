// ABOUTME: External systems a deploy talks to: container engine, registry, compute.
// ABOUTME: Capability traits plus bollard, ECR and Lambda implementations.

mod bollard;
mod ecr;
mod error;
mod lambda;
pub mod traits;

pub use self::bollard::BollardEngine;
pub use ecr::EcrRegistry;
pub use error::{ConnectError, ConnectErrorKind};
pub use lambda::LambdaFunctions;
pub use traits::*;

use aws_config::{BehaviorVersion, Region};

/// Where to find AWS credentials and region.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// Connected clients for one deploy.
pub struct Platform {
    pub images: BollardEngine,
    pub registry: EcrRegistry,
    pub functions: LambdaFunctions,
}

/// Load AWS configuration through the standard resolution chain (env,
/// profile, instance metadata) and connect to the local engine.
pub async fn connect(options: &ConnectOptions) -> Result<Platform, ConnectError> {
    let sdk_config = load_aws_config(options).await?;

    Ok(Platform {
        images: BollardEngine::connect_local().await?,
        registry: EcrRegistry::from_conf(&sdk_config),
        functions: LambdaFunctions::from_conf(&sdk_config),
    })
}

/// Connect only the compute platform client, for status queries.
pub async fn connect_functions(options: &ConnectOptions) -> Result<LambdaFunctions, ConnectError> {
    let sdk_config = load_aws_config(options).await?;
    Ok(LambdaFunctions::from_conf(&sdk_config))
}

async fn load_aws_config(options: &ConnectOptions) -> Result<aws_config::SdkConfig, ConnectError> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &options.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &options.profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    if sdk_config.region().is_none() {
        return error::NoRegionSnafu.fail();
    }

    tracing::debug!(region = ?sdk_config.region(), "loaded AWS configuration");
    Ok(sdk_config)
}
