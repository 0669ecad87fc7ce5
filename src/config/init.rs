// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates a lambship.yml template and a starter handler.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FunctionName;

use super::{CONFIG_FILENAME, Config, EnvValue, SourceConfig};

const STARTER_HANDLER: &str = r#"def handler(event, context):
    return {"statusCode": 200, "body": "Hello from Lambda!"}
"#;

/// Write `lambship.yml` (and `handler.py` if missing) into `dir`.
pub fn init_config(dir: &Path, function: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(name) = function {
        config.function =
            FunctionName::new(name).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    std::fs::write(&config_path, generate_template_yaml(&config))?;

    if let SourceConfig::File(source) = &config.source {
        let source_path = dir.join(source);
        if !source_path.exists() {
            std::fs::write(source_path, STARTER_HANDLER)?;
        }
    }

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let source = match &config.source {
        SourceConfig::File(path) => path.display().to_string(),
        SourceConfig::Inline { .. } => "handler.py".to_string(),
    };
    let role_env = match &config.role {
        Some(EnvValue::FromEnv { var, .. }) => var.as_str(),
        _ => "LAMBSHIP_ROLE_ARN",
    };

    format!(
        r#"function: {}
version: "{}"
source: {}
requirements: []
timeout: {}s
memory_size: {}
# Execution role used when the function is created for the first time
role:
  env: {}
# region: eu-west-1
# profile: default
# build:
#   base_image: {}
#   platform: {}
# readiness:
#   max_attempts: {}
#   interval: {}s
"#,
        config.function,
        config.version,
        source,
        config.timeout.as_secs(),
        config.memory_size,
        role_env,
        config.build.base_image,
        config.build.platform,
        config.readiness.max_attempts,
        config.readiness.interval.as_secs(),
    )
}
