// ABOUTME: Configuration types and parsing for lambship.yml.
// ABOUTME: Handles YAML parsing, env var interpolation and request assembly.

mod build;
mod deserialize;
mod env_value;
mod init;
mod readiness;

pub use build::{BuildConfig, DEFAULT_BASE_IMAGE, DEFAULT_PLATFORM, DEFAULT_SCRATCH_DIR};
pub use env_value::EnvValue;
pub use init::init_config;
pub use readiness::ReadinessConfig;

use crate::deploy::{DeployerConfig, DeploymentRequest};
use crate::error::{Error, Result};
use crate::types::{FunctionName, VersionTag};
use deserialize::{deserialize_function_name, deserialize_version};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "lambship.yml";
pub const CONFIG_FILENAME_ALT: &str = "lambship.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".lambship/config.yml";

/// Lambda accepts timeouts from 1 second to 15 minutes.
const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=900;
/// Lambda accepts memory sizes from 128 MB to 10240 MB.
const MEMORY_RANGE_MB: std::ops::RangeInclusive<u32> = 128..=10240;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_function_name")]
    pub function: FunctionName,

    #[serde(default, deserialize_with = "deserialize_version")]
    pub version: VersionTag,

    pub source: SourceConfig,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_memory_size")]
    pub memory_size: u32,

    /// Execution role ARN, needed when the function has to be created.
    #[serde(default)]
    pub role: Option<EnvValue>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub readiness: ReadinessConfig,

    /// Directory relative paths resolve against; set by `load`.
    #[serde(skip)]
    base_dir: PathBuf,
}

/// Where the function's source code comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceConfig {
    File(PathBuf),
    Inline { inline: String },
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_memory_size() -> u32 {
    1024
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.base_dir = config_root(path);
        Ok(config)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Override the version tag from the command line.
    pub fn with_version(mut self, version: &str) -> Result<Self> {
        self.version = VersionTag::new(version).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(self)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute-or-relative-to-config scratch directory.
    pub fn scratch_root(&self) -> PathBuf {
        self.base_dir.join(&self.build.scratch_dir)
    }

    pub fn source_code(&self) -> Result<String> {
        match &self.source {
            SourceConfig::Inline { inline } => Ok(inline.clone()),
            SourceConfig::File(path) => {
                let path = self.base_dir.join(path);
                std::fs::read_to_string(&path).map_err(|e| Error::Source { path, source: e })
            }
        }
    }

    /// Assemble the immutable request for one deploy.
    pub fn request(&self) -> Result<DeploymentRequest> {
        if !TIMEOUT_RANGE_SECS.contains(&self.timeout.as_secs()) || self.timeout.subsec_nanos() != 0
        {
            return Err(Error::InvalidConfig(format!(
                "timeout must be a whole number of seconds between 1s and 900s, got {:?}",
                self.timeout
            )));
        }

        if !MEMORY_RANGE_MB.contains(&self.memory_size) {
            return Err(Error::InvalidConfig(format!(
                "memory_size must be between 128 and 10240 MB, got {}",
                self.memory_size
            )));
        }

        if self.readiness.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "readiness.max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(DeploymentRequest::new(self.function.clone(), self.source_code()?)
            .requirements(self.requirements.clone())
            .version(self.version.clone())
            .timeout(self.timeout)
            .memory_size(self.memory_size))
    }

    /// Settings the deployer is constructed with.
    pub fn deployer_config(&self) -> Result<DeployerConfig> {
        let role = match self.role.as_ref().map(EnvValue::resolve).transpose() {
            Ok(role) => role,
            // Only creating a function needs the role; updates go ahead without it.
            Err(Error::MissingEnvVar(var)) => {
                tracing::debug!(var = %var, "execution role not set");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(DeployerConfig {
            role,
            base_image: self.build.base_image.clone(),
            platform: self.build.platform.clone(),
            scratch_root: self.scratch_root(),
        })
    }

    pub fn template() -> Self {
        Config {
            function: FunctionName::new("my_lambda_function")
                .expect("template function name is valid"),
            version: VersionTag::latest(),
            source: SourceConfig::File(PathBuf::from("handler.py")),
            requirements: Vec::new(),
            timeout: default_timeout(),
            memory_size: default_memory_size(),
            role: Some(EnvValue::FromEnv {
                var: "LAMBSHIP_ROLE_ARN".to_string(),
                default: None,
            }),
            region: None,
            profile: None,
            build: BuildConfig::default(),
            readiness: ReadinessConfig::default(),
            base_dir: PathBuf::new(),
        }
    }
}

/// Project directory a config file belongs to.
///
/// `.lambship/config.yml` belongs to the directory containing `.lambship`.
fn config_root(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new(""));
    if parent.file_name().is_some_and(|n| n == ".lambship") {
        parent.parent().unwrap_or(Path::new("")).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}
