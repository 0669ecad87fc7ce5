// ABOUTME: Image build settings: base image, target platform, scratch directory.
// ABOUTME: Defaults reproduce the AWS Python 3.8 base image on linux/amd64.

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BASE_IMAGE: &str = "public.ecr.aws/lambda/python:3.8";
pub const DEFAULT_PLATFORM: &str = "linux/amd64";
pub const DEFAULT_SCRATCH_DIR: &str = ".lambship/build";

#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_base_image")]
    pub base_image: String,

    #[serde(default = "default_platform")]
    pub platform: String,

    /// Directory that build contexts are written under. Owned by lambship:
    /// each function's subdirectory is wiped before it is rewritten.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            platform: default_platform(),
            scratch_dir: default_scratch_dir(),
        }
    }
}

fn default_base_image() -> String {
    DEFAULT_BASE_IMAGE.to_string()
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SCRATCH_DIR)
}
