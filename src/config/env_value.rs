// ABOUTME: Config values that may be read from the environment.
// ABOUTME: Keeps account-specific settings such as the role ARN out of the file.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Either a literal value or `{ env: VAR, default: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Resolve the value. An empty environment variable counts as unset.
    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => std::env::var(var)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(var.clone())),
        }
    }
}
