// ABOUTME: Image tag used as the deployment version.
// ABOUTME: Enforces the registry tag grammar so the image reference always parses.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionTagError {
    #[error("version tag cannot be empty")]
    Empty,

    #[error("version tag exceeds maximum length of 128 characters")]
    TooLong,

    #[error("version tag cannot start with '{0}'")]
    InvalidStart(char),

    #[error("invalid character in version tag: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(value: &str) -> Result<Self, VersionTagError> {
        let first = value.chars().next().ok_or(VersionTagError::Empty)?;

        if value.len() > 128 {
            return Err(VersionTagError::TooLong);
        }

        if first == '.' || first == '-' {
            return Err(VersionTagError::InvalidStart(first));
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-'))
        {
            return Err(VersionTagError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn latest() -> Self {
        Self("latest".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VersionTag {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
