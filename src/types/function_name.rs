// ABOUTME: Validated Lambda function name.
// ABOUTME: Doubles as repository name, build directory name and handler module.

use std::fmt;
use thiserror::Error;

const MAX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunctionNameError {
    #[error("function name cannot be empty")]
    Empty,

    #[error("function name exceeds maximum length of 64 characters")]
    TooLong,

    #[error("function name must start with a letter or digit")]
    InvalidStart,

    #[error("function name must end with a letter or digit")]
    InvalidEnd,

    #[error("function name must be lowercase")]
    NotLowercase,

    #[error("invalid character in function name: '{0}'")]
    InvalidChar(char),
}

/// Name of the deployed function.
///
/// The same string names the ECR repository, the build directory and the
/// Python module holding `handler`, so it has to satisfy all three: lowercase
/// ASCII letters, digits, `-` and `_`, starting and ending alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn new(value: &str) -> Result<Self, FunctionNameError> {
        if value.is_empty() {
            return Err(FunctionNameError::Empty);
        }

        if value.len() > MAX_LEN {
            return Err(FunctionNameError::TooLong);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(FunctionNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '_' {
                return Err(FunctionNameError::InvalidChar(c));
            }
        }

        if value.starts_with(['-', '_']) {
            return Err(FunctionNameError::InvalidStart);
        }

        if value.ends_with(['-', '_']) {
            return Err(FunctionNameError::InvalidEnd);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Handler entrypoint baked into the image, e.g. `my_fn.handler`.
    pub fn handler(&self) -> String {
        format!("{}.handler", self.0)
    }

    /// File name of the generated source module, e.g. `my_fn.py`.
    pub fn source_file(&self) -> String {
        format!("{}.py", self.0)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
