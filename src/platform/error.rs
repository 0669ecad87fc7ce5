// ABOUTME: Connection error types with SNAFU pattern.
// ABOUTME: Covers container engine and AWS configuration setup failures.

use snafu::Snafu;

/// Failure to reach one of the systems a deploy needs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConnectError {
    #[snafu(display("failed to connect to container engine: {source}"))]
    Engine { source: bollard::errors::Error },

    #[snafu(display(
        "no AWS region configured; set `region` in lambship.yml or AWS_REGION"
    ))]
    NoRegion,
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// Docker or Podman socket unreachable.
    Engine,
    /// AWS configuration resolved without a region.
    NoRegion,
}

impl ConnectError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ConnectErrorKind {
        match self {
            ConnectError::Engine { .. } => ConnectErrorKind::Engine,
            ConnectError::NoRegion => ConnectErrorKind::NoRegion,
        }
    }
}
