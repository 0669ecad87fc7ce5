// ABOUTME: Library root for lambship - exposes the deployer and its building blocks.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod platform;
pub mod types;
