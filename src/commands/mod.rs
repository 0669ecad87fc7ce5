// ABOUTME: Command module aggregator for the lambship CLI.
// ABOUTME: Re-exports deploy, prepare and status command handlers.

mod deploy;
mod prepare;
mod status;

pub use deploy::deploy;
pub use prepare::prepare;
pub use status::status;
