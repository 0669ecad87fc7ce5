// ABOUTME: Entry point for the lambship CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use lambship::config::{self, Config};
use lambship::error::Result;
use lambship::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, mode).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let output = Output::new(mode);

    match cli.command {
        Commands::Init { function, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, function.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Prepare => {
            let config = load_config(cli.config.as_deref())?;
            commands::prepare(&config, &output)
        }
        Commands::Deploy { version, no_wait } => {
            let config = load_config(cli.config.as_deref())?;
            let config = match version {
                Some(v) => config.with_version(&v)?,
                None => config,
            };
            commands::deploy(config, no_wait, output).await
        }
        Commands::Status => {
            let config = load_config(cli.config.as_deref())?;
            commands::status(&config, &output).await
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}
