// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lambship")]
#[command(about = "Build, push and deploy container images to AWS Lambda")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging, including build and push output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file (default: discover lambship.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new lambship.yml configuration file
    Init {
        /// Function name
        #[arg(short, long)]
        function: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Write the build context without building or deploying
    Prepare,

    /// Build, push and publish the function
    Deploy {
        /// Image tag to deploy (overrides config)
        #[arg(long)]
        version: Option<String>,

        /// Do not wait for the function update to finish
        #[arg(long)]
        no_wait: bool,
    },

    /// Show the function's last update status
    Status,
}
