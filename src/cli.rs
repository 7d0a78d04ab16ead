// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dwell",
    version = env!("CARGO_PKG_VERSION"),
    about = "Measure how long a view stays visible and scroll-quiescent"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    /// Override the configured dwell duration
    #[arg(short = 'd', long, value_name = "MS", allow_negative_numbers = true)]
    pub duration_ms: Option<i64>,

    #[arg(long, action)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Drive one view interactively from stdin with real timers")]
    Run,

    #[command(about = "Replay a timeline script on a virtual clock")]
    Simulate {
        /// Script file, or `-` for stdin
        script: PathBuf,

        /// Keep the clock running until this time (ms)
        #[arg(long, value_name = "MS")]
        until: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Validate configuration and print the effective values")]
    CheckConfig,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Run => "run",
            Command::Simulate { .. } => "simulate",
            Command::CheckConfig => "check-config",
        }
    }
}
