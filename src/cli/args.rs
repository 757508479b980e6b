//! CLI argument definitions using clap
//!
//! Commands:
//! - tablestore start [--config <path>]
//! - tablestore run <script> [--config <path>]
//! - tablestore types

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tablestore - an in-memory tabular data store
#[derive(Parser, Debug)]
#[command(name = "tablestore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve JSON requests from stdin, one per line, until EOF
    Start {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Execute a file of JSON requests and exit
    Run {
        /// Path to a JSON-lines request script
        script: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List supported attribute data types
    Types,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
