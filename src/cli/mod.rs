//! CLI module for tablestore
//!
//! Provides command-line interface for:
//! - start: Boot and serve JSON requests from stdin
//! - run: Boot and execute a request script
//! - types: List supported attribute data types

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, execute_script, run, run_command, run_script, serve, start, types};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{serve_lines, write_response, ServeStats};
