//! CLI command implementations
//!
//! Every command except `types` boots the same way:
//! 1. Configuration load
//! 2. Log level applied
//! 3. Configured databases created
//! 4. Bootstrap script replayed (any failed request aborts boot)
//!
//! Protocol responses go to stdout, log lines to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde_json::json;

use crate::api::{ApiHandler, Response};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::store::Catalog;
use crate::types::DataType;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{serve_lines, write_response, ServeStats};

/// Entry point: parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config } => start(config.as_deref()),
        Command::Run { script, config } => run_script(&script, config.as_deref()),
        Command::Types => types(),
    }
}

/// Boot an in-memory catalog from configuration
pub fn boot(config: &Config) -> CliResult<Catalog> {
    Logger::set_min_severity(config.severity()?);
    log_event(Event::BootStart);

    let databases = config.databases.join(",");
    let script = config
        .bootstrap_script
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("bootstrap_script", script.as_str()),
            ("databases", databases.as_str()),
            ("log_level", config.log_level.as_str()),
        ],
    );

    let mut catalog = Catalog::new();
    for name in &config.databases {
        catalog
            .create_database(name)
            .map_err(|e| CliError::config_error(e.to_string()))?;
    }

    if let Some(path) = &config.bootstrap_script {
        let stats = replay_bootstrap(&mut catalog, path)?;
        let requests = stats.handled.to_string();
        log_event_with_fields(Event::ScriptReplayed, &[("requests", requests.as_str())]);
    }

    log_event(Event::BootComplete);
    Ok(catalog)
}

/// Replays a bootstrap script, discarding responses
fn replay_bootstrap(catalog: &mut Catalog, path: &Path) -> CliResult<ServeStats> {
    let input = open_script(path)?;
    let mut handler = ApiHandler::new(catalog);
    let mut first_failure = None;

    let stats = serve_lines(&mut handler, input, &mut io::sink(), |line, response| {
        first_failure = Some(failure_error(line, response));
        false
    })?;

    match first_failure {
        Some(err) => Err(err),
        None => Ok(stats),
    }
}

/// Boot, then serve requests from stdin until EOF
pub fn start(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let mut catalog = boot(&config)?;

    log_event(Event::Serving);
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut catalog, stdin.lock(), &mut stdout.lock())?;

    log_event(Event::ShutdownStart);
    log_event(Event::ShutdownComplete);
    Ok(())
}

/// Serve every request in `input`; failed requests do not stop the loop
pub fn serve<R: BufRead, W: Write>(
    catalog: &mut Catalog,
    input: R,
    output: &mut W,
) -> CliResult<ServeStats> {
    let mut handler = ApiHandler::new(catalog);
    serve_lines(&mut handler, input, output, |_, _| true)
}

/// Boot, then execute a request script writing responses to stdout
pub fn run_script(script: &Path, config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let mut catalog = boot(&config)?;

    let stdout = io::stdout();
    execute_script(&mut catalog, script, &mut stdout.lock())
}

/// Execute every request in `script`.
///
/// All requests run even after a failure; the first failure is
/// reported once the script ends.
pub fn execute_script<W: Write>(
    catalog: &mut Catalog,
    script: &Path,
    output: &mut W,
) -> CliResult<()> {
    let input = open_script(script)?;
    let mut handler = ApiHandler::new(catalog);
    let mut first_failure: Option<CliError> = None;

    serve_lines(&mut handler, input, output, |line, response| {
        if first_failure.is_none() {
            first_failure = Some(failure_error(line, response));
        }
        true
    })?;

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Print the supported data types and their aliases
pub fn types() -> CliResult<()> {
    let stdout = io::stdout();
    write_types(&mut stdout.lock())
}

fn write_types<W: Write>(output: &mut W) -> CliResult<()> {
    let listing: Vec<_> = DataType::ALL
        .iter()
        .map(|t| json!({ "name": t.type_name(), "aliases": t.aliases() }))
        .collect();
    let response = Response::success(json!(listing));
    write_response(output, &response)
}

fn open_script(path: &Path) -> CliResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        CliError::io_error(format!("Failed to open script {}: {}", path.display(), e))
    })
}

fn failure_error(line: usize, response: &Response) -> CliError {
    let (code, message) = match response {
        Response::Error(e) => (e.code.as_str(), e.message.as_str()),
        Response::Success(_) => ("", ""),
    };
    CliError::script_failed(line, code, message)
}
