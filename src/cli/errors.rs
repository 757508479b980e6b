//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, unreadable or invalid
    ConfigError,
    /// I/O error (stdin/stdout/script file)
    IoError,
    /// A scripted request failed
    ScriptFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TAB_CLI_CONFIG_ERROR",
            Self::IoError => "TAB_CLI_IO_ERROR",
            Self::ScriptFailed => "TAB_CLI_SCRIPT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// A request in a script failed
    pub fn script_failed(line: usize, code: &str, message: &str) -> Self {
        Self::new(
            CliErrorCode::ScriptFailed,
            format!("request on line {} failed with {}: {}", line, code, message),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_failure_message() {
        let err = CliError::script_failed(3, "TAB_NOT_FOUND", "database 'x' not found");
        assert_eq!(err.code(), &CliErrorCode::ScriptFailed);
        assert!(err.to_string().starts_with("TAB_CLI_SCRIPT_FAILED: request on line 3"));
    }
}
