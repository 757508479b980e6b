//! Configuration file
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "databases": ["shop"],
//!   "bootstrap_script": "seed.jsonl"
//! }
//! ```
//!
//! Every field is optional. A relative `bootstrap_script` is resolved
//! against the directory holding the config file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity: trace, info, warn or error (default info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Databases created empty at boot
    #[serde(default)]
    pub databases: Vec<String>,

    /// JSON-lines request script replayed at boot
    #[serde(default)]
    pub bootstrap_script: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            databases: Vec::new(),
            bootstrap_script: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let Some(script) = config.bootstrap_script.take() {
            let resolved = match path.parent() {
                Some(dir) if script.is_relative() => dir.join(script),
                _ => script,
            };
            config.bootstrap_script = Some(resolved);
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        let mut seen = HashSet::new();
        for name in &self.databases {
            if name.is_empty() {
                return Err(CliError::config_error("database names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(CliError::config_error(format!(
                    "database '{}' listed more than once",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(CliError::config_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("tablestore.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"log_level":"warn","databases":["shop","archive"],"bootstrap_script":"seed.jsonl"}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert_eq!(config.databases, vec!["shop", "archive"]);
        assert_eq!(config.bootstrap_script, Some(dir.path().join("seed.jsonl")));
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"log_level":"loud"}"#);
        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "TAB_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_duplicate_database_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"databases":["shop","shop"]}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
