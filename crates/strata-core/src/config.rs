//! Configuration types and parsing for strata.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default project configuration file name
pub const CONFIG_FILE: &str = "strata.yml";

/// Project configuration from strata.yml.
///
/// Every field has a default, and the file itself is optional; flags
/// and environment variables layered on top by the CLI take
/// precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the DuckDB database file (or `:memory:`)
    #[serde(default = "default_database")]
    pub database: String,

    /// Directory containing `*.sql` migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,
}

fn default_database() -> String {
    "strata.duckdb".to_string()
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            migrations_dir: default_migrations_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a strata.yml file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {e}", path.display()),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
