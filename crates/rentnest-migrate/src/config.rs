use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

/// Checked in order; the first non-empty value wins.
pub const DB_PATH_VARS: &[&str] = &["RENTNEST_DB_PATH", "DB_PATH"];
pub const DEFAULT_DB_PATH: &str = "rentnest.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} points at a directory, not a database file")]
    NotAFile(PathBuf),
}

/// Process configuration, resolved once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary variable lookup.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path: PathBuf = DB_PATH_VARS
            .iter()
            .find_map(|key| {
                lookup(key)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .inspect(|value| info!("Database path from {}: {}", key, value))
            })
            .unwrap_or_else(|| {
                info!("No database path configured, using default: {}", DEFAULT_DB_PATH);
                DEFAULT_DB_PATH.to_string()
            })
            .into();

        if db_path.is_dir() {
            return Err(ConfigError::NotAFile(db_path));
        }

        Ok(Self { db_path })
    }
}
