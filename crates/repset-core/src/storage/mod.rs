mod config;
pub mod database;

pub use config::{Config, DefaultsConfig, NotificationsConfig, UiConfig};
pub use database::{CompletionRow, Database, Stats};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/repset[-dev]/` based on REPSET_ENV.
///
/// Set REPSET_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REPSET_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("repset-dev")
    } else {
        base_dir.join("repset")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
