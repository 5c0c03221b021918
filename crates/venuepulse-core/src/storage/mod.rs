mod config;

pub use config::{Config, LocationConfig, SearchConfig, UserConfig};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the directory holding `config.toml`.
///
/// `VENUEPULSE_HOME` wins when set. Otherwise `~/.config/venuepulse[-dev]/`
/// based on VENUEPULSE_ENV (set VENUEPULSE_ENV=dev for the development
/// directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("VENUEPULSE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("VENUEPULSE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("venuepulse-dev")
            } else {
                base_dir.join("venuepulse")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
