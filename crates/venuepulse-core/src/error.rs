//! Core error types for venuepulse-core.
//!
//! Crowd prediction itself never fails; these errors come from input
//! validation, configuration files, and venue sources.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venuepulse-core.
///
/// Wrapped errors display as the inner error so `{:#}` chains don't repeat it.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A venue source failed to produce results
    #[error("Venue source '{source_name}' failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML write errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl CoreError {
    /// Build a source error from any displayable cause.
    pub fn source_failed(source_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CoreError::Source {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Value outside its allowed range
    #[error("Value {value} for '{field}' is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
