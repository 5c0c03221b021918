//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Home location used for nearby searches
//! - Search radius and sport filter
//! - Prediction seed
//! - Role and preferred sport
//!
//! Configuration is stored at `~/.config/venuepulse/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::context::{UserContext, UserRole};
use crate::error::{ConfigError, Result, ValidationError};
use crate::geo::Coordinates;
use crate::predict::PredictorConfig;
use crate::venue::NearbyQuery;

/// Default search origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

/// Nearby search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_radius_miles")]
    pub radius_miles: f64,
    #[serde(default)]
    pub sport: Option<String>,
}

/// Persona settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub sport: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/venuepulse/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// JSON venue file; the built-in fallback list is used when unset.
    #[serde(default)]
    pub venues_file: Option<String>,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub prediction: PredictorConfig,
    #[serde(default)]
    pub user: UserConfig,
}

// Default functions
fn default_latitude() -> f64 {
    47.6062
}
fn default_longitude() -> f64 {
    -122.3321
}
fn default_radius_miles() -> f64 {
    10.0
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_miles: default_radius_miles(),
            sport: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// With `numeric_optionals`, numeric text for an unset optional is stored
    /// as a number; otherwise it is stored as a string.
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
        numeric_optionals: bool,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let not_a_number = || invalid(format!("cannot parse '{value}' as number"));

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(not_a_number)?
                        } else {
                            return Err(not_a_number());
                        }
                    }
                    // Blank clears; an unset optional has no type to go by
                    serde_json::Value::Null | serde_json::Value::String(_)
                        if existing.is_null() || value.is_empty() =>
                    {
                        let number = value.parse::<u64>().ok().filter(|_| numeric_optionals);
                        if value.is_empty() {
                            serde_json::Value::Null
                        } else if let Some(n) = number {
                            serde_json::Value::Number(n.into())
                        } else {
                            serde_json::Value::String(value.into())
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unavailable.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        Ok(cfg)
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let updated = |numeric_optionals: bool| -> Result<Self> {
            let mut json = serde_json::to_value(&*self)?;
            Self::set_json_value_by_path(&mut json, key, value, numeric_optionals)?;
            serde_json::from_value(json).map_err(|e| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
        };

        // Numeric text for an unset optional may be a number or a string field
        let cfg = match updated(true) {
            Ok(cfg) => cfg,
            Err(first) => updated(false).map_err(|_| first)?,
        };
        *self = cfg;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Configured home location.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored coordinates are out of range.
    pub fn location(&self) -> Result<Coordinates, ValidationError> {
        Coordinates::new(self.location.latitude, self.location.longitude)
    }

    /// User context built from the `user` and `location` sections.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored coordinates are out of range.
    pub fn user_context(&self) -> Result<UserContext, ValidationError> {
        Ok(self.user_context_at(self.location()?))
    }

    /// User context from the `user` section, placed at `location`.
    pub fn user_context_at(&self, location: Coordinates) -> UserContext {
        let ctx = UserContext::new(self.user.role).with_location(location);
        match &self.user.sport {
            Some(sport) => ctx.with_sport(sport),
            None => ctx,
        }
    }

    /// Nearby query around the configured location.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the stored coordinates are out of range.
    pub fn nearby_query(&self) -> Result<NearbyQuery, ValidationError> {
        Ok(self.nearby_query_at(self.location()?))
    }

    /// Nearby query around `origin`; the search sport overrides the user's.
    pub fn nearby_query_at(&self, origin: Coordinates) -> NearbyQuery {
        let ctx = self.user_context_at(origin);
        let sport = self.search.sport.clone().or(ctx.preferred_sport);
        NearbyQuery::new(origin, self.search.radius_miles).with_sport(sport)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load config, using defaults");
            Self::default()
        })
    }
}
