//! User settings file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Session-wide settings.
///
/// # TOML Format
///
/// ```toml
/// log_filter = "patchwire=debug"
/// port_radius = 8.0
/// pointer_name = "mouse"
/// ```
///
/// Every field is optional; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Hit radius for ports that do not set their own.
    pub port_radius: f32,
    /// Label of the session's pointer entity.
    pub pointer_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            port_radius: 6.0,
            pointer_name: "pointer".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from `path`, or the defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values no session can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.port_radius.is_finite() && self.port_radius > 0.0) {
            return Err(ConfigError::InvalidSetting {
                key: "port_radius",
                reason: format!("must be a positive number, got {}", self.port_radius),
            });
        }
        Ok(())
    }

    /// Save the settings to a TOML file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
