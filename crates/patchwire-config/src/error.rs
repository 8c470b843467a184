//! Error types for configuration operations.

use patchwire_core::GraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating or replaying config files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Rack file not found by name or path
    #[error("rack not found: {0}")]
    RackNotFound(String),

    /// Two items of the same kind share a name
    #[error("duplicate {kind} name: {name}")]
    DuplicateName {
        /// What was duplicated (`device`, `port`, `parameter`).
        kind: &'static str,
        /// The repeated name.
        name: String,
    },

    /// A scenario names a port the rack does not have
    #[error("unknown port: {0}")]
    UnknownPort(String),

    /// A port names a parameter its device does not declare
    #[error("unknown parameter '{param}' on device '{device}'")]
    UnknownParam {
        /// Device the port belongs to.
        device: String,
        /// Parameter name that was not declared.
        param: String,
    },

    /// A port definition cannot take part in any connection as written
    #[error("invalid port '{port}': {reason}")]
    InvalidPort {
        /// Qualified port name (`device.port`).
        port: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A settings value is out of range
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Settings key.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The audio graph refused to build the rack
    #[error("audio graph: {0}")]
    Graph(#[from] GraphError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid port error.
    pub fn invalid_port(port: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidPort {
            port: port.into(),
            reason: reason.into(),
        }
    }
}
