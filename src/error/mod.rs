//! Error handling for configuration loading
//!
//! This module provides the error types for assembling, validating and
//! exporting the network configuration.

use crate::config::ConfigIssue;
use std::fmt;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error types for configuration operations
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A required environment variable is not set
    MissingVariable(String),
    /// The dotenv file could not be parsed
    EnvFile(String),
    /// File I/O errors
    Io(String),
    /// Serialization errors while exporting
    Serialization(String),
    /// The assembled configuration failed validation
    Invalid(Vec<ConfigIssue>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => {
                write!(f, "Missing environment variable: {name}")
            }
            ConfigError::EnvFile(msg) => write!(f, "Env file error: {msg}"),
            ConfigError::Io(msg) => write!(f, "I/O error: {msg}"),
            ConfigError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            ConfigError::Invalid(issues) => {
                write!(f, "Invalid configuration: ")?;
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<dotenvy::Error> for ConfigError {
    fn from(err: dotenvy::Error) -> Self {
        match err {
            dotenvy::Error::Io(io) => ConfigError::Io(io.to_string()),
            other => ConfigError::EnvFile(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}
