//! Core error types for the Vipon crawler.
//!
//! `ViponError` covers values that fail to parse into the shared types;
//! `ConfigError` covers loading, validating and saving settings.

use thiserror::Error;

/// Error for shared-type construction (product ids, deal links).
#[derive(Error, Debug)]
pub enum ViponError {
    /// Input that does not form a valid id or link
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A required credential was not supplied
    #[error("missing credential: environment variable {var} is not set")]
    MissingCredential {
        /// Environment variable that was expected
        var: String,
    },
}

/// Result type alias using `ViponError`.
pub type Result<T> = std::result::Result<T, ViponError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
