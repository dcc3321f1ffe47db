//! Error types for settings parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::filter::PatternError;

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    FileRead {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML settings.
    #[error("Failed to parse TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write the settings file (for init command).
    #[error("Failed to write settings file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or settings file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid output format.
    #[error("Invalid output format '{value}': expected text or json")]
    InvalidFormat {
        /// The invalid value provided
        value: String,
    },

    /// Invalid peer filter pattern.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}

/// Well-known field names for `MissingRequired` errors.
pub mod field {
    /// The WireGuard configuration file path.
    pub const FILE: &str = "file";
}

impl SettingsError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
