//! Line persistence for configuration files.
//!
//! This module supplies the initial lines to the editing engine and writes
//! the final lines back. The engine itself never touches the filesystem.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileConfigStore;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing configuration lines.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read the configuration file.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Failed to write the configuration file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Supplies the initial ordered lines of a configuration.
pub trait LineSource {
    /// Reads all lines, each trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load_lines(&self) -> Result<Vec<String>, StorageError>;
}

/// Persists the final ordered lines of a configuration.
pub trait LineSink {
    /// Writes every line followed by a newline.
    ///
    /// Implementations should be all-or-nothing: a failed write must not
    /// leave a partially written file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines cannot be written.
    fn persist_lines(&self, lines: &[String]) -> Result<(), StorageError>;
}
