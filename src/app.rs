//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use wg_conf::settings::{SettingsError, field};

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Settings error (exit code 1) - invalid args, missing file path, etc.
    pub const SETTINGS_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - unreadable file, rejected edit, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common settings errors.
pub fn print_settings_hint(error: &SettingsError) {
    match error {
        SettingsError::MissingRequired { field: f, .. } if *f == field::FILE => {
            eprintln!("\nPass --file, or run 'wg-conf init' to generate a settings template.");
        }
        SettingsError::FileRead { .. } => {
            eprintln!("\nRun 'wg-conf init' to generate a settings template.");
        }
        _ => {}
    }
}

/// Points the user at the file when a command failed because it cannot be parsed.
pub fn print_runtime_hint(error: &RunError) {
    if error.is_malformed_input() {
        eprintln!("\nEvery [Peer] section needs a PublicKey line; fix the file by hand and retry.");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout only carries command output.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
