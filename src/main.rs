//! wg-conf: WireGuard configuration editor
//!
//! Entry point for the wg-conf application.

use std::process::ExitCode;

use wg_conf::settings::{Cli, Command, ValidatedSettings, write_default_settings};
use wg_conf::storage::FileConfigStore;

mod app;
mod run;

use app::{exit_code, print_runtime_hint, print_settings_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return handle_init(output);
    }

    // Load and validate settings
    let settings = match ValidatedSettings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Settings error: {e}");
            print_settings_hint(&e);
            return exit_code::SETTINGS_ERROR;
        }
    };

    setup_tracing(settings.verbose);
    tracing::debug!("{settings}");

    run_command(&cli.command, &settings)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_settings(output) {
        Ok(()) => {
            println!("Settings template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::SETTINGS_ERROR
        }
    }
}

/// Runs one command against the configured file.
#[cfg(not(tarpaulin_include))]
fn run_command(command: &Command, settings: &ValidatedSettings) -> ExitCode {
    let store = FileConfigStore::new(&settings.file);
    let mut stdout = std::io::stdout().lock();

    match run::execute(command, settings, &store, &mut stdout) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            print_runtime_hint(&e);
            exit_code::runtime_error()
        }
    }
}
