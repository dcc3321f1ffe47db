//! Settings layer for wg-conf.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML settings file parsing ([`TomlSettings`])
//! - Validated settings ([`ValidatedSettings`])
//! - Settings file generation ([`write_default_settings`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML settings file** (only read when `--config` is given)
//! 3. **Built-in defaults**
//!
//! The target file has no default: it must come from `--file` or `file.path`.
//!
//! Peer filter patterns from the CLI **replace** TOML patterns of the same
//! kind: `--include` replaces `peers.include`, `--exclude` replaces
//! `peers.exclude`, independently.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{AttrArgs, Cli, Command, FormatArg};
pub use error::{SettingsError, field};
pub use toml::{TomlSettings, default_settings_template};
pub use validated::{OutputFormat, ValidatedSettings, write_default_settings};
