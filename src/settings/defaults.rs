//! Default values for settings.

/// Default settings file written by `init`.
pub const SETTINGS_FILE: &str = "wg-conf.toml";

/// Default output format name.
pub const FORMAT: &str = "text";
