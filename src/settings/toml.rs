//! TOML settings file parsing.

use std::path::Path;

use serde::Deserialize;

use super::SettingsError;

/// Root structure of the settings file.
///
/// All fields are optional to allow partial settings that are merged with
/// CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlSettings {
    /// Target file section
    #[serde(default)]
    pub file: FileSection,

    /// Output section
    #[serde(default)]
    pub output: OutputSection,

    /// Peer listing section
    #[serde(default)]
    pub peers: PeersSection,
}

/// Target file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSection {
    /// Path of the WireGuard configuration file (`~` expands to home)
    pub path: Option<String>,
}

/// Output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

/// Peer listing section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeersSection {
    /// Regex patterns for public keys to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for public keys to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl TomlSettings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(SettingsError::from)
    }
}

/// Generates a default settings file with comments.
#[must_use]
pub fn default_settings_template() -> String {
    r#"# wg-conf settings file

[file]
# WireGuard configuration file to edit (can be overridden by --file)
# path = "/etc/wireguard/wg0.conf"

[output]
# Output format for read commands: "text" or "json" (default: text)
# format = "text"

[peers]
# Regex patterns for public keys listed by `peers` (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^office-"]

# Regex patterns for public keys hidden from `peers`
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["-old$"]
"#
    .to_string()
}
