//! Validated settings after merging CLI and TOML sources.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::filter::PeerFilter;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{SettingsError, field};
use super::toml::TomlSettings;

/// Output format for read commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key = value` lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Fully validated settings ready for use by the application.
///
/// Use [`ValidatedSettings::from_raw`] to create from CLI args and optional
/// TOML settings.
#[derive(Debug)]
pub struct ValidatedSettings {
    /// WireGuard configuration file (required)
    pub file: PathBuf,

    /// Output format for read commands
    pub format: OutputFormat,

    /// Filter applied by the `peers` command
    pub peer_filter: PeerFilter,

    /// Print instead of saving
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings {{ file: {}, format: {}, dry_run: {}, peer_patterns: {} }}",
            self.file.display(),
            self.format,
            self.dry_run,
            self.peer_filter.len(),
        )
    }
}

impl ValidatedSettings {
    /// Creates validated settings from CLI arguments and optional TOML settings.
    ///
    /// CLI arguments take precedence over TOML values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file path is missing
    /// - The output format is unknown
    /// - A peer filter pattern is not a valid regex
    pub fn from_raw(cli: &Cli, toml: Option<&TomlSettings>) -> Result<Self, SettingsError> {
        let file = Self::resolve_file(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;
        let peer_filter = Self::build_peer_filter(cli, toml)?;

        Ok(Self {
            file,
            format,
            peer_filter,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges settings from CLI and the optional settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings file cannot be read or parsed
    /// - The merged settings are invalid
    pub fn load(cli: &Cli) -> Result<Self, SettingsError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlSettings::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_file(cli: &Cli, toml: Option<&TomlSettings>) -> Result<PathBuf, SettingsError> {
        // CLI takes precedence
        if let Some(ref path) = cli.file {
            return Ok(expand_tilde(path));
        }

        // Fall back to TOML
        toml.and_then(|t| t.file.path.as_deref())
            .map(|path| expand_tilde(Path::new(path)))
            .ok_or_else(|| {
                SettingsError::missing(field::FILE, "Use --file or set file.path in settings file")
            })
    }

    fn resolve_format(
        cli: &Cli,
        toml: Option<&TomlSettings>,
    ) -> Result<OutputFormat, SettingsError> {
        // Priority: CLI explicit > TOML > default
        if let Some(format) = cli.format {
            return Ok(format.into());
        }

        let value = toml
            .and_then(|t| t.output.format.as_deref())
            .unwrap_or(defaults::FORMAT);
        parse_format(value)
    }

    fn build_peer_filter(
        cli: &Cli,
        toml: Option<&TomlSettings>,
    ) -> Result<PeerFilter, SettingsError> {
        let (cli_include, cli_exclude) = match &cli.command {
            Command::Peers { include, exclude } => (include.as_slice(), exclude.as_slice()),
            _ => (&[][..], &[][..]),
        };

        // CLI patterns replace TOML patterns of the same kind
        let include = if cli_include.is_empty() {
            toml.map_or(&[][..], |t| t.peers.include.as_slice())
        } else {
            cli_include
        };
        let exclude = if cli_exclude.is_empty() {
            toml.map_or(&[][..], |t| t.peers.exclude.as_slice())
        } else {
            cli_exclude
        };

        PeerFilter::new(include, exclude).map_err(SettingsError::from)
    }
}

/// Writes the default settings template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_settings(path: &Path) -> Result<(), SettingsError> {
    let template = super::toml::default_settings_template();
    std::fs::write(path, template).map_err(|e| SettingsError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_format(s: &str) -> Result<OutputFormat, SettingsError> {
    match s.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(SettingsError::InvalidFormat {
            value: s.to_string(),
        }),
    }
}

/// Expands a leading `~` to the home directory; other paths are returned as-is.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
