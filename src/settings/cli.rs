//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::defaults;

/// wg-conf: edit WireGuard configuration files in place
///
/// Reads, edits and saves interface and peer attributes while keeping the
/// file's layout, comments and unknown lines intact.
#[derive(Debug, Parser)]
#[command(name = "wg-conf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// WireGuard configuration file to operate on
    #[arg(long, short, global = true)]
    pub file: Option<PathBuf>,

    /// Path to settings file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for read commands
    #[arg(long, value_enum, global = true)]
    pub format: Option<FormatArg>,

    /// Print the resulting file instead of saving it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// An attribute to write, with an optional trailing comment.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AttrArgs {
    /// Attribute name
    pub key: String,

    /// Attribute value
    pub value: String,

    /// Trailing comment written after the value
    #[arg(long)]
    pub comment: Option<String>,
}

/// Subcommands for wg-conf
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the interface and all peers
    Show,

    /// List peer public keys
    Peers {
        /// Regex for public keys to include (can be specified multiple times)
        #[arg(long = "include", value_name = "PATTERN")]
        include: Vec<String>,

        /// Regex for public keys to exclude (can be specified multiple times)
        #[arg(long = "exclude", value_name = "PATTERN")]
        exclude: Vec<String>,
    },

    /// Print one peer
    Peer {
        /// Public key of the peer
        public_key: String,
    },

    /// Print an interface attribute
    Get {
        /// Attribute name (case-insensitive)
        key: String,
    },

    /// Add an interface attribute, failing if it exists
    Add(AttrArgs),

    /// Add or overwrite an interface attribute
    Set(AttrArgs),

    /// Delete an interface attribute
    Del {
        /// Attribute name (case-insensitive)
        key: String,
    },

    /// Add a peer attribute, failing if it exists
    PeerAdd {
        /// Public key of the peer
        public_key: String,
        #[command(flatten)]
        attr: AttrArgs,
    },

    /// Add or overwrite a peer attribute
    PeerSet {
        /// Public key of the peer
        public_key: String,
        #[command(flatten)]
        attr: AttrArgs,
    },

    /// Delete a peer attribute
    PeerDel {
        /// Public key of the peer
        public_key: String,
        /// Attribute name (case-insensitive)
        key: String,
    },

    /// Append a new peer section
    CreatePeer {
        /// Public key of the new peer
        public_key: String,
    },

    /// Remove a peer section
    DeletePeer {
        /// Public key of the peer
        public_key: String,
    },

    /// Generate a default settings file
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = defaults::SETTINGS_FILE)]
        output: PathBuf,
    },
}

impl Command {
    /// Returns true if the command changes the configuration file.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::Set(_)
                | Self::Del { .. }
                | Self::PeerAdd { .. }
                | Self::PeerSet { .. }
                | Self::PeerDel { .. }
                | Self::CreatePeer { .. }
                | Self::DeletePeer { .. }
        )
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// `key = value` lines
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for super::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
