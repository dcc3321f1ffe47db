//! Command execution.
//!
//! Loads the configuration lines, applies one command, and either prints
//! the result or persists the edited lines.

use std::io::{self, Write};

use thiserror::Error;

use wg_conf::settings::{AttrArgs, Command, OutputFormat, ValidatedSettings};
use wg_conf::storage::{LineSink, LineSource, StorageError};
use wg_conf::{AttrMap, ConfError, ConfigModel, WireguardConfig};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read or write the configuration file.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The configuration is malformed or the edit was rejected.
    #[error(transparent)]
    Conf(#[from] ConfError),

    /// The requested peer does not exist.
    #[error("Peer {0} not found")]
    PeerNotFound(String),

    /// The requested interface attribute does not exist.
    #[error("Attribute {0} not found in Interface")]
    AttrNotFound(String),

    /// Failed to render JSON output.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write command output.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    /// Returns `true` when the configuration file itself needs fixing by hand.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Conf(e) if e.is_malformed_input())
    }
}

/// Executes a single command against the configured file.
///
/// Read commands print to `out`. Mutating commands persist through `store`,
/// or print the resulting file to `out` in dry-run mode.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or saved, the edit is
/// rejected, or a looked-up peer/attribute is absent.
pub fn execute<S, W>(
    command: &Command,
    settings: &ValidatedSettings,
    store: &S,
    out: &mut W,
) -> Result<(), RunError>
where
    S: LineSource + LineSink,
    W: Write,
{
    let mut config = WireguardConfig::from_lines(store.load_lines()?)?;

    if !command.is_mutating() {
        return print_query(command, &config, settings, out);
    }

    apply_edit(command, &mut config)?;

    if settings.dry_run {
        write!(out, "{config}").map_err(RunError::Output)?;
        tracing::info!("Dry run: configuration not saved");
    } else {
        store.persist_lines(config.lines())?;
    }
    Ok(())
}

fn apply_edit(command: &Command, config: &mut WireguardConfig) -> Result<(), ConfError> {
    match command {
        Command::Add(attr) => config.add_interface_attr(&attr.key, &attr.value, comment(attr)),
        Command::Set(attr) => config.set_interface_attr(&attr.key, &attr.value, comment(attr)),
        Command::Del { key } => {
            if config.del_interface_attr(key)? == 0 {
                tracing::warn!(key = %key, "Attribute not present in Interface");
            }
            Ok(())
        }
        Command::PeerAdd { public_key, attr } => {
            config.add_peer_attr(public_key, &attr.key, &attr.value, comment(attr))
        }
        Command::PeerSet { public_key, attr } => {
            config.set_peer_attr(public_key, &attr.key, &attr.value, comment(attr))
        }
        Command::PeerDel { public_key, key } => {
            if config.del_peer_attr(public_key, key)? == 0 {
                tracing::warn!(public_key = %public_key, key = %key, "Attribute not present in peer");
            }
            Ok(())
        }
        Command::CreatePeer { public_key } => config.create_peer(public_key),
        Command::DeletePeer { public_key } => {
            if !config.delete_peer(public_key)? {
                tracing::warn!(public_key = %public_key, "Peer not present");
            }
            Ok(())
        }
        Command::Show
        | Command::Peers { .. }
        | Command::Peer { .. }
        | Command::Get { .. }
        | Command::Init { .. } => Ok(()),
    }
}

fn comment(attr: &AttrArgs) -> Option<&str> {
    attr.comment.as_deref()
}

fn print_query<W: Write>(
    command: &Command,
    config: &WireguardConfig,
    settings: &ValidatedSettings,
    out: &mut W,
) -> Result<(), RunError> {
    let json = settings.format == OutputFormat::Json;

    let rendered = match command {
        Command::Peers { .. } => {
            let keys: Vec<&str> = config
                .get_peer_keys()
                .filter(|key| settings.peer_filter.matches(key))
                .collect();
            if json {
                serde_json::to_string_pretty(&keys)?
            } else {
                keys.iter().map(|key| format!("{key}\n")).collect()
            }
        }
        Command::Peer { public_key } => {
            let peer = config
                .get_peer(public_key)
                .ok_or_else(|| RunError::PeerNotFound(public_key.clone()))?;
            if json {
                serde_json::to_string_pretty(peer)?
            } else {
                render_attrs(peer)
            }
        }
        Command::Get { key } => {
            let value = config
                .get_interface_attr(key)
                .ok_or_else(|| RunError::AttrNotFound(key.clone()))?;
            if json {
                serde_json::to_string(value)?
            } else {
                format!("{value}\n")
            }
        }
        _ => {
            if json {
                serde_json::to_string_pretty(config.model())?
            } else {
                render_model(config.model())
            }
        }
    };

    write_output(out, &rendered, json)
}

fn write_output<W: Write>(out: &mut W, rendered: &str, json: bool) -> Result<(), RunError> {
    let result = if json {
        writeln!(out, "{rendered}")
    } else {
        write!(out, "{rendered}")
    };
    result.map_err(RunError::Output)
}

fn render_attrs(attrs: &AttrMap) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key} = {value}\n"))
        .collect()
}

fn render_model(model: &ConfigModel) -> String {
    let mut sections = Vec::with_capacity(model.peers.len() + 1);
    if let Some(interface) = &model.interface {
        sections.push(format!("[Interface]\n{}", render_attrs(interface)));
    }
    for (_, peer) in model.peers.iter() {
        sections.push(format!("[Peer]\n{}", render_attrs(peer)));
    }
    sections.join("\n")
}
