//! Layout-preserving WireGuard configuration editing.
//!
//! This module provides:
//! - A line tokenizer ([`line`])
//! - The raw line buffer ([`LineStore`])
//! - Section boundary scanning ([`locator`])
//! - The derived structured view ([`ConfigModel`])
//! - The editing API ([`WireguardConfig`])
//!
//! # Consistency
//!
//! Every mutation edits a draft copy of the line buffer, collapses adjacent
//! duplicate lines, and re-projects the whole model. The draft only replaces
//! the current buffer when projection succeeds, so a failed call changes
//! nothing.
//!
//! # Blank Lines Inside Sections
//!
//! A blank line ends a section for editing purposes, but the structured view
//! keeps collecting attributes until the next header. Attributes written after
//! a blank line inside a section are therefore visible to the getters yet
//! never touched by add, set, or delete, which only edit the lines before the
//! blank. A later duplicate still wins in the structured view, so `set` on
//! such a key has no visible effect.
//!
//! # Duplicate Lines
//!
//! Two identical consecutive lines are always collapsed into one, including
//! two identical attribute lines. Files that rely on repeating a line
//! verbatim are not supported.

mod error;
pub mod line;
pub mod locator;
mod model;
mod store;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::ConfError;
pub use locator::Section;
pub use model::{AttrMap, ConfigModel, PeerMap, project};
pub use store::LineStore;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use line::{PEER_HEADER, PUBLIC_KEY, decode, encode_checked};
use locator::{peer_block_range, section_range};

/// A WireGuard configuration file held as raw lines plus a structured view.
///
/// # Examples
///
/// ```
/// use wg_conf::WireguardConfig;
///
/// let mut config: WireguardConfig = "[Interface]\nPrivateKey = abc123\n".parse()?;
/// config.set_interface_attr("ListenPort", "51820", None)?;
///
/// assert_eq!(config.get_interface_attr("listenport"), Some("51820"));
/// assert_eq!(
///     config.serialize(),
///     "[Interface]\nPrivateKey = abc123\nListenPort = 51820\n"
/// );
/// # Ok::<(), wg_conf::ConfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WireguardConfig {
    store: LineStore,
    model: ConfigModel,
}

impl WireguardConfig {
    /// Builds a configuration from raw lines, trimming each one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::MissingPublicKey`] if a peer has no `PublicKey`.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ConfError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = LineStore::new();
        store.load(lines.into_iter().map(|line| line.as_ref().trim().to_owned()));

        let mut config = Self::default();
        config.commit(store)?;
        Ok(config)
    }

    /// Parses configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::MissingPublicKey`] if a peer has no `PublicKey`.
    pub fn parse(text: &str) -> Result<Self, ConfError> {
        Self::from_lines(text.lines())
    }

    /// Current raw lines, in the order they will be written.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.store.lines()
    }

    /// Renders the lines, each followed by a newline.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// The structured view of the current lines.
    #[must_use]
    pub const fn model(&self) -> &ConfigModel {
        &self.model
    }

    /// The interface attributes, if an `[Interface]` section exists.
    #[must_use]
    pub const fn interface(&self) -> Option<&AttrMap> {
        self.model.interface.as_ref()
    }

    /// Looks up an interface attribute, ignoring key case.
    #[must_use]
    pub fn get_interface_attr(&self, key: &str) -> Option<&str> {
        self.interface()?.get_ignore_case(key)
    }

    /// Adds an attribute at the end of the interface section.
    ///
    /// # Errors
    ///
    /// - [`ConfError::DuplicateAttribute`] if the key already exists
    /// - [`ConfError::SectionNotFound`] if there is no `[Interface]` section
    /// - [`ConfError::InvalidLine`] if any part contains a line break
    pub fn add_interface_attr(
        &mut self,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        self.add_attr(Section::Interface, key, value, comment)
    }

    /// Removes every interface line with the given key; returns how many were removed.
    ///
    /// Deleting an absent key or from an absent section is a no-op.
    ///
    /// # Errors
    ///
    /// Never fails for the interface; the signature matches the peer variant.
    pub fn del_interface_attr(&mut self, key: &str) -> Result<usize, ConfError> {
        self.del_attr(Section::Interface, key)
    }

    /// Adds or overwrites an interface attribute.
    ///
    /// # Errors
    ///
    /// - [`ConfError::SectionNotFound`] if there is no `[Interface]` section
    /// - [`ConfError::InvalidLine`] if any part contains a line break
    pub fn set_interface_attr(
        &mut self,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        self.set_attr(Section::Interface, key, value, comment)
    }

    /// Public keys of all peers, in file order.
    pub fn get_peer_keys(&self) -> impl Iterator<Item = &str> {
        self.model.peers.keys()
    }

    /// Attributes of the peer with the given public key.
    #[must_use]
    pub fn get_peer(&self, public_key: &str) -> Option<&AttrMap> {
        self.model.peers.get(public_key)
    }

    /// Adds an attribute at the end of a peer section.
    ///
    /// # Errors
    ///
    /// - [`ConfError::DuplicateAttribute`] if the key already exists in the peer
    /// - [`ConfError::SectionNotFound`] if no peer has this public key
    /// - [`ConfError::InvalidLine`] if any part contains a line break
    pub fn add_peer_attr(
        &mut self,
        public_key: &str,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        self.add_attr(Section::Peer(public_key), key, value, comment)
    }

    /// Removes every line with the given key from a peer; returns how many were removed.
    ///
    /// Deleting from an absent peer is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::MissingPublicKey`] when deleting the peer's own
    /// `PublicKey`; the configuration is left unchanged.
    pub fn del_peer_attr(&mut self, public_key: &str, key: &str) -> Result<usize, ConfError> {
        self.del_attr(Section::Peer(public_key), key)
    }

    /// Adds or overwrites a peer attribute.
    ///
    /// Setting `PublicKey` itself re-keys the peer.
    ///
    /// # Errors
    ///
    /// - [`ConfError::SectionNotFound`] if no peer has this public key
    /// - [`ConfError::InvalidLine`] if any part contains a line break
    pub fn set_peer_attr(
        &mut self,
        public_key: &str,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        self.set_attr(Section::Peer(public_key), key, value, comment)
    }

    /// Appends a new peer section with the given public key.
    ///
    /// # Errors
    ///
    /// - [`ConfError::PeerAlreadyExists`] if any line in the file has this
    ///   value, regardless of its key
    /// - [`ConfError::InvalidLine`] if the key contains a line break
    pub fn create_peer(&mut self, public_key: &str) -> Result<(), ConfError> {
        if self
            .store
            .lines()
            .iter()
            .any(|line| decode(line).value == public_key)
        {
            return Err(ConfError::PeerAlreadyExists {
                public_key: public_key.to_owned(),
            });
        }

        let key_line = encode_checked(PUBLIC_KEY, public_key, None)?;

        tracing::debug!(public_key, "Creating peer");
        self.apply(|draft| {
            draft.push("");
            draft.push(PEER_HEADER);
            draft.push(key_line);
            Ok(())
        })
    }

    /// Removes a peer section including its header; returns `false` if absent.
    ///
    /// # Errors
    ///
    /// Only fails if the remaining lines cannot be projected, which cannot
    /// happen for a buffer that was valid before the call.
    pub fn delete_peer(&mut self, public_key: &str) -> Result<bool, ConfError> {
        let Some(block) = peer_block_range(self.store.lines(), public_key) else {
            return Ok(false);
        };

        tracing::debug!(public_key, start = block.start, end = block.end, "Deleting peer");
        self.apply(|draft| {
            draft.remove_range(block);
            Ok(())
        })?;
        Ok(true)
    }

    fn add_attr(
        &mut self,
        section: Section<'_>,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        let range = self.require_range(section)?;
        let line = encode_checked(key, value, comment)?;

        if self.store.lines()[range.clone()]
            .iter()
            .any(|line| decode(line).key_matches(key))
        {
            return Err(ConfError::DuplicateAttribute {
                section: section.to_string(),
                key: key.to_owned(),
            });
        }

        tracing::debug!(%section, key, index = range.end, "Adding attribute");
        self.apply(|draft| {
            draft.insert_at(range.end, line);
            Ok(())
        })
    }

    fn del_attr(&mut self, section: Section<'_>, key: &str) -> Result<usize, ConfError> {
        let Some(range) = section_range(self.store.lines(), section) else {
            return Ok(0);
        };

        let mut removed = 0;
        self.apply(|draft| {
            removed = remove_matching(draft, range, key);
            Ok(())
        })?;
        tracing::debug!(%section, key, removed, "Deleted attribute");
        Ok(removed)
    }

    fn set_attr(
        &mut self,
        section: Section<'_>,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<(), ConfError> {
        let range = self.require_range(section)?;
        let line = encode_checked(key, value, comment)?;

        tracing::debug!(%section, key, "Setting attribute");
        self.apply(|draft| {
            let removed = remove_matching(draft, range.clone(), key);
            draft.insert_at(range.end - removed, line);
            Ok(())
        })
    }

    fn require_range(&self, section: Section<'_>) -> Result<Range<usize>, ConfError> {
        section_range(self.store.lines(), section).ok_or_else(|| ConfError::SectionNotFound {
            section: section.to_string(),
        })
    }

    /// Runs `edit` on a copy of the buffer and commits it if projection succeeds.
    fn apply<F>(&mut self, edit: F) -> Result<(), ConfError>
    where
        F: FnOnce(&mut LineStore) -> Result<(), ConfError>,
    {
        let mut draft = self.store.clone();
        edit(&mut draft)?;
        self.commit(draft)
    }

    fn commit(&mut self, mut store: LineStore) -> Result<(), ConfError> {
        store.collapse_adjacent_duplicates();
        self.model = project(store.lines())?;
        self.store = store;
        Ok(())
    }
}

/// Removes lines in `range` whose key matches, returning how many were removed.
fn remove_matching(store: &mut LineStore, range: Range<usize>, key: &str) -> usize {
    let matching: Vec<usize> = range
        .filter(|&index| decode(&store.lines()[index]).key_matches(key))
        .collect();

    for &index in matching.iter().rev() {
        store.remove_at(index);
    }
    matching.len()
}

impl fmt::Display for WireguardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.store.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl FromStr for WireguardConfig {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
