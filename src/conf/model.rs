//! Structured view derived from the line buffer.
//!
//! The model is never edited directly: [`project`] rebuilds it from scratch
//! after every mutation.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::ConfError;
use super::line::{INTERFACE_HEADER, PEER_HEADER, PUBLIC_KEY, decode};

/// Attribute map of one section, in order of first appearance.
///
/// Keys are stored as written. Inserting an existing key (exact match)
/// replaces its value in place, so a hand-edited section with a repeated key
/// resolves to the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(String, String)>,
}

impl AttrMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a value, keeping the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Looks up a value by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Looks up a value ignoring ASCII case, preferring the last matching key.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, value)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the section has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for AttrMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Peers keyed by public key, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerMap {
    peers: Vec<(String, AttrMap)>,
}

impl PeerMap {
    /// Inserts a peer; a later peer with the same key replaces the earlier one.
    pub fn insert(&mut self, public_key: String, attrs: AttrMap) {
        match self.peers.iter_mut().find(|(k, _)| *k == public_key) {
            Some((_, existing)) => *existing = attrs,
            None => self.peers.push((public_key, attrs)),
        }
    }

    /// Looks up a peer by public key.
    #[must_use]
    pub fn get(&self, public_key: &str) -> Option<&AttrMap> {
        self.peers
            .iter()
            .find(|(k, _)| k == public_key)
            .map(|(_, attrs)| attrs)
    }

    /// Iterates over public keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(public key, attributes)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrMap)> {
        self.peers.iter().map(|(k, attrs)| (k.as_str(), attrs))
    }

    /// Returns the number of peers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` if there are no peers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl Serialize for PeerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.peers.len()))?;
        for (key, attrs) in &self.peers {
            map.serialize_entry(key, attrs)?;
        }
        map.end()
    }
}

/// Structured view of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConfigModel {
    /// The `[Interface]` attributes, or `None` without an `[Interface]` header.
    pub interface: Option<AttrMap>,
    /// The `[Peer]` sections keyed by public key.
    pub peers: PeerMap,
}

#[derive(Debug, Clone, Copy)]
enum SectionKind {
    Interface,
    Peer,
}

/// Section currently accumulating attributes during projection.
struct OpenSection {
    kind: SectionKind,
    /// 1-based line number of the header
    header_line: usize,
    attrs: AttrMap,
}

impl ConfigModel {
    fn close(&mut self, section: OpenSection) -> Result<(), ConfError> {
        match section.kind {
            SectionKind::Interface => self.interface = Some(section.attrs),
            SectionKind::Peer => {
                let public_key = section
                    .attrs
                    .get_ignore_case(PUBLIC_KEY)
                    .ok_or(ConfError::MissingPublicKey {
                        line: section.header_line,
                    })?
                    .to_owned();
                self.peers.insert(public_key, section.attrs);
            }
        }
        Ok(())
    }
}

/// Builds the model from an already-collapsed line sequence.
///
/// Attribute lines before the first header are ignored, as are lines without
/// a key (blank lines, stand-alone comments, unrecognized text).
///
/// # Errors
///
/// Returns [`ConfError::MissingPublicKey`] if a `[Peer]` section lacks a
/// `PublicKey` attribute.
pub fn project(lines: &[String]) -> Result<ConfigModel, ConfError> {
    let mut model = ConfigModel::default();
    let mut open: Option<OpenSection> = None;

    for (index, line) in lines.iter().enumerate() {
        let kind = match line.trim() {
            INTERFACE_HEADER => Some(SectionKind::Interface),
            PEER_HEADER => Some(SectionKind::Peer),
            _ => None,
        };

        if let Some(kind) = kind {
            if let Some(previous) = open.take() {
                model.close(previous)?;
            }
            open = Some(OpenSection {
                kind,
                header_line: index + 1,
                attrs: AttrMap::new(),
            });
            continue;
        }

        let parsed = decode(line);
        if let (true, Some(section)) = (parsed.is_attribute(), open.as_mut()) {
            section.attrs.insert(parsed.key, parsed.value);
        }
    }

    if let Some(last) = open {
        model.close(last)?;
    }

    Ok(model)
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
