//! Section boundary scanning over the raw line buffer.
//!
//! Ranges are computed from a snapshot of the lines and must be recomputed
//! after every insert or remove.

use std::fmt;
use std::ops::Range;

use super::line::{INTERFACE_HEADER, PEER_HEADER, decode, is_header, is_section_end};

/// Target section of an attribute operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    /// The single `[Interface]` section.
    Interface,
    /// The `[Peer]` section whose `PublicKey` equals the given value.
    Peer(&'a str),
}

impl fmt::Display for Section<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface => f.write_str("Interface"),
            Self::Peer(public_key) => write!(f, "Peer {public_key}"),
        }
    }
}

/// Returns the half-open range of body lines belonging to `section`.
///
/// The header is excluded. The body ends at the first blank line or section
/// header after the section start (for peers: after the matching `PublicKey`
/// line), or at end of input. Returns `None` if the section does not exist.
#[must_use]
pub fn section_range(lines: &[String], section: Section<'_>) -> Option<Range<usize>> {
    match section {
        Section::Interface => interface_range(lines),
        Section::Peer(public_key) => {
            peer_block_range(lines, public_key).map(|block| block.start + 1..block.end)
        }
    }
}

/// Returns the range of a peer section including its `[Peer]` header.
#[must_use]
pub fn peer_block_range(lines: &[String], public_key: &str) -> Option<Range<usize>> {
    let mut headers = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim() == PEER_HEADER)
        .map(|(index, _)| index);

    headers.find_map(|header| {
        let key_line = find_public_key(lines, header + 1, public_key)?;
        Some(header..body_end(lines, key_line))
    })
}

fn interface_range(lines: &[String]) -> Option<Range<usize>> {
    let header = lines.iter().position(|line| line.trim() == INTERFACE_HEADER)?;
    Some(header + 1..body_end(lines, header + 1))
}

/// Looks for `PublicKey = {public_key}` from `start` up to the next header.
fn find_public_key(lines: &[String], start: usize, public_key: &str) -> Option<usize> {
    lines[start..]
        .iter()
        .take_while(|line| !is_header(line))
        .position(|line| decode(line).is_public_key(public_key))
        .map(|offset| start + offset)
}

fn body_end(lines: &[String], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(|line| is_section_end(line))
        .map_or(lines.len(), |offset| from + offset)
}
