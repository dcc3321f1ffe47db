//! Single-line tokenizer for `key = value # comment` lines.
//!
//! No escaping is supported: a `#` or `=` inside a value cannot be
//! represented, and [`decode`] is only a left inverse of [`encode`] for
//! lines without a comment.

use super::ConfError;

/// Header line opening the interface section.
pub const INTERFACE_HEADER: &str = "[Interface]";

/// Header line opening a peer section.
pub const PEER_HEADER: &str = "[Peer]";

/// Attribute whose value identifies a peer.
pub const PUBLIC_KEY: &str = "PublicKey";

/// A raw line split into its key, value and trailing comment.
///
/// Borrows from the raw line; all three parts are trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Text before the first `=`, or empty when the line has no `=`.
    pub key: &'a str,
    /// Text after the first `=`, or the whole data part when there is no `=`.
    pub value: &'a str,
    /// Text after the first `#`.
    pub comment: &'a str,
}

impl ParsedLine<'_> {
    /// Returns `true` if the line carries an attribute (non-empty key).
    #[must_use]
    pub const fn is_attribute(&self) -> bool {
        !self.key.is_empty()
    }

    /// Compares the key case-insensitively.
    #[must_use]
    pub fn key_matches(&self, key: &str) -> bool {
        self.is_attribute() && self.key.eq_ignore_ascii_case(key)
    }

    /// Returns `true` if this line is `PublicKey = {public_key}`.
    #[must_use]
    pub fn is_public_key(&self, public_key: &str) -> bool {
        self.key_matches(PUBLIC_KEY) && self.value == public_key
    }
}

/// Splits a line at the first `#`, then the data part at the first `=`.
///
/// # Examples
///
/// ```
/// use wg_conf::conf::line::decode;
///
/// let parsed = decode("ListenPort = 51820 # default");
/// assert_eq!(parsed.key, "ListenPort");
/// assert_eq!(parsed.value, "51820");
/// assert_eq!(parsed.comment, "default");
///
/// let header = decode("[Peer]");
/// assert_eq!(header.key, "");
/// assert_eq!(header.value, "[Peer]");
/// ```
#[must_use]
pub fn decode(line: &str) -> ParsedLine<'_> {
    let (data, comment) = line.split_once('#').unwrap_or((line, ""));

    let (key, value) = match data.split_once('=') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => ("", data.trim()),
    };

    ParsedLine {
        key,
        value,
        comment: comment.trim(),
    }
}

/// Formats an attribute line as `key = value` or `key = value # comment`.
#[must_use]
pub fn encode(key: &str, value: &str, comment: Option<&str>) -> String {
    match comment {
        Some(comment) => format!("{key} = {value} # {comment}"),
        None => format!("{key} = {value}"),
    }
}

/// Like [`encode`], but rejects any part that contains a line break.
///
/// # Errors
///
/// Returns [`ConfError::InvalidLine`] naming the first offending part.
pub fn encode_checked(key: &str, value: &str, comment: Option<&str>) -> Result<String, ConfError> {
    if let Some(text) = [Some(key), Some(value), comment]
        .into_iter()
        .flatten()
        .find(|part| part.contains(['\n', '\r']))
    {
        return Err(ConfError::InvalidLine {
            text: text.to_owned(),
        });
    }
    Ok(encode(key, value, comment))
}

/// Returns `true` for `[Interface]` and `[Peer]` lines.
#[must_use]
pub fn is_header(line: &str) -> bool {
    matches!(line.trim(), INTERFACE_HEADER | PEER_HEADER)
}

/// Returns `true` for lines that terminate a section body: blank lines and headers.
#[must_use]
pub fn is_section_end(line: &str) -> bool {
    line.trim().is_empty() || is_header(line)
}
