//! Error types for the line-mutation engine.

use thiserror::Error;

/// Error type for configuration parsing and mutation.
///
/// Failed mutations leave the configuration unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfError {
    /// The attribute already exists in the target section.
    #[error("Attribute {key} already found in {section}. Use set to overwrite.")]
    DuplicateAttribute {
        /// Section the attribute was added to
        section: String,
        /// The duplicate key
        key: String,
    },

    /// A line with this public key value already exists somewhere in the file.
    #[error("A peer with the public key {public_key} already exists, cannot create a new one")]
    PeerAlreadyExists {
        /// The rejected public key
        public_key: String,
    },

    /// A `[Peer]` section has no `PublicKey` attribute.
    #[error("Peer section at line {line} has no PublicKey attribute")]
    MissingPublicKey {
        /// 1-based line number of the `[Peer]` header
        line: usize,
    },

    /// The target section of an add or set operation does not exist.
    #[error("Section {section} not found")]
    SectionNotFound {
        /// Description of the missing section
        section: String,
    },

    /// A key, value, or comment would span more than one line.
    #[error("Line break not allowed in {text:?}")]
    InvalidLine {
        /// The rejected text
        text: String,
    },
}

impl ConfError {
    /// Returns `true` for errors caused by malformed input rather than a rejected request.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MissingPublicKey { .. })
    }
}
