//! Peer selection by public key patterns.
//!
//! Semantics:
//! - Exclude patterns: AND logic (a key must avoid ALL excludes)
//! - Include patterns: OR logic (a key must match ANY include, empty = match all)

use regex::Regex;

/// Include/exclude regex filter over peer public keys.
///
/// # Examples
///
/// ```
/// use wg_conf::filter::PeerFilter;
///
/// let filter = PeerFilter::new(&["^office-"], &["-old$"])?;
///
/// assert!(filter.matches("office-laptop"));
/// assert!(!filter.matches("office-laptop-old"));
/// assert!(!filter.matches("home-desktop"));
/// # Ok::<(), wg_conf::filter::PatternError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PeerFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

/// An include or exclude pattern failed to compile.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid regex pattern '{pattern}': {source}")]
pub struct PatternError {
    /// The invalid pattern
    pub pattern: String,
    /// Underlying regex error
    #[source]
    pub source: regex::Error,
}

impl PeerFilter {
    /// Compiles include and exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that is not a valid regular expression.
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            includes: compile(includes)?,
            excludes: compile(excludes)?,
        })
    }

    /// Returns `true` if the public key passes the filter.
    #[must_use]
    pub fn matches(&self, public_key: &str) -> bool {
        if self.excludes.iter().any(|re| re.is_match(public_key)) {
            return false;
        }
        self.includes.is_empty() || self.includes.iter().any(|re| re.is_match(public_key))
    }

    /// Returns `true` if no patterns are configured (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Returns the total number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.includes.len() + self.excludes.len()
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, PatternError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref()).map_err(|source| PatternError {
                pattern: pattern.as_ref().to_owned(),
                source,
            })
        })
        .collect()
}
