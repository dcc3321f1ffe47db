//! Ordered buffer of raw configuration lines.

use std::ops::Range;

/// Owns the ordered sequence of raw lines.
///
/// Indices handed out by the section locator are only valid until the next
/// mutation of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Replaces the contents verbatim.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
    }

    /// Removes every line equal to its immediate predecessor.
    ///
    /// Returns the number of removed lines. Idempotent.
    pub fn collapse_adjacent_duplicates(&mut self) -> usize {
        let before = self.lines.len();
        self.lines.dedup();
        before - self.lines.len()
    }

    /// Inserts a line before `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, line: impl Into<String>) {
        self.lines.insert(index, line.into());
    }

    /// Removes and returns the line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> String {
        self.lines.remove(index)
    }

    /// Removes all lines in `range`, returning how many were removed.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        self.lines.drain(range).count()
    }

    /// Appends a line at the end.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Read-only view of the lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the store holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
