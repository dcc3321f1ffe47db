//! File-based line persistence.

use std::path::{Path, PathBuf};

use super::{LineSink, LineSource, StorageError};

/// Reads and writes configuration lines from a file on disk.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// The file is either fully written or left untouched.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Creates a store for the file at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
        |source| StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Joins lines into file content, each followed by a newline.
fn render(lines: &[String]) -> String {
    lines.iter().fold(String::new(), |mut content, line| {
        content.push_str(line);
        content.push('\n');
        content
    })
}

impl LineSource for FileConfigStore {
    fn load_lines(&self) -> Result<Vec<String>, StorageError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;

        let lines: Vec<String> = content.lines().map(|line| line.trim().to_owned()).collect();
        tracing::info!(path = %self.path.display(), lines = lines.len(), "Loaded configuration");
        Ok(lines)
    }
}

impl LineSink for FileConfigStore {
    fn persist_lines(&self, lines: &[String]) -> Result<(), StorageError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(self.write_error())?;
            }
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., wg0.conf -> wg0.conf.tmp, not wg0.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));

        std::fs::write(&temp_path, render(lines)).map_err(self.write_error())?;
        std::fs::rename(&temp_path, &self.path).map_err(self.write_error())?;

        tracing::info!(path = %self.path.display(), lines = lines.len(), "Saved configuration");
        Ok(())
    }
}
