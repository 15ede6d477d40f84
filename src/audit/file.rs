//! Audit log backed by a plain text file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{AuditError, OperationRecord};

/// Appends [`OperationRecord`]s to a file, one per line.
///
/// The file and its parent directory are created on first use. Existing
/// content is never rewritten.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    /// Creates an audit log writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the audit file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record.
    ///
    /// The file I/O runs on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the file cannot be opened or written.
    pub async fn record(&self, record: &OperationRecord) -> Result<(), AuditError> {
        let path = self.path.clone();
        let line = format!("{record}\n");

        tokio::task::spawn_blocking(move || Self::append_blocking(&path, &line))
            .await
            .map_err(|e| AuditError::Interrupted(e.to_string()))?
    }

    fn append_blocking(path: &Path, line: &str) -> Result<(), AuditError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| AuditError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AuditError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|source| AuditError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
