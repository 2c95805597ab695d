//! Durable single-file writes.
//!
//! # Responsibilities
//! - Preserve the current contents as `<path>.backup` before overwriting
//! - Copy the backup back over the target if the overwrite fails
//! - Report the unrecoverable case (write failed, restore failed) explicitly
//!
//! # Design Decisions
//! - One backup generation per slot; each write overwrites the previous backup
//! - The backup is left on disk after a successful write as a recovery artifact
//! - The raw content write sits behind a trait so tests can inject failures

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Suffix appended to a target path to form its backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Backup path for a target file (`<path>.backup` as a sibling).
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Errors from a durable write attempt.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The parent directory of the target does not exist. Creating it is
    /// the caller's responsibility; no backup or write was attempted.
    #[error("parent directory of {0} does not exist")]
    MissingParent(PathBuf),

    /// Copying the current contents to the backup failed. The target file
    /// is untouched, so the operation is safe to retry.
    #[error("failed to back up {path}: {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The write failed and no previous contents existed to lose.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The write failed but the backup was copied back; the previous
    /// contents are intact.
    #[error("failed to write {path} (previous contents restored): {source}")]
    WriteFailedRestored {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The write failed and restoring the backup also failed. The target
    /// file may now be missing or truncated.
    #[error("failed to write {path} and restore failed ({restore}); file may be missing or truncated: {source}")]
    WriteFailedUnrecoverable {
        path: PathBuf,
        #[source]
        source: io::Error,
        restore: io::Error,
    },
}

impl WriteError {
    /// True when the target file may have been left missing or truncated.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, WriteError::WriteFailedUnrecoverable { .. })
    }
}

/// The raw content write underneath the backup/restore protocol.
///
/// Production code uses [`FsSink`]; tests substitute sinks that fail on
/// demand to exercise the restore paths.
pub trait ContentSink: Send + Sync {
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;
}

/// Writes straight through to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl ContentSink for FsSink {
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        fs::write(path, content)
    }
}

/// Replaces a file's contents while keeping the previous contents
/// recoverable.
///
/// The sequence is backup → overwrite → restore-on-failure. A successful
/// write leaves the backup behind; a failed write either restores the
/// previous contents or reports that it could not.
#[derive(Debug, Clone, Default)]
pub struct SafeFileWriter<S = FsSink> {
    sink: S,
}

impl SafeFileWriter<FsSink> {
    /// Writer backed by the real filesystem.
    pub fn new() -> Self {
        Self { sink: FsSink }
    }
}

impl<S: ContentSink> SafeFileWriter<S> {
    /// Writer with a custom content sink.
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Durably replace the contents of `path` with `new_content`.
    ///
    /// If `path` already exists its contents are first copied to
    /// `<path>.backup`; a failed overwrite is rolled back from that copy.
    pub fn write_durable(&self, path: &Path, new_content: &str) -> Result<(), WriteError> {
        match path.parent() {
            // An empty parent means a bare file name relative to the
            // current directory, which always exists.
            Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => {}
            _ => return Err(WriteError::MissingParent(path.to_path_buf())),
        }

        let backup = backup_path(path);
        let backed_up = if path.exists() {
            fs::copy(path, &backup).map_err(|source| WriteError::BackupFailed {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %path.display(), backup = %backup.display(), "Backup created");
            true
        } else {
            false
        };

        if let Err(source) = self.sink.write(path, new_content.as_bytes()) {
            if !backed_up {
                return Err(WriteError::WriteFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
            return match fs::copy(&backup, path) {
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "Write failed, previous contents restored");
                    Err(WriteError::WriteFailedRestored {
                        path: path.to_path_buf(),
                        source,
                    })
                }
                Err(restore) => Err(WriteError::WriteFailedUnrecoverable {
                    path: path.to_path_buf(),
                    source,
                    restore,
                }),
            };
        }

        Ok(())
    }
}
