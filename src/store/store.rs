//! Domain operations over the fixed file slots.
//!
//! # Responsibilities
//! - Resolve the user's home directory per call
//! - Map apply/save/load onto the shell-init and config slots
//! - Translate filesystem and backup errors into domain outcomes
//!
//! # Design Decisions
//! - Stateless between calls; each call re-resolves the home directory
//! - apply writes the shell-init slot first and stops at the first failure,
//!   with no compensating rollback of an already-written slot
//! - Payloads are opaque strings; nothing is parsed or validated

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::slots::{self, Slot};
use crate::store::writer::{ContentSink, FsSink, SafeFileWriter, WriteError};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user's home directory could not be determined.
    #[error("could not determine the user home directory")]
    HomeDirUnavailable,

    /// Creating the config directory failed; no write was attempted.
    #[error("failed to create {path}: {source}")]
    DirCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A durable write to a slot failed.
    #[error("writing {slot} failed: {source}")]
    Write {
        slot: Slot,
        #[source]
        source: WriteError,
    },

    /// The config slot has never been written.
    #[error("no saved configuration at {0}")]
    ConfigNotFound(PathBuf),

    /// The config slot exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when a slot file may have been left missing or truncated.
    ///
    /// This is the one condition that demands urgent user-visible
    /// attention; every other error leaves the previous file state intact.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, StoreError::Write { source, .. } if source.is_unrecoverable())
    }
}

/// Reads and writes the user's shell configuration slots.
///
/// Operations are stateless and idempotent apart from the backup side
/// effect of each durable write. The home directory is resolved on every
/// call; tests inject a root directory instead.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore<S = FsSink> {
    writer: SafeFileWriter<S>,
    home_override: Option<PathBuf>,
}

impl ConfigStore<FsSink> {
    /// Store rooted at the user's real home directory.
    pub fn new() -> Self {
        Self {
            writer: SafeFileWriter::new(),
            home_override: None,
        }
    }

    /// Store rooted at an explicit directory instead of the user's home.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            writer: SafeFileWriter::new(),
            home_override: Some(root.into()),
        }
    }
}

impl<S: ContentSink> ConfigStore<S> {
    /// Store with a custom writer, rooted at `root` if given.
    pub fn with_writer(writer: SafeFileWriter<S>, root: Option<PathBuf>) -> Self {
        Self {
            writer,
            home_override: root,
        }
    }

    fn home_dir(&self) -> Result<PathBuf, StoreError> {
        match &self.home_override {
            Some(root) => Ok(root.clone()),
            None => dirs::home_dir().ok_or(StoreError::HomeDirUnavailable),
        }
    }

    /// Write the shell-init and/or config slots.
    ///
    /// Empty or absent inputs are skipped; both empty is a successful
    /// no-op. The shell-init slot is written first, and its failure stops
    /// the operation before the config slot is touched.
    pub fn apply(&self, shell_init: Option<&str>, config: Option<&str>) -> Result<(), StoreError> {
        let home = self.home_dir()?;

        if let Some(content) = non_empty(shell_init) {
            let path = Slot::ShellInit.path(&home);
            self.writer
                .write_durable(&path, content)
                .map_err(|source| StoreError::Write {
                    slot: Slot::ShellInit,
                    source,
                })?;
            tracing::info!(path = %path.display(), bytes = content.len(), "Shell init written");
        }

        if let Some(content) = non_empty(config) {
            self.write_config_slot(&home, content)?;
        }

        Ok(())
    }

    /// Write the config slot, creating its directory on demand.
    ///
    /// Unlike [`apply`](Self::apply), an empty payload is still written.
    pub fn save(&self, config: &str) -> Result<(), StoreError> {
        let home = self.home_dir()?;
        self.write_config_slot(&home, config)
    }

    /// Read the config slot verbatim.
    ///
    /// A slot that has never been written is [`StoreError::ConfigNotFound`],
    /// distinct from an I/O failure on an existing file.
    pub fn load(&self) -> Result<String, StoreError> {
        let home = self.home_dir()?;
        let path = Slot::Config.path(&home);

        if !path.exists() {
            return Err(StoreError::ConfigNotFound(path));
        }

        fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed { path, source })
    }

    fn write_config_slot(&self, home: &Path, content: &str) -> Result<(), StoreError> {
        let dir = slots::config_dir(home);
        fs::create_dir_all(&dir).map_err(|source| StoreError::DirCreateFailed {
            path: dir.clone(),
            source,
        })?;

        let path = Slot::Config.path(home);
        self.writer
            .write_durable(&path, content)
            .map_err(|source| StoreError::Write {
                slot: Slot::Config,
                source,
            })?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Config written");
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
