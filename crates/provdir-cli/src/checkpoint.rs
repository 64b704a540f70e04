//! Durable crawl progress: one JSON file holding a [`CrawlState`].
//!
//! Absence of the file is the normal "start fresh" signal, not an error.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use provdir_core::CrawlState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checkpoint {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("checkpoint {path} points at index {index} but holds only {len} URLs")]
    Inconsistent {
        path: PathBuf,
        index: usize,
        len: usize,
    },
}

pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the checkpoint, or `None` if no checkpoint file exists.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError`] if the file exists but cannot be read,
    /// is not valid JSON, or records an index past the end of its URL list.
    pub fn load(&self) -> Result<Option<CrawlState>, CheckpointError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let state: CrawlState =
            serde_json::from_str(&content).map_err(|e| CheckpointError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        if !state.is_consistent() {
            return Err(CheckpointError::Inconsistent {
                path: self.path.clone(),
                index: state.current_index,
                len: state.urls.len(),
            });
        }

        Ok(Some(state))
    }

    /// Writes `state`, replacing any earlier checkpoint.
    ///
    /// The state goes to a sibling temp file first and is renamed into place,
    /// so a crash mid-write leaves the previous checkpoint intact.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::Io`] if the file cannot be written.
    pub fn save(&self, state: &CrawlState) -> Result<(), CheckpointError> {
        let json = serde_json::to_vec(state).map_err(|e| CheckpointError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        let tmp_path = self.tmp_path();
        let mut file = fs::File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&json).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        tracing::info!(
            path = %self.path.display(),
            current_index = state.current_index,
            total = state.urls.len(),
            "checkpoint saved"
        );
        Ok(())
    }

    /// Deletes the checkpoint. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CheckpointError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CheckpointError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> CheckpointError {
        CheckpointError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
