//! JSON history file scoped to a single directory capability.
//!
//! Only a missing file reads as an empty history. A missing directory is an
//! I/O error.
//!
//! Saves write a sibling temporary file, flush it to disk, and rename it over
//! the history file, so a crash leaves either the old or the new history.

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::sync::{
    domain::SyncHistory,
    ports::{HistoryStore, HistoryStoreError, HistoryStoreResult},
};

/// File name used for the history inside its directory.
pub const HISTORY_FILE_NAME: &str = ".todoist-habitrpg.json";

/// History store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileHistoryStore {
    directory: PathBuf,
    file_name: String,
}

impl FileHistoryStore {
    /// Stores history as [`HISTORY_FILE_NAME`] inside `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_file_name(directory, HISTORY_FILE_NAME)
    }

    /// Stores history under a custom file name inside `directory`.
    #[must_use]
    pub fn with_file_name(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the history file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    fn temp_name(&self) -> String {
        format!("{}.tmp", self.file_name)
    }

    fn open_dir(&self) -> std::io::Result<Dir> {
        Dir::open_ambient_dir(&self.directory, ambient_authority())
    }

    fn write_replacing(&self, dir: &Dir, contents: &[u8]) -> std::io::Result<()> {
        let temp_name = self.temp_name();
        let mut file = dir.create(&temp_name)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);
        dir.rename(&temp_name, dir, Path::new(&self.file_name))
    }
}

/// Serializes a value for the history file. Encoding failures are storage
/// errors, never [`HistoryStoreError::Malformed`].
pub(crate) fn encode<T: Serialize>(value: &T) -> HistoryStoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(value).map_err(std::io::Error::other)?)
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> HistoryStoreResult<SyncHistory> {
        let dir = self.open_dir()?;
        let raw = match dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path().display(), "no history file; starting empty");
                return Ok(SyncHistory::empty());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&raw).map_err(|err| {
            HistoryStoreError::Malformed(format!("{}: {err}", self.path().display()))
        })
    }

    async fn save(&self, history: &SyncHistory) -> HistoryStoreResult<()> {
        let contents = encode(history)?;
        let dir = self.open_dir()?;
        if let Err(err) = self.write_replacing(&dir, &contents) {
            if let Err(cleanup) = dir.remove_file(self.temp_name()) {
                debug!(error = %cleanup, "could not remove temporary history file");
            }
            return Err(err.into());
        }
        debug!(path = %self.path().display(), tasks = history.len(), "wrote history");
        Ok(())
    }
}
