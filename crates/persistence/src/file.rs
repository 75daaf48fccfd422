// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::PersistenceError;
use crate::store::SessionStore;

const SESSION_FILE_NAME: &str = "session.json";

/// Resolves the per-user session file location.
///
/// # Errors
///
/// Returns an error if the platform has no data directory for the user.
pub fn default_session_path() -> Result<PathBuf, PersistenceError> {
    let project_dirs: ProjectDirs = ProjectDirs::from("com", "valeria", "checkin-report")
        .ok_or_else(|| {
            PersistenceError::InitializationError(String::from(
                "unable to resolve data directory",
            ))
        })?;
    Ok(project_dirs.data_local_dir().join(SESSION_FILE_NAME))
}

/// A session store backed by a JSON object on disk.
///
/// The whole map is rewritten on every change. A missing file is an empty
/// store; an unreadable one is discarded with a warning. A change whose
/// write fails is undone in memory, so the map always matches the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Opens the store at `path`, loading any existing entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Discarding unreadable session file"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened session store");

        Ok(Self { path, entries })
    }

    /// Opens the store at [`default_session_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be resolved or read.
    pub fn open_default() -> Result<Self, PersistenceError> {
        Self::open(default_session_path()?)
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents: String = serde_json::to_string_pretty(&self.entries)?;
        let staging: PathBuf = self.path.with_extension("json.tmp");
        std::fs::write(&staging, contents)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }

    /// Applies `change` and writes the file, restoring the previous entries
    /// if the write fails.
    fn commit<F>(&mut self, change: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let previous: BTreeMap<String, String> = self.entries.clone();
        if !change(&mut self.entries) {
            return Ok(());
        }
        if let Err(err) = self.flush() {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Session write failed; change discarded"
            );
            self.entries = previous;
            return Err(err);
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        self.commit(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
            true
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.commit(|map| map.remove(key).is_some())
    }
}
