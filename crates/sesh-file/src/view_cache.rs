//! Per-view state cached on disk for the lifetime of a session.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use sesh_core::error::InvalidInputError;
use sesh_core::{Result, ViewRegistry};

use crate::map_io;

/// A cached view value and when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedView<T> {
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
    /// The cached value.
    pub value: T,
}

/// A [`ViewRegistry`] that stores one JSON file per view in a directory.
///
/// Clearing deletes every `*.json` entry; other files are left alone.
#[derive(Debug, Clone)]
pub struct FileViewCache {
    dir: PathBuf,
}

impl FileViewCache {
    /// Create a cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(InvalidInputError::Other {
                message: format!("invalid view name '{name}'"),
            }
            .into());
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Store a value for a view, replacing any earlier entry.
    #[instrument(skip(self, value), fields(dir = %self.dir.display()))]
    pub fn put<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.entry_path(name)?;
        fs::create_dir_all(&self.dir).map_err(map_io)?;

        let entry = CachedView {
            cached_at: Utc::now(),
            value,
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|e| InvalidInputError::Other {
            message: e.to_string(),
        })?;

        fs::write(&path, json).map_err(map_io)?;
        debug!("View cached");
        Ok(())
    }

    /// Load a view entry, if present.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedView<T>>> {
        let path = self.entry_path(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(map_io(err)),
        };

        let entry = serde_json::from_str(&json).map_err(|e| InvalidInputError::Other {
            message: format!("corrupt view entry '{name}': {e}"),
        })?;
        Ok(Some(entry))
    }

    /// Drop one view entry. A missing entry is not an error.
    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "View removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io(err)),
        }
    }

    /// Returns the names of cached views, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(map_io(err)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(map_io)?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl ViewRegistry for FileViewCache {
    fn clear_all(&self) {
        let names = match self.names() {
            Ok(names) => names,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Failed to list cached views");
                return;
            }
        };

        for name in names {
            let path = self.dir.join(format!("{name}.json"));
            if let Err(e) = fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "Failed to remove cached view");
            }
        }
        debug!(dir = %self.dir.display(), "Cleared cached views");
    }
}
