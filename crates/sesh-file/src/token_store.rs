//! Token persisted in a single file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use sesh_core::{Result, Token, TokenStore};

use crate::map_io;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A [`TokenStore`] that keeps the token in one file.
///
/// Writes go to a temporary file that is renamed over the target while an
/// exclusive lock on `<path>.lock` is held. A missing or unreadable file
/// reads as the empty token. IO failures are logged, never returned.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is created until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the token file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sibling(".lock"))
            .map_err(map_io)?;
        lock_file.lock_exclusive().map_err(map_io)?;
        Ok(lock_file)
    }

    fn try_read(&self) -> Result<Token> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Token::new(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Token::empty()),
            Err(err) => Err(map_io(err)),
        }
    }

    fn try_write(&self, token: &Token) -> Result<()> {
        let lock_file = self.lock()?;

        let temp_path = self.sibling(".tmp");
        {
            let mut file = File::create(&temp_path).map_err(map_io)?;
            file.write_all(token.as_str().as_bytes()).map_err(map_io)?;
            file.sync_all().map_err(map_io)?;
        }

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&temp_path).map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(map_io)?;
        }

        fs::rename(&temp_path, &self.path).map_err(map_io)?;
        lock_file.unlock().map_err(map_io)?;

        debug!(path = %self.path.display(), "Token written");
        Ok(())
    }

    fn try_remove(&self) -> Result<()> {
        let lock_file = self.lock()?;

        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Token removed"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(map_io(err)),
        }

        lock_file.unlock().map_err(map_io)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Token {
        self.try_read().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to read token, treating as empty");
            Token::empty()
        })
    }

    fn set(&self, token: &Token) {
        if let Err(e) = self.try_write(token) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist token");
        }
    }

    fn remove(&self) {
        if let Err(e) = self.try_remove() {
            warn!(path = %self.path.display(), error = %e, "Failed to remove token");
        }
    }
}
