//! Building the session controller from CLI settings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use sesh_core::{RouteTable, ServiceUrl, SessionController};
use sesh_file::{FileTokenStore, FileViewCache};
use sesh_http::HttpAuthService;

use crate::cli::SessionArgs;

/// View cache key for the last resolved identity.
pub const WHOAMI_VIEW: &str = "whoami";

/// A controller wired to the local data directory and the configured server.
pub struct CliSession {
    pub controller: SessionController,
    pub views: FileViewCache,
    pub store: FileTokenStore,
}

impl CliSession {
    /// Drop the cached identity. It belongs to the token that was just
    /// replaced or cleared and must not be shown next to another one.
    pub fn forget_identity(&self) {
        if let Err(e) = self.views.remove(WHOAMI_VIEW) {
            tracing::warn!(error = %e, "Failed to drop cached identity");
        }
    }
}

/// Resolve the data directory: explicit flag/env first, then the platform
/// data directory.
fn data_dir(args: &SessionArgs) -> Result<PathBuf> {
    let dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("", "", "sesh")
            .context("Could not determine data directory")?
            .data_dir()
            .to_path_buf(),
    };

    fs::create_dir_all(&dir).context("Failed to create data directory")?;
    Ok(dir)
}

/// Open the session described by `args`.
pub fn open(args: &SessionArgs) -> Result<CliSession> {
    let dir = data_dir(args)?;
    let server = ServiceUrl::new(&args.server).context("Invalid server URL")?;
    let service = HttpAuthService::new(server).context("Failed to build HTTP client")?;

    let store = FileTokenStore::new(dir.join("token"));
    let views = FileViewCache::new(dir.join("views"));

    let controller = SessionController::new(
        service,
        store.clone(),
        RouteTable::default(),
        views.clone(),
    );

    Ok(CliSession {
        controller,
        views,
        store,
    })
}
