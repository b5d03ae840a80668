//! Status command implementation.

use anyhow::{Context, Result};
use clap::Args;

use sesh_core::Identity;
use sesh_file::CachedView;

use crate::output;
use crate::session::{CliSession, WHOAMI_VIEW};

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(_args: StatusArgs, session: &CliSession) -> Result<()> {
    let state = session.controller.state().await;

    if !state.is_authenticated() {
        output::field("Session", "logged out");
        return Ok(());
    }
    output::field("Session", "token stored");

    let cached: Option<CachedView<Identity>> = session
        .views
        .get(WHOAMI_VIEW)
        .context("Failed to read cached identity")?;

    match cached {
        Some(entry) => {
            output::field("Name", &entry.value.username);
            output::list("Roles", &entry.value.roles);
            let checked = entry.cached_at.with_timezone(&chrono::Local);
            output::field("Checked", &checked.format("%Y-%m-%d %H:%M:%S").to_string());
        }
        None => output::field("Identity", "unknown (run 'sesh whoami')"),
    }

    Ok(())
}
