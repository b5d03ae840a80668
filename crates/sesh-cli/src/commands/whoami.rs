//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::output;
use crate::session::{CliSession, WHOAMI_VIEW};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the identity as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, session: &CliSession) -> Result<()> {
    if !session.controller.state().await.is_authenticated() {
        bail!("No active session. Run 'sesh login' first.");
    }

    let identity = session
        .controller
        .fetch_identity()
        .await
        .context("Failed to fetch identity")?;

    if let Err(e) = session.views.put(WHOAMI_VIEW, &identity) {
        tracing::warn!(error = %e, "Failed to cache identity");
    }

    if args.json {
        return output::json_pretty(&identity);
    }

    output::field("Name", &identity.username);
    output::field("Avatar", &identity.picture);
    output::list("Roles", &identity.roles);
    output::list("Permissions", &identity.permissions);

    Ok(())
}
