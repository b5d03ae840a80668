//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, session: &CliSession) -> Result<()> {
    if !session.controller.state().await.is_authenticated() {
        output::success("No active session");
        return Ok(());
    }

    eprintln!("{}", "Logging out...".dimmed());

    if let Err(e) = session.controller.logout().await {
        output::error("Server did not acknowledge the logout; local session kept");
        eprintln!("Run 'sesh reset-token' to discard it anyway.");
        return Err(e).context("Failed to logout");
    }

    output::success("Logged out");

    Ok(())
}
