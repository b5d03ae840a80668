//! Reset token command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ResetTokenArgs {}

pub async fn run(_args: ResetTokenArgs, session: &CliSession) -> Result<()> {
    session.controller.reset_token().await;
    session.forget_identity();
    output::success("Local session cleared");
    Ok(())
}
