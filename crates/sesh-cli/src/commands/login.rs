//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sesh_core::Credentials;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username (surrounding whitespace is ignored)
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, session: &CliSession) -> Result<()> {
    let credentials = Credentials::new(args.username, args.password);

    eprintln!("{}", "Logging in...".dimmed());

    session
        .controller
        .login(credentials)
        .await
        .context("Failed to login")?;
    session.forget_identity();

    output::success("Logged in successfully");
    output::field("Token file", &session.store.path().display().to_string());

    Ok(())
}
