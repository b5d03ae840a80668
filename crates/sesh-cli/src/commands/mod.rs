//! Subcommand implementations.

pub mod login;
pub mod logout;
pub mod reset_token;
pub mod status;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::session;

pub async fn handle(cli: Cli) -> Result<()> {
    let session = session::open(&cli.session)?;

    match cli.command {
        Commands::Login(args) => login::run(args, &session).await,
        Commands::Whoami(args) => whoami::run(args, &session).await,
        Commands::Logout(args) => logout::run(args, &session).await,
        Commands::ResetToken(args) => reset_token::run(args, &session).await,
        Commands::Status(args) => status::run(args, &session).await,
    }
}
