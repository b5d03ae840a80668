//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{login, logout, reset_token, status, whoami};

/// Session client for the authentication service.
#[derive(Parser, Debug)]
#[command(name = "sesh")]
#[command(author, version = env!("SESH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the session lives.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Authentication service base URL
    #[arg(long, env = "SESH_SERVER", default_value = "http://localhost:9527", global = true)]
    pub server: String,

    /// Directory holding the token and cached views
    #[arg(long, env = "SESH_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the token
    Login(login::LoginArgs),

    /// Fetch and display the identity of the stored token
    Whoami(whoami::WhoamiArgs),

    /// Log out on the server and clear the local session
    Logout(logout::LogoutArgs),

    /// Clear the local session without contacting the server
    ResetToken(reset_token::ResetTokenArgs),

    /// Display the local session without contacting the server
    Status(status::StatusArgs),
}
