//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{login::LoginArgs, whoami::WhoamiArgs};

/// Log in to a GraphQL API server.
#[derive(Parser, Debug)]
#[command(name = "portico")]
#[command(author, version = env!("PORTICO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with an email and password
    Login(LoginArgs),

    /// Display the stored session
    Whoami(WhoamiArgs),
}
