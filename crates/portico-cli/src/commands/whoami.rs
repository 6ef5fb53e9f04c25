//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the session as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: WhoamiArgs) -> Result<()> {
    let session = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'portico login' first.")?;

    if args.json {
        return output::json(&session.summary());
    }

    output::field("User", &session.subject);
    output::field("Server", session.endpoint.as_str());
    output::field("Since", &session.logged_in_at.to_rfc3339());

    Ok(())
}
