//! Login command implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;

use portico_core::{ClientProvider, LoginAction, LoginForm, LoginSignal, SessionManager};
use portico_graphql::{ClientConfig, GraphqlClientFactory};

use crate::output;
use crate::session::{StoredSession, storage};

#[derive(Args)]
pub struct LoginArgs {
    /// GraphQL server URL
    #[arg(long, env = "PORTICO_SERVER")]
    pub server: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Give up on the server after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("server", &self.server)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let mut config = ClientConfig::default();
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let factory = GraphqlClientFactory::new(config).context("Failed to set up HTTP client")?;
    let provider = Arc::new(ClientProvider::new(factory));
    let action = LoginAction::new(Arc::new(SessionManager::new(provider)));

    action.set_server_uri(args.server);

    eprintln!("{}", "Logging in...".dimmed());

    match action
        .submit(LoginForm::new(args.email, args.password))
        .await
    {
        LoginSignal::NavigateHome(identity) => {
            let stored = StoredSession::new(&action.server_uri(), &identity);
            storage::save_session(&stored).context("Failed to save session")?;

            output::success("Logged in successfully");
            println!();
            output::field("User", identity.subject());
            output::field("Server", action.server_uri().as_str());
            Ok(())
        }
        LoginSignal::ShowRejection => {
            output::error("Invalid email or password");
            Err(anyhow!("login rejected"))
        }
        LoginSignal::ShowError(err) => Err(anyhow::Error::new(err).context("Failed to login")),
        LoginSignal::Ignore => Ok(()),
    }
}
