//! The login action a login screen runs when its button is pressed.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::session::{LoginOutcome, SessionManager};
use crate::traits::ClientFactory;
use crate::types::{Endpoint, Identity};

/// Email and password as typed into the form.
#[derive(Clone, Default)]
pub struct LoginForm {
    pub identifier: String,
    pub secret: String,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// What the presentation layer should do after a submit.
#[derive(Debug)]
pub enum LoginSignal {
    /// Leave the login view for the authenticated landing view.
    NavigateHome(Identity),
    /// Show the "invalid email or password" indicator.
    ShowRejection,
    /// The endpoint could not be used; show the error.
    ShowError(Error),
    /// A newer submit superseded this one; nothing to do.
    Ignore,
}

/// Binds a login form to the provider and session manager.
#[derive(Debug)]
pub struct LoginAction<F: ClientFactory> {
    sessions: Arc<SessionManager<F>>,
}

impl<F: ClientFactory> LoginAction<F> {
    pub fn new(sessions: Arc<SessionManager<F>>) -> Self {
        Self { sessions }
    }

    /// Returns the session manager behind this action.
    pub fn sessions(&self) -> &Arc<SessionManager<F>> {
        &self.sessions
    }

    /// Server URL field binding. Only stores the value.
    pub fn set_server_uri(&self, uri: impl Into<Endpoint>) {
        self.sessions.provider().set_endpoint(uri);
    }

    /// Returns the server URL field value.
    pub fn server_uri(&self) -> Endpoint {
        self.sessions.provider().endpoint()
    }

    /// Commit the server URL by recreating the client, then log in.
    pub async fn submit(&self, form: LoginForm) -> LoginSignal {
        self.sessions.provider().create_client();

        // Failures go back to the caller only.
        match self.sessions.login(&form.identifier, &form.secret).await {
            Ok(LoginOutcome::Success(identity)) => {
                debug!(subject = identity.subject(), "Navigating away from login");
                LoginSignal::NavigateHome(identity)
            }
            Ok(LoginOutcome::Failure) => LoginSignal::ShowRejection,
            Ok(LoginOutcome::Superseded) => {
                debug!("Ignoring superseded submit");
                LoginSignal::Ignore
            }
            Err(err) => LoginSignal::ShowError(err),
        }
    }
}
