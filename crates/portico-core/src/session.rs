//! Session state and the login protocol.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::error::{AuthError, Error};
use crate::provider::ClientProvider;
use crate::traits::{ApiClient, ClientFactory, Exchange};
use crate::types::Identity;
use crate::{Credentials, Result};

/// Whether the process currently holds an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No successful login yet.
    #[default]
    Unauthenticated,
    /// A login succeeded as this identity.
    Authenticated(Identity),
}

impl SessionState {
    /// Returns true if a login has succeeded.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Returns the authenticated identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Unauthenticated => None,
        }
    }
}

/// Result of one login attempt that reached an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The credentials were accepted; the session is now authenticated.
    Success(Identity),
    /// The credentials were rejected.
    Failure,
    /// The client that answered was replaced while the request was in
    /// flight, so the answer was discarded without touching the session.
    Superseded,
}

impl LoginOutcome {
    /// Returns true for [`LoginOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    /// Convert into a `Result`, turning a rejection into
    /// [`AuthError::RejectedCredentials`].
    ///
    /// A superseded outcome becomes `Ok(None)`.
    pub fn into_result(self) -> Result<Option<Identity>> {
        match self {
            LoginOutcome::Success(identity) => Ok(Some(identity)),
            LoginOutcome::Failure => Err(AuthError::RejectedCredentials.into()),
            LoginOutcome::Superseded => Ok(None),
        }
    }
}

/// Drives logins through the provider's current client and owns the
/// resulting session state.
///
/// The manager never holds on to a client between calls: each login borrows
/// whatever is current when it starts, and its result is only applied if
/// that same instance is still current when the response arrives.
pub struct SessionManager<F: ClientFactory> {
    provider: Arc<ClientProvider<F>>,
    state: watch::Sender<SessionState>,
}

impl<F: ClientFactory> SessionManager<F> {
    /// Create an unauthenticated session manager over `provider`.
    pub fn new(provider: Arc<ClientProvider<F>>) -> Self {
        Self {
            provider,
            state: watch::Sender::new(SessionState::Unauthenticated),
        }
    }

    /// Returns the provider this manager logs in through.
    pub fn provider(&self) -> &Arc<ClientProvider<F>> {
        &self.provider
    }

    /// Returns a snapshot of the session state.
    pub fn session_state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch session state transitions.
    ///
    /// # Thread Safety
    ///
    /// Applying a login result reads the provider's client slot and then
    /// writes the session state. Do not hold a `borrow()` of the returned
    /// receiver while calling into the provider (`create_client` in
    /// particular); clone the state out first.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Exchange `identifier` and `secret` with the current client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoClient`] if no client has been created yet, and
    /// [`Error::Transport`] if the exchange failed before a verdict was
    /// reached. Neither changes the session state.
    #[instrument(skip(self, secret))]
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome> {
        self.login_with(Credentials::new(identifier, secret)).await
    }

    /// Same as [`login`](Self::login), taking prepared credentials.
    pub async fn login_with(&self, credentials: Credentials) -> Result<LoginOutcome> {
        let handle = self.provider.current_client().ok_or(Error::NoClient)?;
        debug!(
            endpoint = %handle.endpoint(),
            generation = handle.generation(),
            "Exchanging credentials"
        );

        let result = handle.exchange_credentials(&credentials).await;
        drop(credentials);

        let applied = self.provider.if_current(&handle, || match result? {
            Exchange::Accepted(identity) => {
                self.transition(SessionState::Authenticated(identity.clone()));
                info!(subject = identity.subject(), "Session authenticated");
                Ok(LoginOutcome::Success(identity))
            }
            Exchange::Rejected => {
                self.transition(SessionState::Unauthenticated);
                Ok(LoginOutcome::Failure)
            }
        });

        applied.unwrap_or_else(|| {
            debug!(
                generation = handle.generation(),
                "Discarding response from superseded client"
            );
            Ok(LoginOutcome::Superseded)
        })
    }

    fn transition(&self, next: SessionState) {
        self.state.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next;
                true
            }
        });
    }
}

impl<F: ClientFactory> std::fmt::Debug for SessionManager<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .finish()
    }
}
