//! Authenticated identity.

use crate::AccessToken;

/// Who a successful login authenticated as.
///
/// The subject is whatever the endpoint uses to name the user; the token,
/// if the endpoint hands one out, is opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    token: Option<AccessToken>,
}

impl Identity {
    /// Create an identity with no session token.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            token: None,
        }
    }

    /// Attach a session token.
    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Returns the subject identifier.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the session token, if any.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }
}
