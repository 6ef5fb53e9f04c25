//! Login credentials type.

use std::fmt;

/// An (identifier, secret) pair submitted to an endpoint.
///
/// Credentials are transient: the core hands them to the current client and
/// drops them. The secret is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use portico_core::Credentials;
///
/// let creds = Credentials::new("a@b.com", "hunter2");
/// assert_eq!(creds.identifier(), "a@b.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Returns the identifier (usually an email address).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
