//! Endpoint type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The network location an API client targets, as typed by the user.
///
/// No format is enforced here. An endpoint that is not a usable URL is
/// accepted, stored and bound to a client; the failure surfaces when that
/// client first issues a request.
///
/// # Example
///
/// ```
/// use portico_core::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.example.com");
/// assert_eq!(endpoint.as_str(), "https://api.example.com");
///
/// // Half-typed values are fine too.
/// let partial = Endpoint::new("https://api.exa");
/// assert!(!partial.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint from any string.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Returns the endpoint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing has been entered.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
