//! API client and client factory traits.

use async_trait::async_trait;

use crate::types::{Endpoint, Identity};
use crate::{Credentials, Result};

/// A well-formed answer to a credential exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// The endpoint accepted the credentials.
    Accepted(Identity),
    /// The endpoint understood the request and refused the credentials.
    Rejected,
}

/// A client bound to one endpoint for its whole life.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Returns the endpoint this client was created for.
    fn endpoint(&self) -> &Endpoint;

    /// Submit credentials and wait for the endpoint's verdict.
    ///
    /// Transport faults, non-success statuses and responses that cannot be
    /// interpreted are errors. Only a fully validated response yields an
    /// [`Exchange`].
    async fn exchange_credentials(&self, credentials: &Credentials) -> Result<Exchange>;
}

/// Builds clients for the provider.
///
/// Creation must not fail and must not touch the network; anything wrong
/// with the endpoint is reported by the client on first use.
pub trait ClientFactory: Send + Sync {
    /// Client type produced by this factory.
    type Client: ApiClient;

    /// Create a client bound to `endpoint`.
    fn create(&self, endpoint: Endpoint) -> Self::Client;
}

impl<F, C> ClientFactory for F
where
    F: Fn(Endpoint) -> C + Send + Sync,
    C: ApiClient,
{
    type Client = C;

    fn create(&self, endpoint: Endpoint) -> C {
        self(endpoint)
    }
}
