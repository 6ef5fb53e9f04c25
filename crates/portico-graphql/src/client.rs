//! GraphQL HTTP client implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};
use url::Url;

use portico_core::error::TransportError;
use portico_core::{
    AccessToken, ApiClient, ClientFactory, Credentials, Endpoint, Exchange, Identity, Result,
};

use crate::config::ClientConfig;
use crate::operations::{
    GraphqlRequest, GraphqlResponse, LOGIN_MUTATION, LOGIN_OPERATION, LoginData, LoginVariables,
};

/// Builds [`GraphqlClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct GraphqlClientFactory {
    http: reqwest::Client,
}

impl GraphqlClientFactory {
    /// Create a factory from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP stack cannot be initialised (for
    /// example, no TLS backend is available).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(transport_error)?;
        Ok(Self { http })
    }
}

impl ClientFactory for GraphqlClientFactory {
    type Client = GraphqlClient;

    fn create(&self, endpoint: Endpoint) -> GraphqlClient {
        GraphqlClient {
            http: self.http.clone(),
            endpoint,
        }
    }
}

/// A GraphQL client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl GraphqlClient {
    /// Parse the endpoint. Done per request so that a half-typed URL only
    /// fails once it is used.
    fn url(&self) -> Result<Url> {
        let value = self.endpoint.as_str().trim();
        let url = Url::parse(value).map_err(|e| TransportError::InvalidEndpoint {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(TransportError::InvalidEndpoint {
                value: value.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }

        Ok(url)
    }

    /// POST a GraphQL operation and decode the response envelope.
    async fn execute<V, D>(
        &self,
        request: &GraphqlRequest<'_, V>,
    ) -> Result<GraphqlResponse<D>>
    where
        V: serde::Serialize + std::fmt::Debug,
        D: DeserializeOwned,
    {
        let url = self.url()?;
        debug!(operation = request.operation_name, %url, "GraphQL request");
        trace!(variables = ?request.variables, "operation variables");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "GraphQL response");

        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<GraphqlResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|r| r.first_error().map(str::to_string));
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        serde_json::from_slice(&body).map_err(|e| {
            TransportError::MalformedResponse {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ApiClient for GraphqlClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[instrument(skip(self, credentials), fields(endpoint = %self.endpoint, identifier = credentials.identifier()))]
    async fn exchange_credentials(&self, credentials: &Credentials) -> Result<Exchange> {
        let request = GraphqlRequest {
            query: LOGIN_MUTATION,
            operation_name: LOGIN_OPERATION,
            variables: LoginVariables {
                email: credentials.identifier(),
                password: credentials.secret(),
            },
        };

        let response: GraphqlResponse<LoginData> = self.execute(&request).await?;

        let payload = match response.data.as_ref().and_then(|d| d.login.as_ref()) {
            Some(payload) => payload,
            None => {
                let reason = response
                    .first_error()
                    .unwrap_or("response has no login payload")
                    .to_string();
                return Err(TransportError::MalformedResponse { reason }.into());
            }
        };

        if !payload.success {
            debug!("Credentials rejected");
            return Ok(Exchange::Rejected);
        }

        let subject = payload
            .user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TransportError::MalformedResponse {
                reason: "successful login without a user id".to_string(),
            })?;

        let mut identity = Identity::new(subject);
        if let Some(token) = payload.token.as_deref() {
            identity = identity.with_token(AccessToken::new(token));
        }

        Ok(Exchange::Accepted(identity))
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}
