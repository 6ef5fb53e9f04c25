//! GraphQL operations and wire types.

use serde::{Deserialize, Serialize};

/// The login mutation sent to the server.
pub const LOGIN_MUTATION: &str = "mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) { success token user { id } } }";

/// Operation name of [`LOGIN_MUTATION`].
pub(crate) const LOGIN_OPERATION: &str = "Login";

/// GraphQL request envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphqlRequest<'a, V> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: V,
}

/// Variables for the login mutation.
#[derive(Serialize)]
pub(crate) struct LoginVariables<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

// Hide password in Debug output
impl std::fmt::Debug for LoginVariables<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginVariables")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<D> {
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<D> GraphqlResponse<D> {
    /// Returns the first error message, if the server sent any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

/// A single GraphQL error.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlError {
    pub message: String,
}

/// `data` of the login mutation.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    pub login: Option<LoginPayload>,
}

/// Result of the login mutation.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginPayload {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginUser {
    pub id: String,
}
