//! Persisted login state.

pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use portico_core::{Endpoint, Identity};

/// A successful login as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub endpoint: Endpoint,
    pub subject: String,
    pub token: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

/// The parts of a stored session that are safe to print.
#[derive(Debug, Serialize)]
pub struct SessionSummary<'a> {
    pub endpoint: &'a str,
    pub subject: &'a str,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(endpoint: &Endpoint, identity: &Identity) -> Self {
        Self {
            endpoint: endpoint.clone(),
            subject: identity.subject().to_string(),
            token: identity.token().map(|t| t.as_str().to_string()),
            logged_in_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SessionSummary<'_> {
        SessionSummary {
            endpoint: self.endpoint.as_str(),
            subject: &self.subject,
            logged_in_at: self.logged_in_at,
        }
    }
}
