//! portico-core - Session state and endpoint-scoped API client lifecycle.
//!
//! Two components cooperate here:
//!
//! - [`ClientProvider`] owns the user-chosen [`Endpoint`] and the single live
//!   API client bound to it. Changing the endpoint and recreating the client
//!   are separate steps.
//! - [`SessionManager`] runs credential exchanges through whatever client is
//!   current when a login starts and records the resulting [`SessionState`].
//!
//! [`LoginAction`] glues the two together the way a login screen does.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use portico_core::{ClientFactory, ClientProvider, LoginOutcome, SessionManager};
//!
//! # async fn example<F: ClientFactory>(factory: F) -> portico_core::Result<()> {
//! let provider = Arc::new(ClientProvider::new(factory));
//! let sessions = SessionManager::new(Arc::clone(&provider));
//!
//! provider.set_endpoint("https://api.example.com/graphql");
//! provider.create_client();
//!
//! match sessions.login("a@b.com", "hunter2").await? {
//!     LoginOutcome::Success(identity) => println!("welcome {}", identity.subject()),
//!     LoginOutcome::Failure => println!("invalid email or password"),
//!     LoginOutcome::Superseded => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use action::{LoginAction, LoginForm, LoginSignal};
pub use credentials::Credentials;
pub use error::Error;
pub use provider::{ClientHandle, ClientProvider};
pub use session::{LoginOutcome, SessionManager, SessionState};
pub use tokens::AccessToken;
pub use traits::{ApiClient, ClientFactory, Exchange};
pub use types::{Endpoint, Identity};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
