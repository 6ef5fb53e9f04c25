//! portico-graphql - GraphQL-backed API client.
//!
//! [`GraphqlClientFactory`] plugs into [`portico_core::ClientProvider`]; every
//! client it builds shares one HTTP connection pool but is bound to its own
//! endpoint.

mod client;
mod config;
mod operations;

pub use client::{GraphqlClient, GraphqlClientFactory};
pub use config::ClientConfig;
pub use operations::LOGIN_MUTATION;
