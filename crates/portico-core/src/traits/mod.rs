//! Seams between the core and concrete API clients.

mod client;

pub use client::{ApiClient, ClientFactory, Exchange};
