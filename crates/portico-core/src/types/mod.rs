//! Core value types.

mod endpoint;
mod identity;

pub use endpoint::Endpoint;
pub use identity::Identity;
