//! Subcommand implementations.

pub mod login;
pub mod whoami;
