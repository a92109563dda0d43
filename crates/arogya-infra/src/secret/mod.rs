//! Secret resolution for upstream API credentials.
//!
//! Secrets come from environment variables only and are held as
//! `SecretString` so they never end up in debug output or logs.

pub mod env;
