//! Business logic and port trait definitions for Arogya.
//!
//! This crate defines the "ports" (repository and upstream-service traits)
//! that the infrastructure layer implements, and the services that
//! orchestrate them. It depends only on `arogya-types` -- never on
//! `arogya-infra` or any database/HTTP crate.

pub mod chat;
pub mod content;
pub mod document;
pub mod llm;
pub mod news;
pub mod outbreak;
pub mod places;
pub mod report;

#[cfg(test)]
mod testing;
