//! Shared domain types for Arogya.
//!
//! Chat sessions, diagnosed diseases, upstream result shapes, configuration
//! and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, uuid, chrono, indexmap, thiserror.

pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod llm;
pub mod news;
pub mod outbreak;
pub mod places;
pub mod report;
