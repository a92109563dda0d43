//! HTTP/REST API layer for Arogya.
//!
//! Axum routes under `/api/` with plain JSON bodies, `{"error": ...}` error
//! responses and permissive CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
