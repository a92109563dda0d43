//! Symptom triage conversation and disease extraction.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, the triage prompt, the disease extractor and the
//! `TriageService` that ties them together.

pub mod extractor;
pub mod prompt;
pub mod repository;
pub mod service;
