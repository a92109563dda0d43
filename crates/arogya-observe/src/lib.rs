//! Observability setup for Arogya.
//!
//! The library crates only emit `tracing` events and spans; this crate owns
//! the subscriber. LLM calls are wrapped in `gen_ai.*` spans by
//! `arogya-core`, which the optional OpenTelemetry layer exports as-is.

pub mod tracing_setup;
