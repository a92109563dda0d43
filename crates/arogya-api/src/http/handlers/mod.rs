//! HTTP request handlers for the REST API.

pub mod chat;
pub mod content;
pub mod hospitals;
pub mod news;
pub mod outbreaks;
pub mod report;
