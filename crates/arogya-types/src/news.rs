//! Health and environment news feed types.

use serde::Serialize;

/// One page of article search results.
///
/// Articles are kept as the aggregator's raw JSON objects.
#[derive(Debug, Clone, Default)]
pub struct ArticlePage {
    pub articles: Vec<serde_json::Value>,
    /// Total number of pages the aggregator reports for the query.
    pub pages: u32,
}

/// News response for a city.
#[derive(Debug, Clone, Serialize)]
pub struct NewsFeed {
    pub city: String,
    pub country: Option<String>,
    pub news: Vec<serde_json::Value>,
}
