//! Custom Search JSON API article search.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use arogya_core::content::ArticleSearch;
use arogya_types::content::ArticleRecommendation;
use arogya_types::error::UpstreamError;

use super::get_json;

const SERVICE: &str = "custom search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
    display_link: Option<String>,
}

impl From<SearchItem> for ArticleRecommendation {
    fn from(item: SearchItem) -> Self {
        ArticleRecommendation {
            title: item.title,
            snippet: item.snippet,
            url: item.link,
            source: item.display_link,
        }
    }
}

/// Searches a programmable search engine (`cx`) with the shared Google key.
pub struct CustomSearchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    engine_id: Option<String>,
}

impl CustomSearchClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<SecretString>,
        engine_id: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
            engine_id,
        }
    }
}

impl ArticleSearch for CustomSearchClient {
    async fn search_articles(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ArticleRecommendation>, UpstreamError> {
        let (Some(key), Some(cx)) = (self.api_key.as_ref(), self.engine_id.as_deref()) else {
            return Err(UpstreamError::NotConfigured(SERVICE.to_string()));
        };

        let num = max_results.to_string();
        let request = self.client.get(&self.base_url).query(&[
            ("key", key.expose_secret()),
            ("cx", cx),
            ("q", query),
            ("num", num.as_str()),
            ("safe", "active"),
        ]);

        let response: SearchResponse = get_json(request, SERVICE).await?;
        Ok(response
            .items
            .into_iter()
            .map(ArticleRecommendation::from)
            .collect())
    }
}
