//! Event Registry news aggregator client.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use arogya_core::news::NewsSource;
use arogya_types::error::UpstreamError;
use arogya_types::news::ArticlePage;

const SERVICE: &str = "event registry";

/// Articles requested per page (the API maximum).
const PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationSuggestion {
    wiki_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticlesEnvelope {
    articles: Option<ArticleResults>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleResults {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(default)]
    pages: u32,
}

pub struct EventRegistryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl EventRegistryClient {
    pub fn new(base_url: &str, api_key: Option<SecretString>) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn key(&self) -> Result<&str, UpstreamError> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| UpstreamError::NotConfigured(SERVICE.to_string()))
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE.to_string(),
                status: response.status().as_u16(),
            });
        }
        response
            .json()
            .await
            .map_err(|e| UpstreamError::decode(SERVICE, e))
    }
}

impl NewsSource for EventRegistryClient {
    async fn suggest_location(&self, query: &str) -> Result<Option<String>, UpstreamError> {
        let key = self.key()?;
        let request = self
            .client
            .get(format!("{}/api/v1/suggestLocationsFast", self.base_url))
            .query(&[("prefix", query), ("lang", "eng"), ("apiKey", key)]);

        let suggestions: Vec<LocationSuggestion> = self.send_json(request).await?;
        Ok(suggestions.into_iter().find_map(|s| s.wiki_uri))
    }

    async fn search_articles(
        &self,
        keywords: &[&str],
        location_uri: Option<&str>,
        page: u32,
    ) -> Result<ArticlePage, UpstreamError> {
        let key = self.key()?;
        let mut body = serde_json::json!({
            "action": "getArticles",
            "keyword": keywords,
            "keywordOper": "or",
            "dataType": ["news"],
            "resultType": "articles",
            "articlesSortBy": "date",
            "articlesCount": PAGE_SIZE,
            "articlesPage": page,
            "apiKey": key,
        });
        if let Some(uri) = location_uri {
            body["locationUri"] = serde_json::Value::String(uri.to_string());
        }

        let request = self
            .client
            .post(format!("{}/api/v1/article/getArticles", self.base_url))
            .json(&body);
        let envelope: ArticlesEnvelope = self.send_json(request).await?;

        if let Some(error) = envelope.error {
            return Err(UpstreamError::decode(SERVICE, error));
        }
        let results = envelope
            .articles
            .ok_or_else(|| UpstreamError::decode(SERVICE, "response has no articles"))?;
        tracing::debug!(page, pages = results.pages, count = results.results.len(), "news page");

        Ok(ArticlePage {
            articles: results.results,
            pages: results.pages,
        })
    }
}
