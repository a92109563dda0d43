//! YouTube Data API v3 video search.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use arogya_core::content::VideoSearch;
use arogya_types::content::VideoRecommendation;
use arogya_types::error::UpstreamError;

use super::get_json;

const SERVICE: &str = "youtube";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl YouTubeClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

impl VideoSearch for YouTubeClient {
    async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<VideoRecommendation>, UpstreamError> {
        let key = self
            .api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| UpstreamError::NotConfigured(SERVICE.to_string()))?;

        let max_results = max_results.to_string();
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("videoDuration", "any"),
                ("maxResults", max_results.as_str()),
                ("key", key),
            ]);

        let response: SearchResponse = get_json(request, SERVICE).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(VideoRecommendation {
                    title: item.snippet.title,
                    description: item.snippet.description,
                    url: watch_url(&video_id),
                })
            })
            .collect())
    }
}
