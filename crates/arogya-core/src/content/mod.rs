//! Video and article recommendations for a session's latest diagnosis.

use arogya_types::chat::UNKNOWN_DISEASE;
use arogya_types::content::{ArticleRecommendation, ContentBundle, Section, VideoRecommendation};
use arogya_types::error::{ServiceError, UpstreamError};

use crate::chat::repository::ChatRepository;

/// Video search (YouTube-style).
pub trait VideoSearch: Send + Sync {
    fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl std::future::Future<Output = Result<Vec<VideoRecommendation>, UpstreamError>> + Send;
}

/// Web article search (custom search engine).
pub trait ArticleSearch: Send + Sync {
    fn search_articles(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ArticleRecommendation>, UpstreamError>> + Send;
}

pub fn content_query(disease: &str) -> String {
    format!("{disease} tips OR treatment OR motivation")
}

fn video_section(
    disease: &str,
    result: Result<Vec<VideoRecommendation>, UpstreamError>,
) -> Section<VideoRecommendation> {
    match result {
        Ok(videos) if videos.is_empty() => {
            Section::failed(format!("No videos found for the disease: {disease}"))
        }
        Ok(videos) => Section::Items(videos),
        Err(UpstreamError::Status { status, .. }) => Section::failed(format!(
            "Failed to fetch data from YouTube API. Status Code: {status}"
        )),
        Err(UpstreamError::Decode { .. }) => {
            Section::failed("Invalid JSON response from YouTube API.")
        }
        Err(e) => Section::failed(e.to_string()),
    }
}

fn article_section(
    result: Result<Vec<ArticleRecommendation>, UpstreamError>,
) -> Section<ArticleRecommendation> {
    match result {
        Ok(articles) => Section::Items(articles),
        Err(e) => Section::failed(e.to_string()),
    }
}

pub struct ContentService<R: ChatRepository, V: VideoSearch, A: ArticleSearch> {
    repo: R,
    videos: V,
    articles: A,
    max_results: u32,
}

impl<R: ChatRepository, V: VideoSearch, A: ArticleSearch> ContentService<R, V, A> {
    pub fn new(repo: R, videos: V, articles: A, max_results: u32) -> Self {
        Self {
            repo,
            videos,
            articles,
            max_results,
        }
    }

    /// Recommendations for the latest disease diagnosed in session `hid`.
    ///
    /// Section failures are reported inside the bundle.
    #[tracing::instrument(name = "recommend_content", skip(self), fields(hid = %hid))]
    pub async fn recommend(&self, hid: &str) -> Result<ContentBundle, ServiceError> {
        let disease = self
            .repo
            .latest_disease(hid)
            .await?
            .map(|d| d.disease)
            .filter(|d| !d.is_empty() && d != UNKNOWN_DISEASE)
            .ok_or_else(|| ServiceError::NotFound(format!("No disease found for HID '{hid}'.")))?;

        let query = content_query(&disease);
        let (videos, articles) = tokio::join!(
            self.videos.search_videos(&query, self.max_results),
            self.articles.search_articles(&query, self.max_results),
        );

        if let Err(e) = &videos {
            tracing::warn!(error = %e, "video search failed");
        }
        if let Err(e) = &articles {
            tracing::warn!(error = %e, "article search failed");
        }

        Ok(ContentBundle {
            youtube_videos: video_section(&disease, videos),
            google_articles: article_section(articles),
            disease,
        })
    }
}
