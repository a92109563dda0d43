//! Video and article recommendation types.

use serde::{Deserialize, Serialize};

/// A recommended video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecommendation {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// A recommended article from a custom search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecommendation {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
}

/// One recommendation section: either the items or an error payload.
///
/// A failing section never fails the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Section<T> {
    Items(Vec<T>),
    Failed { error: String },
}

impl<T> Section<T> {
    pub fn failed(error: impl Into<String>) -> Self {
        Section::Failed {
            error: error.into(),
        }
    }
}

/// Recommendations for the most recently diagnosed disease of a session.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBundle {
    pub disease: String,
    pub youtube_videos: Section<VideoRecommendation>,
    pub google_articles: Section<ArticleRecommendation>,
}
