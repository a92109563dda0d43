//! Health and environment news for a city.

use arogya_types::error::{ServiceError, UpstreamError};
use arogya_types::news::{ArticlePage, NewsFeed};

/// Keywords OR-ed together in the article search.
pub const NEWS_KEYWORDS: [&str; 9] = [
    "disease",
    "epidemic",
    "outbreak",
    "virus",
    "infection",
    "pollution",
    "air quality",
    "water contamination",
    "environmental hazard",
];

/// A news aggregator with location lookup and paged article search.
pub trait NewsSource: Send + Sync {
    /// Location URI of the best match for `query`, if any.
    fn suggest_location(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, UpstreamError>> + Send;

    /// One page (1-based) of articles matching any keyword, newest first.
    fn search_articles(
        &self,
        keywords: &[&str],
        location_uri: Option<&str>,
        page: u32,
    ) -> impl std::future::Future<Output = Result<ArticlePage, UpstreamError>> + Send;
}

pub fn location_query(city: &str, country: Option<&str>) -> String {
    match country {
        Some(country) if !country.is_empty() => format!("{city}, {country}"),
        _ => city.to_string(),
    }
}

pub struct NewsService<N: NewsSource> {
    source: N,
    max_items: usize,
}

impl<N: NewsSource> NewsService<N> {
    pub fn new(source: N, max_items: usize) -> Self {
        Self { source, max_items }
    }

    #[tracing::instrument(name = "city_news", skip(self))]
    pub async fn news(&self, city: &str, country: Option<&str>) -> Result<NewsFeed, ServiceError> {
        let location_uri = self
            .source
            .suggest_location(&location_query(city, country))
            .await?;
        if location_uri.is_none() {
            tracing::info!("no location match; searching without a location filter");
        }

        let mut news = Vec::new();
        let mut page = 1;
        while news.len() < self.max_items {
            let result = self
                .source
                .search_articles(&NEWS_KEYWORDS, location_uri.as_deref(), page)
                .await?;
            if result.articles.is_empty() {
                break;
            }
            news.extend(result.articles);
            if page >= result.pages {
                break;
            }
            page += 1;
        }
        news.truncate(self.max_items);
        tracing::info!(count = news.len(), pages = page, "news collected");

        Ok(NewsFeed {
            city: city.to_string(),
            country: country.map(String::from),
            news,
        })
    }
}
