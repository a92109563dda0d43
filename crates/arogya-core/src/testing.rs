//! In-memory fakes for the ports, shared by the unit tests in this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::Utc;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use uuid::Uuid;

use arogya_types::chat::{ChatHistory, DiagnosedDisease, DiagnosedDiseaseView};
use arogya_types::content::{ArticleRecommendation, VideoRecommendation};
use arogya_types::error::{OutbreakError, RepositoryError, UpstreamError};
use arogya_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};
use arogya_types::news::ArticlePage;
use arogya_types::places::{GeoPoint, Hospital};
use arogya_types::report::{Document, UploadedFile};

use crate::chat::repository::ChatRepository;
use crate::content::{ArticleSearch, VideoSearch};
use crate::document::{DocumentModel, GenerationRequest, ObjectStore};
use crate::llm::provider::LlmProvider;
use crate::news::NewsSource;
use crate::outbreak::{BulletinSource, PageTrimmer};
use crate::places::{Geocoder, PlaceSearch};

// --- LLM ---

pub struct FakeProvider {
    replies: Mutex<VecDeque<String>>,
    failing: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeProvider {
    pub fn replying<const N: usize>(replies: [&str; N]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            failing: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            failing: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing {
            return Err(LlmError::RateLimited);
        }
        let content = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(CompletionResponse {
            id: "fake-1".to_string(),
            content,
            model: "fake-model".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
            },
        })
    }
}

// --- Repository ---

#[derive(Default)]
pub struct MemoryChatRepository {
    histories: Mutex<Vec<ChatHistory>>,
    diseases: Mutex<Vec<DiagnosedDisease>>,
}

impl MemoryChatRepository {
    fn history_id(&self, hid: &str) -> Option<Uuid> {
        self.histories
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.hid == hid)
            .map(|h| h.id)
    }
}

impl ChatRepository for MemoryChatRepository {
    async fn get_or_create(&self, hid: &str) -> Result<ChatHistory, RepositoryError> {
        let mut histories = self.histories.lock().unwrap();
        if let Some(existing) = histories.iter().find(|h| h.hid == hid) {
            return Ok(existing.clone());
        }
        let created = ChatHistory::new(hid);
        histories.push(created.clone());
        Ok(created)
    }

    async fn get(&self, hid: &str) -> Result<Option<ChatHistory>, RepositoryError> {
        Ok(self
            .histories
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.hid == hid)
            .cloned())
    }

    async fn record_turn(
        &self,
        hid: &str,
        utterance: &str,
        reply: &str,
    ) -> Result<ChatHistory, RepositoryError> {
        let mut histories = self.histories.lock().unwrap();
        let idx = match histories.iter().position(|h| h.hid == hid) {
            Some(idx) => idx,
            None => {
                histories.push(ChatHistory::new(hid));
                histories.len() - 1
            }
        };
        histories[idx].conversation.record(utterance, reply);
        Ok(histories[idx].clone())
    }

    async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatHistory>, RepositoryError> {
        let histories = self.histories.lock().unwrap();
        Ok(histories
            .iter()
            .skip(offset.unwrap_or(0) as usize)
            .take(limit.unwrap_or(i64::MAX) as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, hid: &str) -> Result<(), RepositoryError> {
        let id = self.history_id(hid).ok_or(RepositoryError::NotFound)?;
        self.histories.lock().unwrap().retain(|h| h.id != id);
        self.diseases.lock().unwrap().retain(|d| d.history_id != id);
        Ok(())
    }

    async fn add_disease(
        &self,
        hid: &str,
        disease: &str,
    ) -> Result<DiagnosedDisease, RepositoryError> {
        let history_id = self.history_id(hid).ok_or(RepositoryError::NotFound)?;
        let entry = DiagnosedDisease {
            id: Uuid::now_v7(),
            history_id,
            disease: disease.to_string(),
            created_at: Utc::now(),
        };
        self.diseases.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn latest_disease(&self, hid: &str) -> Result<Option<DiagnosedDisease>, RepositoryError> {
        let Some(history_id) = self.history_id(hid) else {
            return Ok(None);
        };
        Ok(self
            .diseases
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.history_id == history_id)
            .max_by_key(|d| d.created_at)
            .cloned())
    }

    async fn list_diseases(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<DiagnosedDiseaseView>, RepositoryError> {
        let histories = self.histories.lock().unwrap();
        let diseases = self.diseases.lock().unwrap();
        Ok(diseases
            .iter()
            .rev()
            .skip(offset.unwrap_or(0) as usize)
            .take(limit.unwrap_or(i64::MAX) as usize)
            .filter_map(|d| {
                let hid = histories.iter().find(|h| h.id == d.history_id)?.hid.clone();
                Some(DiagnosedDiseaseView {
                    hid,
                    disease: d.disease.clone(),
                    created_at: d.created_at,
                })
            })
            .collect())
    }
}

// --- Places ---

#[derive(Default)]
pub struct FakePlaces {
    results: Vec<Hospital>,
    queries: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn with_results(results: Vec<Hospital>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl PlaceSearch for FakePlaces {
    async fn text_search(&self, query: &str) -> Result<Vec<Hospital>, UpstreamError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.clone())
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    known: HashMap<String, GeoPoint>,
    failing: Vec<String>,
    lookups: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn with(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.known.insert(address.to_string(), GeoPoint { lat, lng });
        self
    }

    pub fn failing_on(mut self, address: &str) -> Self {
        self.failing.push(address.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, UpstreamError> {
        self.lookups.lock().unwrap().push(address.to_string());
        if self.failing.iter().any(|a| a == address) {
            return Err(UpstreamError::Status {
                service: "geocoding".to_string(),
                status: 500,
            });
        }
        Ok(self.known.get(address).cloned())
    }
}

// --- Documents ---

pub struct FakeDocumentModel {
    chunks: Vec<String>,
    broken: bool,
    uploads: Mutex<Vec<String>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeDocumentModel {
    pub fn streaming<const N: usize>(chunks: [&str; N]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            broken: false,
            uploads: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn broken_stream() -> Self {
        Self {
            broken: true,
            ..Self::streaming([])
        }
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DocumentModel for FakeDocumentModel {
    async fn upload(&self, document: &Document) -> Result<UploadedFile, UpstreamError> {
        self.uploads.lock().unwrap().push(document.file_name.clone());
        Ok(UploadedFile {
            name: "files/abc123".to_string(),
            uri: "https://files.example/abc123".to_string(),
            mime_type: document.content_type.clone(),
        })
    }

    async fn generate_stream(
        &self,
        _file: &UploadedFile,
        request: &GenerationRequest,
    ) -> Result<BoxStream<'static, Result<String, UpstreamError>>, UpstreamError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.broken {
            let items = vec![
                Ok("{".to_string()),
                Err(UpstreamError::decode("document model", "bad chunk")),
            ];
            return Ok(futures_util::stream::iter(items).boxed());
        }
        let items: Vec<Result<String, UpstreamError>> =
            self.chunks.iter().cloned().map(Ok).collect();
        Ok(futures_util::stream::iter(items).boxed())
    }
}

#[derive(Default)]
pub struct FakeStore;

impl ObjectStore for FakeStore {
    async fn put_signed(&self, document: &Document) -> Result<String, UpstreamError> {
        Ok(format!("https://signed.example/{}", document.file_name))
    }
}

// --- Bulletins ---

pub struct FakeBulletins {
    pdf: Option<Vec<u8>>,
}

impl FakeBulletins {
    pub fn with_pdf(pdf: Vec<u8>) -> Self {
        Self { pdf: Some(pdf) }
    }

    pub fn missing_week() -> Self {
        Self { pdf: None }
    }
}

impl BulletinSource for FakeBulletins {
    async fn locate(&self, year: i32, week: u32) -> Result<String, OutbreakError> {
        match self.pdf {
            Some(_) => Ok(format!("https://bulletins.example/{year}/{week}.pdf")),
            None => Err(OutbreakError::WeekNotFound { year, week }),
        }
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, OutbreakError> {
        self.pdf.clone().ok_or(OutbreakError::DownloadFailed(404))
    }
}

pub struct FakeTrimmer;

impl PageTrimmer for FakeTrimmer {
    fn drop_leading_pages(&self, pdf: &[u8], _count: u32) -> Result<Vec<u8>, OutbreakError> {
        Ok(pdf.to_vec())
    }
}

// --- Content ---

pub struct FakeVideos {
    result: Mutex<Option<Result<Vec<VideoRecommendation>, UpstreamError>>>,
    queries: Mutex<Vec<String>>,
}

impl FakeVideos {
    pub fn ok(videos: Vec<VideoRecommendation>) -> Self {
        Self {
            result: Mutex::new(Some(Ok(videos))),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn err(error: UpstreamError) -> Self {
        Self {
            result: Mutex::new(Some(Err(error))),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl VideoSearch for FakeVideos {
    async fn search_videos(
        &self,
        query: &str,
        _max_results: u32,
    ) -> Result<Vec<VideoRecommendation>, UpstreamError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.result.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
    }
}

pub struct FakeArticles {
    result: Mutex<Option<Result<Vec<ArticleRecommendation>, UpstreamError>>>,
}

impl FakeArticles {
    pub fn ok(articles: Vec<ArticleRecommendation>) -> Self {
        Self {
            result: Mutex::new(Some(Ok(articles))),
        }
    }

    pub fn err(error: UpstreamError) -> Self {
        Self {
            result: Mutex::new(Some(Err(error))),
        }
    }
}

impl ArticleSearch for FakeArticles {
    async fn search_articles(
        &self,
        _query: &str,
        _max_results: u32,
    ) -> Result<Vec<ArticleRecommendation>, UpstreamError> {
        self.result.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
    }
}

// --- News ---

pub struct FakeNews {
    location: Option<String>,
    pages: u32,
    per_page: usize,
    pages_requested: Mutex<Vec<u32>>,
    locations_used: Mutex<Vec<Option<String>>>,
}

impl FakeNews {
    pub fn new(location: Option<&str>, pages: u32, per_page: usize) -> Self {
        Self {
            location: location.map(String::from),
            pages,
            per_page,
            pages_requested: Mutex::new(Vec::new()),
            locations_used: Mutex::new(Vec::new()),
        }
    }

    pub fn pages_requested(&self) -> Vec<u32> {
        self.pages_requested.lock().unwrap().clone()
    }

    pub fn locations_used(&self) -> Vec<Option<String>> {
        self.locations_used.lock().unwrap().clone()
    }
}

impl NewsSource for FakeNews {
    async fn suggest_location(&self, _query: &str) -> Result<Option<String>, UpstreamError> {
        Ok(self.location.clone())
    }

    async fn search_articles(
        &self,
        _keywords: &[&str],
        location_uri: Option<&str>,
        page: u32,
    ) -> Result<ArticlePage, UpstreamError> {
        self.pages_requested.lock().unwrap().push(page);
        self.locations_used
            .lock()
            .unwrap()
            .push(location_uri.map(String::from));
        let articles = (0..self.per_page)
            .map(|i| serde_json::json!({"uri": format!("{page}-{i}")}))
            .collect();
        Ok(ArticlePage {
            articles,
            pages: self.pages,
        })
    }
}
