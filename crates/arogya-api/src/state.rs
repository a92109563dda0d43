//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over port traits, but AppState pins them to the
//! concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use arogya_core::chat::prompt::TriageSettings;
use arogya_core::chat::service::TriageService;
use arogya_core::content::ContentService;
use arogya_core::news::NewsService;
use arogya_core::outbreak::markers::MarkerSettings;
use arogya_core::outbreak::service::OutbreakService;
use arogya_core::places::service::HospitalService;
use arogya_core::report::ReportService;
use arogya_infra::bulletin::idsp::IdspBulletinSource;
use arogya_infra::bulletin::pdf::LopdfTrimmer;
use arogya_infra::config::{load_global_config, resolve_data_dir};
use arogya_infra::gemini::GeminiClient;
use arogya_infra::google::custom_search::CustomSearchClient;
use arogya_infra::google::places::PlacesClient;
use arogya_infra::google::youtube::YouTubeClient;
use arogya_infra::llm::create_chat_provider;
use arogya_infra::llm::openai_compat::OpenAiCompatibleProvider;
use arogya_infra::news::EventRegistryClient;
use arogya_infra::secret::env::EnvSecrets;
use arogya_infra::sqlite::chat::SqliteChatRepository;
use arogya_infra::sqlite::pool::{DatabasePool, database_url};
use arogya_infra::storage::gcs::{GcsStore, ServiceAccount};
use arogya_types::config::GlobalConfig;

/// Timeout for the shared client used by the Maps, YouTube and search adapters.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteTriageService = TriageService<SqliteChatRepository, OpenAiCompatibleProvider>;

pub type ConcreteHospitalService =
    HospitalService<SqliteChatRepository, OpenAiCompatibleProvider, PlacesClient>;

pub type ConcreteReportService = ReportService<GeminiClient, GcsStore>;

pub type ConcreteOutbreakService =
    OutbreakService<IdspBulletinSource, LopdfTrimmer, GeminiClient, PlacesClient>;

pub type ConcreteContentService =
    ContentService<SqliteChatRepository, YouTubeClient, CustomSearchClient>;

pub type ConcreteNewsService = NewsService<EventRegistryClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub triage: Arc<ConcreteTriageService>,
    pub hospitals: Arc<ConcreteHospitalService>,
    pub reports: Arc<ConcreteReportService>,
    pub outbreaks: Arc<ConcreteOutbreakService>,
    pub content: Arc<ConcreteContentService>,
    pub news: Arc<ConcreteNewsService>,
    pub chat_repo: SqliteChatRepository,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

/// Duplicate an optional key for a second adapter that needs it.
fn share(secret: &Option<SecretString>) -> Option<SecretString> {
    secret
        .as_ref()
        .map(|s| SecretString::from(s.expose_secret().to_string()))
}

/// Build the report store when both the bucket and credentials are present.
///
/// A broken credentials file disables storage with a warning; summaries still work.
fn build_store(
    http: &reqwest::Client,
    config: &GlobalConfig,
    secrets: &EnvSecrets,
) -> Option<GcsStore> {
    let (Some(bucket), Some(credentials)) = (&secrets.bucket_name, &secrets.google_credentials)
    else {
        tracing::info!("object storage not configured; report URLs will be omitted");
        return None;
    };

    let store = ServiceAccount::from_file(credentials)
        .and_then(|account| GcsStore::new(http.clone(), &config.storage, bucket, account));
    match store {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "object storage disabled");
            None
        }
    }
}

impl AppState {
    /// Initialize the application state from the environment: resolve the
    /// data directory, load `config.toml`, read API keys, open the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;
        Self::build(data_dir, config, EnvSecrets::from_env()).await
    }

    /// Wire every service from explicit config and credentials.
    pub async fn build(
        data_dir: PathBuf,
        config: GlobalConfig,
        secrets: EnvSecrets,
    ) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("failed to open the database")?;
        let chat_repo = SqliteChatRepository::new(db_pool);

        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        let provider = Arc::new(create_chat_provider(&config.chat, share(&secrets.groq_api_key))?);
        let settings = TriageSettings {
            temperature: config.chat.temperature,
            max_tokens: config.chat.max_tokens,
        };
        let triage = TriageService::new(chat_repo.clone(), Arc::clone(&provider), settings);

        let places = PlacesClient::new(
            http.clone(),
            &config.google.maps_base_url,
            share(&secrets.google_places_api_key),
        );
        let hospitals = HospitalService::new(chat_repo.clone(), provider, places);

        let reports = ReportService::new(
            GeminiClient::new(config.gemini.clone(), share(&secrets.gemini_api_key))?,
            build_store(&http, &config, &secrets),
        );

        let outbreaks = OutbreakService::new(
            IdspBulletinSource::new(&config.outbreak)?,
            LopdfTrimmer,
            GeminiClient::new(config.gemini.clone(), share(&secrets.gemini_api_key))?,
            PlacesClient::new(
                http.clone(),
                &config.google.maps_base_url,
                share(&secrets.google_places_api_key),
            ),
            config.outbreak.header_pages,
            MarkerSettings {
                radius_per_case: config.outbreak.radius_per_case,
                region: config.outbreak.geocode_region.clone(),
            },
        );

        let content = ContentService::new(
            chat_repo.clone(),
            YouTubeClient::new(
                http.clone(),
                &config.google.youtube_base_url,
                share(&secrets.youtube_api_key),
            ),
            CustomSearchClient::new(
                http.clone(),
                &config.google.custom_search_base_url,
                share(&secrets.youtube_api_key),
                secrets.search_engine_id.clone(),
            ),
            config.google.max_results,
        );

        let news = NewsService::new(
            EventRegistryClient::new(&config.news.base_url, share(&secrets.event_registry_api_key))?,
            config.news.max_items,
        );

        Ok(Self {
            triage: Arc::new(triage),
            hospitals: Arc::new(hospitals),
            reports: Arc::new(reports),
            outbreaks: Arc::new(outbreaks),
            content: Arc::new(content),
            news: Arc::new(news),
            chat_repo,
            config: Arc::new(config),
            data_dir,
        })
    }

    /// State over a fresh database in `data_dir` with default config and no
    /// API keys.
    #[cfg(test)]
    pub async fn offline(data_dir: &std::path::Path) -> anyhow::Result<Self> {
        Self::build(
            data_dir.to_path_buf(),
            GlobalConfig::default(),
            EnvSecrets::default(),
        )
        .await
    }
}
