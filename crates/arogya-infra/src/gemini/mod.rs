//! Gemini multimodal document model over the REST API.
//!
//! Files go through the resumable upload protocol (a `start` request that
//! returns an upload URL, then one `upload, finalize` request carrying the
//! bytes). Generation uses `streamGenerateContent` with `alt=sse`, parsed
//! with `eventsource-stream`.
//!
//! The API key is only exposed when building the request query string.

pub mod types;

use std::time::Duration;

use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use secrecy::{ExposeSecret, SecretString};

use arogya_core::document::{DocumentModel, GenerationRequest};
use arogya_types::config::GeminiConfig;
use arogya_types::error::UpstreamError;
use arogya_types::report::{Document, UploadedFile};

use self::types::{
    Content, FileData, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    UploadResponse,
};

const SERVICE: &str = "gemini";

/// Gemini client. Does NOT derive Debug.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, api_key: Option<SecretString>) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn key(&self) -> Result<&str, UpstreamError> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| UpstreamError::NotConfigured(SERVICE.to_string()))
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn build_request(&self, file: &UploadedFile, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            mime_type: file.mime_type.clone(),
                            file_uri: file.uri.clone(),
                        },
                    },
                    Part::Text {
                        text: request.prompt.clone(),
                    },
                ],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part::Text { text: text.clone() }],
            }),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: request.response_mime_type.clone(),
            },
        }
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), UpstreamError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(UpstreamError::Status {
            service: SERVICE.to_string(),
            status: status.as_u16(),
        })
    }
}

impl DocumentModel for GeminiClient {
    async fn upload(&self, document: &Document) -> Result<UploadedFile, UpstreamError> {
        let key = self.key()?;

        let start = self
            .client
            .post(format!("{}/upload/v1beta/files", self.base()))
            .query(&[("key", key)])
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header(
                "X-Goog-Upload-Header-Content-Length",
                document.bytes.len().to_string(),
            )
            .header("X-Goog-Upload-Header-Content-Type", &document.content_type)
            .json(&serde_json::json!({ "file": { "display_name": document.file_name } }))
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        check_status(&start)?;

        let upload_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::decode(SERVICE, "missing x-goog-upload-url header"))?;

        let finished = self
            .client
            .post(&upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(document.bytes.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        check_status(&finished)?;

        let uploaded: UploadResponse = finished
            .json()
            .await
            .map_err(|e| UpstreamError::decode(SERVICE, e))?;
        tracing::debug!(name = %uploaded.file.name, "file registered with gemini");

        Ok(UploadedFile {
            name: uploaded.file.name,
            uri: uploaded.file.uri,
            mime_type: uploaded.file.mime_type,
        })
    }

    async fn generate_stream(
        &self,
        file: &UploadedFile,
        request: &GenerationRequest,
    ) -> Result<BoxStream<'static, Result<String, UpstreamError>>, UpstreamError> {
        let key = self.key()?;
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent",
            self.base(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "sse"), ("key", key)])
            .json(&self.build_request(file, request))
            .send()
            .await
            .map_err(|e| UpstreamError::transport(SERVICE, e))?;
        check_status(&response)?;

        let chunks = response
            .bytes_stream()
            .eventsource()
            .filter_map(|event| async move {
                match event {
                    Ok(event) if event.data.trim().is_empty() => None,
                    Ok(event) => Some(
                        serde_json::from_str::<GenerateContentResponse>(&event.data)
                            .map(|chunk| chunk.text())
                            .map_err(|e| UpstreamError::decode(SERVICE, e)),
                    ),
                    Err(e) => Some(Err(UpstreamError::transport(SERVICE, e))),
                }
            });

        Ok(chunks.boxed())
    }
}
