//! Multimodal document model and object storage ports.
//!
//! Both the report summarizer and the outbreak pipeline upload a file to the
//! document model, then stream a generation over it and concatenate the text.

use futures_util::StreamExt;
use futures_util::stream::BoxStream;

use arogya_types::error::UpstreamError;
use arogya_types::report::{Document, UploadedFile};

/// Per-call generation instructions.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Text part sent after the file part.
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// e.g. `application/json`
    pub response_mime_type: Option<String>,
}

/// A hosted model that accepts uploaded files.
pub trait DocumentModel: Send + Sync {
    /// Upload a document to the model's file store.
    fn upload(
        &self,
        document: &Document,
    ) -> impl std::future::Future<Output = Result<UploadedFile, UpstreamError>> + Send;

    /// Stream generated text chunks for `file` under `request`.
    fn generate_stream(
        &self,
        file: &UploadedFile,
        request: &GenerationRequest,
    ) -> impl std::future::Future<
        Output = Result<BoxStream<'static, Result<String, UpstreamError>>, UpstreamError>,
    > + Send;
}

/// Upload `document`, stream a generation over it and concatenate the chunks.
pub async fn upload_and_generate<M: DocumentModel>(
    model: &M,
    document: &Document,
    request: &GenerationRequest,
) -> Result<String, UpstreamError> {
    let file = model.upload(document).await?;
    tracing::debug!(file = %file.name, mime_type = %file.mime_type, "document uploaded");

    let mut stream = model.generate_stream(&file, request).await?;
    let mut text = String::new();
    let mut chunks = 0usize;
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
        chunks += 1;
    }
    tracing::debug!(chunks, chars = text.len(), "generation stream complete");
    Ok(text)
}

/// Object storage that can hand out time-limited download links.
pub trait ObjectStore: Send + Sync {
    /// Store `document` under its file name and return a signed GET URL.
    fn put_signed(
        &self,
        document: &Document,
    ) -> impl std::future::Future<Output = Result<String, UpstreamError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocumentModel;

    #[tokio::test]
    async fn test_chunks_are_concatenated() {
        let model = FakeDocumentModel::streaming(["{\"a\":", " 1", "}"]);
        let doc = Document::new("r.pdf", "application/pdf", b"%PDF".to_vec());
        let text = upload_and_generate(&model, &doc, &GenerationRequest::default())
            .await
            .unwrap();
        assert_eq!(text, "{\"a\": 1}");
        assert_eq!(model.uploaded_names(), vec!["r.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let model = FakeDocumentModel::broken_stream();
        let doc = Document::new("r.pdf", "application/pdf", Vec::new());
        let err = upload_and_generate(&model, &doc, &GenerationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { .. }));
    }
}
