//! Object storage for uploaded medical reports.
//!
//! [`gcs::GcsStore`] implements the `ObjectStore` port from `arogya-core`
//! against Google Cloud Storage, authenticating with a service account.

use std::path::Path;

pub mod gcs;

/// Guess a report's MIME type from its file name.
///
/// Used when a multipart part arrives without a content type.
pub fn detect_mime(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",

        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",

        _ => "application/octet-stream",
    }
    .to_string()
}

/// Last path component of an uploaded file name.
///
/// Clients sometimes send the full local path; only the base name is stored.
pub fn object_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or("upload")
}
