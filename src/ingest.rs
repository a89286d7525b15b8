//! Image file ingestion.
//!
//! Uploaded images are turned into base64 `data:` URIs so they can be
//! previewed right away. Those URIs are also what the export warning flags
//! as not portable to an email client.

use base64::Engine;
use std::path::Path;
use thiserror::Error;

/// Uploads above this size are refused before encoding.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("image file is empty")]
    Empty,
    #[error("image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("{0} is not a supported image")]
    NotAnImage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedImage {
    pub file_name: String,
    pub mime: String,
    pub data_uri: String,
}

pub fn is_embedded(reference: &str) -> bool {
    reference
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Identify an image format from its leading bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]).to_lowercase();
        let head = head.trim_start();
        if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
            Some("image/svg+xml")
        } else {
            None
        }
    }
}

/// Magic bytes first; the file extension only decides when they are
/// inconclusive, and only if it names an image type.
pub fn image_mime(file_name: &str, bytes: &[u8]) -> Option<String> {
    if let Some(mime) = sniff_image_mime(bytes) {
        return Some(mime.to_string());
    }
    mime_guess::from_path(file_name)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.essence_str().to_string())
}

/// Validate and encode an in-memory upload.
pub fn ingest_bytes(file_name: &str, bytes: &[u8]) -> Result<IngestedImage, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(IngestError::TooLarge {
            size: bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    let mime = image_mime(file_name, bytes)
        .ok_or_else(|| IngestError::NotAnImage(file_name.to_string()))?;

    Ok(IngestedImage {
        file_name: file_name.to_string(),
        data_uri: encode_data_uri(&mime, bytes),
        mime,
    })
}

/// Read an image from disk. Nothing is returned unless the whole file was
/// read and accepted.
pub async fn read_image_file(path: &Path) -> Result<IngestedImage, IngestError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    ingest_bytes(&file_name, &bytes)
}
