//! Document upload contract and validation.
//!
//! Validation is pass/fail only: the bytes are relayed to the
//! document-understanding agent unmodified, owned by the request, and never
//! retained afterwards.

use bytes::Bytes;
use mime::Mime;

use crate::error::{GatewayError, GatewayResult};

/// Relay size cap for uploaded documents.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_TYPES: [&str; 3] = ["application/pdf", "image/png", "image/jpeg"];

const FALLBACK_FILENAME: &str = "document";

/// A file attached to a document-understanding request.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Sanitized client-supplied filename.
    pub filename: String,
    /// Declared content type.
    pub content_type: Mime,
    /// The raw file content.
    pub bytes: Bytes,
}

impl DocumentUpload {
    /// Builds an upload, sanitizing the client-supplied filename.
    #[must_use]
    pub fn new(filename: Option<&str>, content_type: Mime, bytes: Bytes) -> Self {
        Self {
            filename: sanitize_filename(filename),
            content_type,
            bytes,
        }
    }

    /// Size of the file content in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Enforces the content-type allowlist and the size cap.
    pub fn validate(&self) -> GatewayResult<()> {
        let essence = self.content_type.essence_str();
        if !ALLOWED_TYPES.contains(&essence) {
            return Err(GatewayError::UnsupportedMediaType(format!(
                "Unsupported file type: {essence}. Allowed types are PDF, PNG and JPEG"
            )));
        }
        if self.size_bytes() > MAX_DOCUMENT_BYTES {
            return Err(GatewayError::PayloadTooLarge(
                "File too large. Maximum size is 10MB".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keeps the basename only, restricted to a safe character set. Prevents
/// path traversal via the filename header.
fn sanitize_filename(raw: Option<&str>) -> String {
    let base = raw
        .unwrap_or(FALLBACK_FILENAME)
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(FALLBACK_FILENAME);

    let safe: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect();

    let safe = safe.trim();
    if safe.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        safe.to_string()
    }
}
