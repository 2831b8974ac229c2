//! Payload redaction for log lines.
//!
//! Message content can carry anything a user typed. Log lines therefore
//! never include it unless payload logging was explicitly enabled, and even
//! then only a bounded preview.

const PREVIEW_CHARS: usize = 120;

/// Renders a message for logging.
///
/// With payload logging disabled only the length is reported; enabled, the
/// message is truncated to a bounded preview on a char boundary.
#[must_use]
pub fn payload_preview(message: &str, payloads_enabled: bool) -> String {
    let chars = message.chars().count();
    if !payloads_enabled {
        return format!("[{chars} chars]");
    }
    if chars <= PREVIEW_CHARS {
        return message.to_string();
    }
    let mut preview: String = message.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
