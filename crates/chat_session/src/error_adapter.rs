//! Maps a failed request onto the terminal state of its placeholder.

use chat_core::MessagePatch;

/// Detail shown when a failure carries no description of its own.
pub const FALLBACK_DETAIL: &str = "Request failed";

/// Text shown in place of an answer for a failed request.
pub fn error_text(detail: Option<&str>) -> String {
    let detail = detail
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(FALLBACK_DETAIL);
    format!("Error: {detail}")
}

/// Patch for a failed request: error text, no citations, rendered immediately.
pub fn error_patch(detail: Option<&str>) -> MessagePatch {
    MessagePatch::failure(error_text(detail))
}
