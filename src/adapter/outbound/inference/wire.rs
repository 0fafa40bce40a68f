//! Request and response shapes exchanged with the inference host.

use serde::{Deserialize, Serialize};

use crate::domain::Candidate;
use crate::error::BackendError;

/// Longest backend error body echoed into a result's error detail.
const MAX_ERROR_BODY: usize = 512;

/// JSON body for the text-analysis call.
#[derive(Serialize)]
pub(super) struct TextRequest<'a> {
    pub inputs: &'a str,
}

/// Candidate list as returned by the host.
///
/// Some hosts wrap a single input's candidates in an outer batch array;
/// the first inner list is used in that case.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateList {
    Flat(Vec<Candidate>),
    Batched(Vec<Vec<Candidate>>),
}

/// Parse a successful response body into candidates.
///
/// `null` and `[]` both mean "no candidates".
pub(super) fn parse_candidates(body: &[u8]) -> Result<Vec<Candidate>, BackendError> {
    let parsed: Option<CandidateList> = serde_json::from_slice(body)
        .map_err(|e| BackendError::Malformed(format!("expected a JSON array of {{label, score}}: {e}")))?;

    Ok(match parsed {
        None => Vec::new(),
        Some(CandidateList::Flat(candidates)) => candidates,
        Some(CandidateList::Batched(batches)) => batches.into_iter().next().unwrap_or_default(),
    })
}

/// Trim an error body to something fit for a result's error detail.
pub(super) fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// Content type for an image extension, used on the multipart file part.
pub(super) fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
