//! Multipart form decoding.
//!
//! The form carries at most one `text` field and any number of image
//! files. A field counts as an image when it has a filename or its name
//! starts with `image` (so both `image` and `images` work). Other fields
//! are ignored.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::debug;

use super::error::bad_request;
use crate::domain::{ChatRequest, ImagePart};

const TEXT_FIELD: &str = "text";

/// The inbound form could not be decoded.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed multipart body: {0}")]
    Malformed(String),

    #[error("field 'text' given more than once")]
    DuplicateText,

    #[error("field 'text' is not valid UTF-8: {0}")]
    InvalidText(String),
}

impl ValidationError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Malformed(_) => "invalid_multipart",
            ValidationError::DuplicateText => "duplicate_text",
            ValidationError::InvalidText(_) => "invalid_text",
        }
    }
}

impl From<MultipartError> for ValidationError {
    fn from(err: MultipartError) -> Self {
        ValidationError::Malformed(err.body_text())
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        bad_request(self.code(), self.to_string())
    }
}

/// Decode a multipart form into a [`ChatRequest`].
///
/// File fields with no bytes and no filename (an empty browser file input)
/// are skipped.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the body is malformed or `text` is
/// repeated or not UTF-8.
pub async fn read_chat_request(mut multipart: Multipart) -> Result<ChatRequest, ValidationError> {
    let mut text: Option<String> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);

        if filename.is_none() && name == TEXT_FIELD {
            if text.is_some() {
                return Err(ValidationError::DuplicateText);
            }
            let bytes = field.bytes().await?;
            let value = String::from_utf8(bytes.to_vec())
                .map_err(|e| ValidationError::InvalidText(e.to_string()))?;
            text = Some(value);
            continue;
        }

        if filename.is_some() || name.starts_with("image") {
            let bytes = field.bytes().await?;
            let filename = filename.filter(|f| !f.is_empty());
            if bytes.is_empty() && filename.is_none() {
                debug!(field = %name, "Skipping empty file field");
                continue;
            }
            images.push(ImagePart::new(bytes, filename));
            continue;
        }

        debug!(field = %name, "Ignoring unknown form field");
    }

    Ok(ChatRequest::new(text, images))
}
