//! Analysis units and the inbound request they are decomposed from.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which remote operation a unit is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Text,
    Image,
}

impl UnitKind {
    /// Lowercase name used in logs and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One uploaded image as delivered by the transport boundary.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub bytes: Bytes,
    pub filename: Option<String>,
}

impl ImagePart {
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, filename: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename,
        }
    }
}

/// A parsed multi-part chat request: optional text plus ordered images.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub text: Option<String>,
    pub images: Vec<ImagePart>,
}

impl ChatRequest {
    #[must_use]
    pub fn new(text: Option<String>, images: Vec<ImagePart>) -> Self {
        Self { text, images }
    }

    /// Number of analysis units this request decomposes into.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        usize::from(self.has_text()) + self.images.len()
    }

    /// Text only counts when present and non-empty.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Unit payload: a UTF-8 string or an owned image buffer.
#[derive(Debug, Clone)]
pub enum UnitPayload {
    Text(String),
    Image {
        bytes: Bytes,
        filename: Option<String>,
    },
}

/// One independently dispatchable piece of input.
///
/// Immutable after construction. The sequence index is the unit's position
/// in the original request and is echoed by its result.
#[derive(Debug, Clone)]
pub struct AnalysisUnit {
    index: usize,
    payload: UnitPayload,
}

impl AnalysisUnit {
    #[must_use]
    pub fn text(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            payload: UnitPayload::Text(text.into()),
        }
    }

    #[must_use]
    pub fn image(index: usize, bytes: impl Into<Bytes>, filename: Option<String>) -> Self {
        Self {
            index,
            payload: UnitPayload::Image {
                bytes: bytes.into(),
                filename,
            },
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        match self.payload {
            UnitPayload::Text(_) => UnitKind::Text,
            UnitPayload::Image { .. } => UnitKind::Image,
        }
    }

    #[must_use]
    pub const fn payload(&self) -> &UnitPayload {
        &self.payload
    }

    /// Original filename of an image unit, if the client sent one.
    #[must_use]
    pub fn source_filename(&self) -> Option<&str> {
        match &self.payload {
            UnitPayload::Image { filename, .. } => filename.as_deref(),
            UnitPayload::Text(_) => None,
        }
    }

    /// Lowercased extension of the source filename, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.source_filename()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}
