//! Per-unit analysis outcomes.
//!
//! A result is either `Ok` (label, confidence and description, or only a
//! description when the backend found nothing) or `Failed` with an error
//! detail. The constructors below are the only way to build one, which keeps
//! the two shapes from mixing.

use serde::{Deserialize, Serialize};

use super::unit::UnitKind;

/// Description used when the backend returns no candidates.
pub const NO_MATCH_DESCRIPTION: &str = "No relevant information found";

/// Outcome of dispatching one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Ok,
    Failed,
}

/// One label/score pair returned by the inference backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub score: f64,
}

impl Candidate {
    #[must_use]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// The result of analyzing a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sequence_index: usize,
    pub kind: UnitKind,
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    /// Public URL of the persisted image, for image units that were stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
}

impl AnalysisResult {
    /// A successful match against the top candidate.
    #[must_use]
    pub fn matched(index: usize, kind: UnitKind, label: impl Into<String>, score: f64) -> Self {
        let label = label.into();
        let confidence = clamp_confidence(score);
        let description = describe(kind, &label, confidence);
        Self {
            sequence_index: index,
            kind,
            status: UnitStatus::Ok,
            label: Some(label),
            confidence: Some(confidence),
            description: Some(description),
            error_detail: None,
            asset_url: None,
        }
    }

    /// A successful call that produced no candidates.
    #[must_use]
    pub fn no_match(index: usize, kind: UnitKind) -> Self {
        Self {
            sequence_index: index,
            kind,
            status: UnitStatus::Ok,
            label: None,
            confidence: None,
            description: Some(NO_MATCH_DESCRIPTION.to_string()),
            error_detail: None,
            asset_url: None,
        }
    }

    /// A failed unit. An empty detail is replaced so the field is never blank.
    #[must_use]
    pub fn failed(index: usize, kind: UnitKind, detail: impl Into<String>) -> Self {
        let mut detail = detail.into();
        if detail.trim().is_empty() {
            detail = "unknown error".to_string();
        }
        Self {
            sequence_index: index,
            kind,
            status: UnitStatus::Failed,
            label: None,
            confidence: None,
            description: None,
            error_detail: Some(detail),
            asset_url: None,
        }
    }

    /// Translate a backend candidate list. The first candidate wins.
    #[must_use]
    pub fn from_candidates(index: usize, kind: UnitKind, candidates: Vec<Candidate>) -> Self {
        match candidates.into_iter().next() {
            Some(top) => Self::matched(index, kind, top.label, top.score),
            None => Self::no_match(index, kind),
        }
    }

    /// Attach the public URL of the stored image.
    #[must_use]
    pub fn with_asset_url(mut self, url: impl Into<String>) -> Self {
        self.asset_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == UnitStatus::Ok
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == UnitStatus::Failed
    }
}

fn clamp_confidence(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

fn describe(kind: UnitKind, label: &str, confidence: f64) -> String {
    match kind {
        UnitKind::Text => format!("Text classified as '{label}' (confidence {confidence:.2})"),
        UnitKind::Image => format!("Image shows '{label}' (confidence {confidence:.2})"),
    }
}
