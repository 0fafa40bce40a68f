//! The final, ordered gateway payload.

use serde::{Deserialize, Serialize};

use super::result::AnalysisResult;
use super::unit::UnitKind;

/// Ordered per-unit results plus a one-line human summary.
///
/// `results[i].sequence_index == i` for every `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    pub summary: String,
    pub results: Vec<AnalysisResult>,
}

impl AggregatedResponse {
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    pub(crate) fn summarize(results: &[AnalysisResult]) -> String {
        if results.is_empty() {
            return "No input provided.".to_string();
        }

        let texts = results.iter().filter(|r| r.kind == UnitKind::Text).count();
        let images = results.len() - texts;
        let failed = results.iter().filter(|r| r.is_failed()).count();

        let mut parts = Vec::with_capacity(2);
        if texts > 0 {
            parts.push(format!("{texts} text"));
        }
        if images > 0 {
            let noun = if images == 1 { "image" } else { "images" };
            parts.push(format!("{images} {noun}"));
        }

        let mut summary = format!("Processed {}", parts.join(" and "));
        if failed > 0 {
            summary.push_str(&format!(" ({failed} failed)"));
        }
        summary.push('.');
        summary
    }
}
