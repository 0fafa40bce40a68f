//! Response aggregation.

use std::cmp::Ordering;

use crate::domain::{AggregatedResponse, AnalysisResult, DomainError};

/// Wrap per-unit results into the final ordered response.
///
/// Results are sorted by sequence index and must cover `0..len` exactly
/// once. Failed units are ordinary data and never make this fail; only a
/// broken index set does.
///
/// # Errors
///
/// Returns [`DomainError::MissingIndex`] or [`DomainError::DuplicateIndex`]
/// if the result set is not contiguous.
pub fn aggregate(mut results: Vec<AnalysisResult>) -> Result<AggregatedResponse, DomainError> {
    results.sort_by_key(|r| r.sequence_index);

    for (expected, result) in results.iter().enumerate() {
        match result.sequence_index.cmp(&expected) {
            Ordering::Equal => {}
            Ordering::Less => {
                return Err(DomainError::DuplicateIndex {
                    index: result.sequence_index,
                })
            }
            Ordering::Greater => return Err(DomainError::MissingIndex { index: expected }),
        }
    }

    Ok(AggregatedResponse {
        summary: AggregatedResponse::summarize(&results),
        results,
    })
}
