//! Domain validation errors.
//!
//! Raised when the aggregator is handed a result set that breaks the
//! dispatcher's contiguity invariant. Individual unit failures are data,
//! never one of these.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A sequence index in `0..len` has no result.
    #[error("result set has no entry for sequence index {index}")]
    MissingIndex {
        /// The absent index.
        index: usize,
    },

    /// A sequence index appears more than once.
    #[error("result set has more than one entry for sequence index {index}")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },
}
