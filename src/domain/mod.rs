//! Transport-agnostic domain types for the fan-out gateway.
//!
//! - [`unit`] - Analysis units decomposed from an inbound request
//! - [`asset`] - Persisted image payloads
//! - [`result`] - Per-unit outcomes and backend candidates
//! - [`response`] - The ordered, aggregated response
//! - [`error`] - Aggregation invariant violations

pub mod asset;
pub mod error;
pub mod id;
pub mod response;
pub mod result;
pub mod unit;

pub use asset::StoredAsset;
pub use error::DomainError;
pub use id::AssetId;
pub use response::AggregatedResponse;
pub use result::{AnalysisResult, Candidate, UnitStatus};
pub use unit::{AnalysisUnit, ChatRequest, ImagePart, UnitKind, UnitPayload};
