//! Inference backend port.
//!
//! Defines the per-unit analysis interface the dispatcher fans out to.

use async_trait::async_trait;

use crate::domain::{AnalysisResult, AnalysisUnit};

/// Client for the external inference capability.
///
/// The unit's kind selects the remote operation (text vs. image analysis).
///
/// # Thread Safety
///
/// Implementations hold no per-request mutable state and are shared across
/// concurrent requests, so they must be `Send + Sync`.
///
/// # Failure Contract
///
/// [`analyze`](Self::analyze) never returns an error. Non-success status
/// codes, transport failures and malformed payloads are reported as a
/// failed [`AnalysisResult`]. Credential problems surface when the client is
/// constructed, not here.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Return the backend name for logging.
    fn name(&self) -> &'static str;

    /// Analyze one unit and return its result, echoing the unit's index.
    async fn analyze(&self, unit: &AnalysisUnit) -> AnalysisResult;
}
