//! Fan-out configuration.

use serde::Deserialize;

/// Bounds concurrent calls to the inference backend.
///
/// The limit is shared by every request handled by the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum in-flight backend calls. Defaults to the CPU count.
    pub max_concurrency: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get(),
        }
    }
}
