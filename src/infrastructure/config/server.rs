//! HTTP server configuration.

use serde::Deserialize;

/// Inbound listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind. Defaults to "0.0.0.0:8000".
    pub bind: String,

    /// Whole-request deadline in milliseconds. When it expires in-flight
    /// backend calls are cancelled and the request fails as a whole.
    pub request_timeout_ms: u64,

    /// Maximum accepted multipart body size in bytes.
    pub max_body_bytes: usize,

    /// Allow any origin, method and header.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".into(),
            request_timeout_ms: 60_000,
            max_body_bytes: 32 * 1024 * 1024,
            cors_permissive: true,
        }
    }
}
