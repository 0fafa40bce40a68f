use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
///
/// Every variant is fatal at startup; none of them are produced per request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("missing required environment variable: {var}")]
    MissingEnv { var: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Upload store failures.
///
/// Converted into a failed per-unit result by the dispatcher.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create upload directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write asset {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no stored asset behind url '{url}'")]
    UnknownAsset { url: String },
}

/// Inference backend failures.
///
/// Converted into a failed per-unit result by the backend client.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed backend response: {0}")]
    Malformed(String),

    #[error("failed to build backend request: {0}")]
    Request(String),
}

/// Failures that abort a whole gateway request.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("internal gateway error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        GatewayError::Internal(err.to_string())
    }
}
