//! HTTPS inference backend client.
//!
//! Sends one analysis unit per call: text as a JSON body, images as a
//! multipart file part. Every outcome, including transport failures, is
//! folded into an [`AnalysisResult`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};
use url::Url;

use super::wire::{content_type_for, parse_candidates, truncate_body, TextRequest};
use crate::domain::{AnalysisResult, AnalysisUnit, Candidate, UnitPayload};
use crate::error::{BackendError, ConfigError, Error, Result};
use crate::infrastructure::config::backend::BackendConfig;
use crate::port::outbound::backend::InferenceBackend;

/// Filename sent for image parts the client uploaded without one.
const DEFAULT_IMAGE_NAME: &str = "upload";

/// Inference backend reached over HTTP(S) with a bearer credential.
///
/// Holds no per-request state and is shared across all requests.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// HTTP client for API requests.
    client: Client,
    /// Bearer token for authentication.
    api_token: String,
    /// Text-analysis endpoint.
    text_url: Url,
    /// Image-analysis endpoint.
    image_url: Url,
}

impl HttpBackend {
    /// Create a client with explicit endpoints and credential.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is blank, or an HTTP error
    /// if the underlying client cannot be built.
    pub fn new(
        text_url: Url,
        image_url: Url,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "backend.api_token",
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chatgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_token,
            text_url,
            image_url,
        })
    }

    /// Create a client from configuration, reading the bearer token from
    /// the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or the endpoints are
    /// invalid. Both are startup failures.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let token = config.api_token()?;
        Self::new(
            config.text_url()?,
            config.image_url()?,
            token,
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn request_for(&self, unit: &AnalysisUnit) -> std::result::Result<RequestBuilder, BackendError> {
        let request = match unit.payload() {
            UnitPayload::Text(text) => self
                .client
                .post(self.text_url.clone())
                .json(&TextRequest { inputs: text }),
            UnitPayload::Image { bytes, filename } => {
                let extension = unit.extension();
                let part = Part::stream_with_length(bytes.clone(), bytes.len() as u64)
                    .file_name(
                        filename
                            .clone()
                            .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string()),
                    )
                    .mime_str(content_type_for(extension.as_deref()))
                    .map_err(|e| BackendError::Request(e.to_string()))?;
                self.client
                    .post(self.image_url.clone())
                    .multipart(Form::new().part("file", part))
            }
        };
        Ok(request.bearer_auth(&self.api_token))
    }

    async fn call(&self, unit: &AnalysisUnit) -> std::result::Result<Vec<Candidate>, BackendError> {
        let response = self
            .request_for(unit)?
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(BackendError::Transport)?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        parse_candidates(&body)
    }
}

#[async_trait]
impl InferenceBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn analyze(&self, unit: &AnalysisUnit) -> AnalysisResult {
        let started = Instant::now();
        let (index, kind) = (unit.index(), unit.kind());

        match self.call(unit).await {
            Ok(candidates) => {
                debug!(
                    index,
                    %kind,
                    candidates = candidates.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Backend call complete"
                );
                AnalysisResult::from_candidates(index, kind, candidates)
            }
            Err(e) => {
                warn!(
                    index,
                    %kind,
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Backend call failed"
                );
                AnalysisResult::failed(index, kind, e.to_string())
            }
        }
    }
}
