//! Inference backend configuration.
//!
//! The bearer credential never lives in the config file. The file names the
//! environment variable that holds it, and the variable is read once when
//! the backend client is constructed.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Inference backend connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the inference host (http or https).
    #[serde(default)]
    pub base_url: String,

    /// Path appended to `base_url` for text analysis.
    ///
    /// Defaults to "/analyze/text".
    #[serde(default = "default_text_path")]
    pub text_path: String,

    /// Path appended to `base_url` for image analysis.
    ///
    /// Defaults to "/analyze/image".
    #[serde(default = "default_image_path")]
    pub image_path: String,

    /// Per-call timeout in milliseconds. Defaults to 30000.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Environment variable holding the bearer token.
    ///
    /// Defaults to `INFERENCE_API_TOKEN`.
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,
}

impl BackendConfig {
    /// Read the bearer token from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the variable is unset or blank.
    pub fn api_token(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(ConfigError::MissingEnv {
                var: self.api_token_env.clone(),
            }),
        }
    }

    /// Full URL for the text-analysis operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn text_url(&self) -> Result<Url, ConfigError> {
        self.endpoint("text_path", &self.text_path)
    }

    /// Full URL for the image-analysis operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the joined URL does not parse.
    pub fn image_url(&self) -> Result<Url, ConfigError> {
        self.endpoint("image_path", &self.image_path)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.base_url",
            });
        }
        let base = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "backend.base_url",
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url",
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.api_token_env.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "backend.api_token_env",
            });
        }
        self.text_url()?;
        self.image_url()?;
        Ok(())
    }

    fn endpoint(&self, field: &'static str, path: &str) -> Result<Url, ConfigError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            text_path: default_text_path(),
            image_path: default_image_path(),
            timeout_ms: default_timeout_ms(),
            api_token_env: default_api_token_env(),
        }
    }
}

fn default_text_path() -> String {
    "/analyze/text".into()
}

fn default_image_path() -> String {
    "/analyze/image".into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_api_token_env() -> String {
    "INFERENCE_API_TOKEN".into()
}
