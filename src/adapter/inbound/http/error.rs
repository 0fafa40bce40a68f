//! Error responses for the HTTP boundary.
//!
//! Every error body has the shape `{"error": {"code": ..., "message": ...}}`
//! and repeats the code in the [`HEADER_X_GATEWAY_ERROR_CODE`] header.

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::GatewayError;

pub const HEADER_X_GATEWAY_ERROR_CODE: &str = "X-Gateway-Error-Code";

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: &'a str,
}

pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::BAD_REQUEST, code, message)
}

pub fn internal_error(code: impl Into<String>, message: impl Into<String>) -> Response {
    create_error(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub fn create_error(
    status: StatusCode,
    code: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    let code = code.into();
    let message = message.into();

    let mut headers = HeaderMap::with_capacity(1);
    if let Ok(val) = HeaderValue::from_str(&code) {
        headers.insert(HEADER_X_GATEWAY_ERROR_CODE, val);
    }

    (
        status,
        headers,
        Json(ErrorResponse {
            error: ErrorDetail {
                code: &code,
                message: &message,
            },
        }),
    )
        .into_response()
}

/// Read the error code back out of a response.
pub fn error_code<B>(response: &axum::http::Response<B>) -> &str {
    response
        .headers()
        .get(HEADER_X_GATEWAY_ERROR_CODE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

impl GatewayError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Timeout { .. } => "request_timeout",
            GatewayError::Internal(_) => "internal_error",
        }
    }
}

// Timeouts are reported as 500 like every other gateway-level failure.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        internal_error(self.code(), self.to_string())
    }
}
