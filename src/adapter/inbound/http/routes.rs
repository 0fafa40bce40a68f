//! Router and request handlers.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;

use super::error::bad_request;
use super::multipart::read_chat_request;
use crate::application::ChatService;
use crate::infrastructure::config::server::ServerConfig;
use crate::infrastructure::config::storage::StorageConfig;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

/// Build the gateway router.
///
/// Serves `POST /chat` (also `/chat/`), `GET /health` and, when the public
/// prefix is a path, the upload directory under that prefix.
pub fn build_router(chat: ChatService, server: &ServerConfig, storage: &StorageConfig) -> Router {
    let state = AppState {
        chat: Arc::new(chat),
    };

    let mut router = Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/", post(chat_handler))
        .route("/health", get(health))
        .with_state(state);

    if storage.serves_locally() {
        router = router.nest_service(&storage.public_prefix, ServeDir::new(&storage.upload_dir));
    }

    router = router
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

async fn chat_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected non-multipart request");
            return bad_request("invalid_multipart", rejection.body_text());
        }
    };

    let request = match read_chat_request(multipart).await {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected malformed form");
            return e.into_response();
        }
    };

    match state.chat.handle(request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
