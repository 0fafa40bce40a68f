//! End-to-end router tests: multipart in, JSON out, uploads served back.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chatgate::adapter::inbound::http::build_router;
use chatgate::adapter::inbound::http::error::error_code;
use chatgate::adapter::outbound::storage::LocalAssetStore;
use chatgate::application::{ChatService, Dispatcher};
use chatgate::domain::AggregatedResponse;
use chatgate::infrastructure::config::server::ServerConfig;
use chatgate::infrastructure::config::storage::StorageConfig;
use chatgate::testkit::backend::{Reply, ScriptedBackend};
use chatgate::testkit::multipart::MultipartBody;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake image body";

struct Harness {
    router: Router,
    backend: Arc<ScriptedBackend>,
    _uploads: TempDir,
}

fn harness_with(backend: ScriptedBackend, timeout: Duration) -> Harness {
    let uploads = tempfile::tempdir().unwrap();
    let storage = StorageConfig {
        upload_dir: uploads.path().to_path_buf(),
        public_prefix: "/static/uploads".into(),
        retention_secs: None,
    };
    let store = LocalAssetStore::new(&storage.upload_dir, &storage.public_prefix).unwrap();

    let backend = Arc::new(backend);
    let dispatcher = Dispatcher::new(backend.clone(), Arc::new(store), 4);
    let chat = ChatService::new(dispatcher, timeout);

    Harness {
        router: build_router(chat, &ServerConfig::default(), &storage),
        backend,
        _uploads: uploads,
    }
}

fn harness() -> Harness {
    harness_with(ScriptedBackend::new(), Duration::from_secs(5))
}

fn post_form(uri: &str, body: MultipartBody) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, MultipartBody::content_type())
        .body(Body::from(body.finish()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn chat_returns_ordered_results_and_serves_uploads() {
    let h = harness();
    let form = MultipartBody::new()
        .text("text", "what is in these?")
        .file("images", "first.png", "image/png", PNG)
        .file("images", "second.jpg", "image/jpeg", b"jpeg bytes");

    let response = send(&h.router, post_form("/chat", form)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: AggregatedResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body.summary, "Processed 1 text and 2 images.");
    let kinds: Vec<String> = body.results.iter().map(|r| r.kind.to_string()).collect();
    assert_eq!(kinds, vec!["text", "image", "image"]);
    assert!(body.results[0].asset_url.is_none());

    let url = body.results[1].asset_url.clone().unwrap();
    assert!(url.starts_with("/static/uploads/"), "{url}");
    assert!(url.ends_with(".png"), "{url}");

    let fetched = send(
        &h.router,
        Request::builder().uri(&url).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_bytes(fetched).await, PNG);
}

#[tokio::test]
async fn trailing_slash_route_is_accepted() {
    let h = harness();
    let form = MultipartBody::new().text("text", "hello");

    let response = send(&h.router, post_form("/chat/", form)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["results"][0]["label"], "text-0");
    assert_eq!(body["results"][0]["status"], "ok");
}

#[tokio::test]
async fn image_only_request_starts_at_zero() {
    let h = harness();
    let form = MultipartBody::new().file("image", "only.png", "image/png", PNG);

    let body = json_body(send(&h.router, post_form("/chat", form)).await).await;

    assert_eq!(body["results"][0]["sequence_index"], 0);
    assert_eq!(body["results"][0]["kind"], "image");
}

#[tokio::test]
async fn form_without_text_or_images_returns_empty_results() {
    let h = harness();
    let form = MultipartBody::new().text("note", "ignored").text("text", "");

    let body = json_body(send(&h.router, post_form("/chat", form)).await).await;

    assert_eq!(body["results"], Value::Array(vec![]));
    assert_eq!(body["summary"], "No input provided.");
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn failed_unit_is_reported_in_a_200_response() {
    let h = harness_with(
        ScriptedBackend::new().reply(1, Reply::Fail("backend returned HTTP 503: busy".into())),
        Duration::from_secs(5),
    );
    let form = MultipartBody::new()
        .text("text", "hi")
        .file("images", "a.png", "image/png", PNG);

    let response = send(&h.router, post_form("/chat", form)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["results"][0]["status"], "ok");
    assert_eq!(body["results"][1]["status"], "failed");
    assert!(body["results"][1]["error_detail"]
        .as_str()
        .unwrap()
        .contains("503"));
    assert_eq!(body["summary"], "Processed 1 text and 1 image (1 failed).");
}

#[tokio::test]
async fn non_multipart_request_is_rejected() {
    let h = harness();
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();

    let response = send(&h.router, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "invalid_multipart");
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "invalid_multipart");
}

#[tokio::test]
async fn duplicate_text_field_is_rejected() {
    let h = harness();
    let form = MultipartBody::new().text("text", "one").text("text", "two");

    let response = send(&h.router, post_form("/chat", form)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), "duplicate_text");
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn timeout_returns_500_with_error_body() {
    let h = harness_with(
        ScriptedBackend::new().delay_all(Duration::from_millis(500)),
        Duration::from_millis(50),
    );
    let form = MultipartBody::new().text("text", "slow");

    let response = send(&h.router, post_form("/chat", form)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&response), "request_timeout");
    let body = json_body(response).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("timed out"));
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness();

    let response = send(
        &h.router,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
