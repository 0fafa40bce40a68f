//! HTTP backend client against a local mock inference host.

mod support;

use axum::extract::Multipart;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use chatgate::domain::{AnalysisUnit, UnitKind, UnitStatus};
use chatgate::port::outbound::InferenceBackend;
use serde_json::{json, Value};

use support::backend::{client_for, spawn, TOKEN};

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

async fn echo_text(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad token"})));
    }
    let inputs = body["inputs"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!([
            {"label": format!("echo:{inputs}"), "score": 0.93},
            {"label": "runner-up", "score": 0.02}
        ])),
    )
}

async fn echo_image(headers: HeaderMap, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad token"})));
    }
    let Ok(Some(field)) = multipart.next_field().await else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "no file"})));
    };
    if field.name() != Some("file") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "wrong field"})));
    }
    let filename = field.file_name().unwrap_or("none").to_string();
    let content_type = field.content_type().unwrap_or("none").to_string();
    let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!([
            {"label": format!("{filename}|{content_type}|{size}"), "score": 0.88}
        ])),
    )
}

fn echo_router() -> Router {
    Router::new()
        .route("/analyze/text", post(echo_text))
        .route("/analyze/image", post(echo_image))
}

fn fixed_router(status: StatusCode, body: &'static str) -> Router {
    let handler = move || async move { (status, body) };
    Router::new()
        .route("/analyze/text", post(handler))
        .route("/analyze/image", post(handler))
}

#[tokio::test]
async fn text_unit_is_sent_as_json_with_bearer_token() {
    let backend = client_for(spawn(echo_router()).await);

    let result = backend.analyze(&AnalysisUnit::text(0, "hello")).await;

    assert_eq!(result.status, UnitStatus::Ok);
    assert_eq!(result.sequence_index, 0);
    assert_eq!(result.kind, UnitKind::Text);
    assert_eq!(result.label.as_deref(), Some("echo:hello"));
    assert_eq!(
        result.description.as_deref(),
        Some("Text classified as 'echo:hello' (confidence 0.93)")
    );
}

#[tokio::test]
async fn image_unit_is_sent_as_multipart_file() {
    let backend = client_for(spawn(echo_router()).await);
    let unit = AnalysisUnit::image(2, vec![7u8; 64], Some("cat.PNG".to_string()));

    let result = backend.analyze(&unit).await;

    assert_eq!(result.status, UnitStatus::Ok);
    assert_eq!(result.sequence_index, 2);
    assert_eq!(result.label.as_deref(), Some("cat.PNG|image/png|64"));
    assert!(result
        .description
        .as_deref()
        .unwrap()
        .starts_with("Image shows 'cat.PNG|image/png|64'"));
}

#[tokio::test]
async fn non_success_status_becomes_failed_result() {
    let addr = spawn(fixed_router(StatusCode::SERVICE_UNAVAILABLE, "model loading")).await;
    let backend = client_for(addr);

    let result = backend.analyze(&AnalysisUnit::text(0, "hi")).await;

    assert_eq!(result.status, UnitStatus::Failed);
    let detail = result.error_detail.unwrap();
    assert!(detail.contains("503"), "{detail}");
    assert!(detail.contains("model loading"), "{detail}");
}

#[tokio::test]
async fn empty_candidate_list_is_ok_without_label() {
    let backend = client_for(spawn(fixed_router(StatusCode::OK, "[]")).await);

    let result = backend.analyze(&AnalysisUnit::text(0, "hi")).await;

    assert_eq!(result.status, UnitStatus::Ok);
    assert!(result.label.is_none());
    assert_eq!(
        result.description.as_deref(),
        Some("No relevant information found")
    );
}

#[tokio::test]
async fn null_body_is_ok_without_label() {
    let backend = client_for(spawn(fixed_router(StatusCode::OK, "null")).await);

    let result = backend.analyze(&AnalysisUnit::text(0, "hi")).await;

    assert_eq!(result.status, UnitStatus::Ok);
    assert!(result.label.is_none());
}

#[tokio::test]
async fn batched_candidate_list_is_flattened() {
    let body = r#"[[{"label":"dog","score":0.7},{"label":"cat","score":0.2}]]"#;
    let backend = client_for(spawn(fixed_router(StatusCode::OK, body)).await);

    let unit = AnalysisUnit::image(0, vec![1, 2, 3], Some("x.jpg".to_string()));
    let result = backend.analyze(&unit).await;

    assert_eq!(result.label.as_deref(), Some("dog"));
    assert!((result.confidence.unwrap() - 0.7).abs() < 1e-9);
}

#[tokio::test]
async fn malformed_body_becomes_failed_result() {
    let backend = client_for(spawn(fixed_router(StatusCode::OK, "<html>oops</html>")).await);

    let result = backend.analyze(&AnalysisUnit::text(0, "hi")).await;

    assert_eq!(result.status, UnitStatus::Failed);
    assert!(result.error_detail.unwrap().contains("malformed"));
}

#[tokio::test]
async fn rejected_credential_is_a_per_unit_failure() {
    let addr = spawn(echo_router()).await;
    let backend = chatgate::adapter::outbound::inference::HttpBackend::new(
        url::Url::parse(&format!("http://{addr}/analyze/text")).unwrap(),
        url::Url::parse(&format!("http://{addr}/analyze/image")).unwrap(),
        "wrong-token",
        std::time::Duration::from_secs(5),
    )
    .unwrap();

    let result = backend.analyze(&AnalysisUnit::text(0, "hi")).await;

    assert_eq!(result.status, UnitStatus::Failed);
    assert!(result.error_detail.unwrap().contains("401"));
}
