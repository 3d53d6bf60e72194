use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use transcribe_gateway::infrastructure::observability::REQUEST_ID_HEADER;
use transcribe_gateway::presentation::{AppState, create_router};

use crate::helpers::{ScriptedProvider, TestHarness, harness};

const BOUNDARY: &str = "gateway-test-boundary";
const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

fn create_test_app(h: &TestHarness) -> axum::Router {
    create_router(AppState {
        transcription_service: Arc::clone(&h.service),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    })
}

fn default_harness(provider: Arc<ScriptedProvider>) -> TestHarness {
    harness(provider, 2, Duration::from_secs(5))
}

fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: audio/wav\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn transcription_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/audio/transcriptions")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_system_status() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["system"]["prewarmed"], false);
    assert_eq!(json["system"]["active_connections"], 0);
    assert_eq!(json["system"]["max_connections"], 2);
    assert_eq!(json["system"]["cache_size"], 0);
}

#[tokio::test]
async fn given_audio_upload_when_transcribing_twice_then_second_is_served_from_cache() {
    let provider = Arc::new(ScriptedProvider::returning("hello world"));
    let h = default_harness(Arc::clone(&provider));
    let app = create_test_app(&h);

    let first = app
        .clone()
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"RIFF-fake-audio")),
            &[("language", "en")],
        )))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(json_body(first).await["text"], "hello world");

    let second = app
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"RIFF-fake-audio")),
            &[("language", "en")],
        )))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(json_body(second).await["text"], "hello world");

    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn given_no_file_part_when_transcribing_then_returns_bad_request() {
    let provider = Arc::new(ScriptedProvider::returning("hello world"));
    let h = default_harness(Arc::clone(&provider));
    let app = create_test_app(&h);

    let response = app
        .oneshot(transcription_request(multipart_body(
            None,
            &[("prompt", "lecture")],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["message"], "No file provided");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn given_empty_file_when_transcribing_then_returns_bad_request() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);

    let response = app
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"")),
            &[],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_upload_over_limit_when_transcribing_then_rejected_without_provider_call() {
    let provider = Arc::new(ScriptedProvider::returning("hello world"));
    let h = default_harness(Arc::clone(&provider));
    let app = create_test_app(&h);
    let oversized = vec![0u8; TEST_MAX_UPLOAD_BYTES + 1];

    let response = app
        .oneshot(transcription_request(multipart_body(
            Some(("big.wav", oversized.as_slice())),
            &[],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(provider.calls(), 0);
    assert_eq!(h.cache.size(), 0);
}

#[tokio::test]
async fn given_failing_provider_when_transcribing_then_returns_bad_gateway() {
    let h = default_harness(Arc::new(ScriptedProvider::failing()));
    let app = create_test_app(&h);

    let response = app
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"RIFF-fake-audio")),
            &[],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("upstream exploded")
    );
    assert_eq!(h.gate.in_use(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_saturated_gate_when_transcribing_then_returns_service_unavailable() {
    let h = harness(
        Arc::new(ScriptedProvider::returning("hello world")),
        1,
        Duration::from_millis(100),
    );
    let _occupied = h.gate.try_acquire().unwrap();
    let app = create_test_app(&h);

    let response = app
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"RIFF-fake-audio")),
            &[],
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn given_cold_service_when_warmup_called_then_reports_warmed() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/warmup")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "warmed");
    assert_eq!(json["provider"], "scripted");
    assert!(h.service.is_warm());
}

#[tokio::test]
async fn given_cached_transcript_when_cache_cleared_then_reports_removed_count() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);
    app.clone()
        .oneshot(transcription_request(multipart_body(
            Some(("a.wav", b"RIFF-fake-audio")),
            &[],
        )))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "cleared");
    assert_eq!(json["removed"], 1);
    assert_eq!(h.cache.size(), 0);
}

#[tokio::test]
async fn given_served_requests_when_metrics_requested_then_reports_cache_and_gate() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);
    for _ in 0..2 {
        app.clone()
            .oneshot(transcription_request(multipart_body(
                Some(("a.wav", b"RIFF-fake-audio")),
                &[],
            )))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["cache_stats"]["size"], 1);
    assert_eq!(json["cache_stats"]["max_size"], crate::helpers::TEST_CACHE_SIZE);
    assert_eq!(json["cache_stats"]["hits"], 1);
    assert_eq!(json["cache_stats"]["misses"], 1);
    assert_eq!(json["gate"]["capacity"], 2);
    assert_eq!(json["gate"]["in_use"], 0);
    assert_eq!(json["prewarmed"], true);
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_same_id_is_echoed() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(REQUEST_ID_HEADER, "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "req-123"
    );
}

#[tokio::test]
async fn given_no_request_id_header_when_calling_then_one_is_generated() {
    let h = default_harness(Arc::new(ScriptedProvider::returning("hello world")));
    let app = create_test_app(&h);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let generated = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert!(!generated.is_empty());
}
