use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::LlmModelConfig;
use api::{
    core::{app_state::AppState, metrics},
    router,
};
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tutor::Tutor;

#[derive(Clone)]
struct MockGemini {
    calls: Arc<AtomicUsize>,
    status: StatusCode,
    reply: &'static str,
}

async fn mock_generate(State(mock): State<MockGemini>) -> impl IntoResponse {
    mock.calls.fetch_add(1, Ordering::SeqCst);
    (mock.status, [("content-type", "application/json")], mock.reply)
}

async fn spawn_mock_gemini(status: StatusCode, reply: &'static str) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1beta/models/{action}", post(mock_generate))
        .with_state(MockGemini {
            calls: calls.clone(),
            status,
            reply,
        });
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), calls)
}

fn build_test_app(gemini_url: &str) -> Router {
    let tutor = Tutor::from_config(LlmModelConfig {
        model: "gemini-pro".into(),
        endpoint: gemini_url.into(),
        api_key: Some("fake-key".into()),
        max_output_tokens: None,
        temperature: None,
        timeout_secs: Some(5),
    })
    .unwrap();
    let metrics = metrics::install_recorder().unwrap();
    router(Arc::new(AppState::new(tutor, metrics)))
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/ask")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const PARIS: &str =
    r#"{"candidates":[{"content":{"parts":[{"text":"Paris is the capital of France."}]}}]}"#;

#[tokio::test]
async fn e2e_ask_success_returns_answer_topic_and_timestamp() {
    let (url, calls) = spawn_mock_gemini(StatusCode::OK, PARIS).await;
    let app = build_test_app(&url);

    let response = app
        .oneshot(ask_request(r#"{"question":"What is the capital of France?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"], "Paris is the capital of France.");
    assert_eq!(body["topic"], "");
    assert!(body["timestamp"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn e2e_ask_echoes_topic() {
    let (url, _calls) = spawn_mock_gemini(StatusCode::OK, PARIS).await;
    let app = build_test_app(&url);

    let response = app
        .oneshot(ask_request(
            r#"{"question":"What is a pod?","topic":"Kubernetes"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["topic"], "Kubernetes");
}

#[tokio::test]
async fn e2e_missing_or_empty_question_is_400_without_upstream_call() {
    let (url, calls) = spawn_mock_gemini(StatusCode::OK, PARIS).await;
    let app = build_test_app(&url);

    for body in [r#"{"question":""}"#, r#"{"question":"   "}"#, r#"{"topic":"AWS"}"#] {
        let response = app.clone().oneshot(ask_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["error"], "BAD_REQUEST");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_malformed_json_is_400() {
    let (url, calls) = spawn_mock_gemini(StatusCode::OK, PARIS).await;
    let app = build_test_app(&url);

    let response = app.oneshot(ask_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_upstream_failures_are_generic_500() {
    for (status, reply) in [
        (StatusCode::OK, r#"{"candidates":[]}"#),
        (StatusCode::SERVICE_UNAVAILABLE, r#"{"error":"overloaded, key=abc"}"#),
        (StatusCode::OK, "not json at all"),
    ] {
        let (url, calls) = spawn_mock_gemini(status, reply).await;
        let app = build_test_app(&url);

        let response = app.oneshot(ask_request(r#"{"question":"hi"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "UPSTREAM_FAILURE");
        assert_eq!(body["message"], "failed to process question");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test]
async fn e2e_health_is_healthy_on_both_paths_without_upstream() {
    let (url, calls) = spawn_mock_gemini(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
    let app = build_test_app(&url);

    for path in ["/health", "/api/health"] {
        let response = app.clone().oneshot(get_request(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "study-chat-relay");
        assert!(body["version"].is_string());
        assert!(body["time"].is_string());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_topics_are_structured_and_ordered() {
    let app = build_test_app("http://127.0.0.1:1");

    let response = app.oneshot(get_request("/api/topics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let topics = body.as_array().unwrap();
    assert_eq!(topics.len(), 8);
    assert_eq!(topics[0]["id"], "docker");
    assert!(topics[0]["name"].is_string());
    assert!(topics[0]["description"].is_string());
}

#[tokio::test]
async fn e2e_unknown_route_is_404_with_request_id() {
    let app = build_test_app("http://127.0.0.1:1");

    let response = app.oneshot(get_request("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key(api::REQUEST_ID));
    assert_eq!(body_json(response).await["error"], "NOT_FOUND");
}

#[tokio::test]
async fn e2e_caller_request_id_is_echoed() {
    let app = build_test_app("http://127.0.0.1:1");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[api::REQUEST_ID], "abc-123");
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn e2e_metrics_count_requests_and_asks_per_topic() {
    let (url, _calls) = spawn_mock_gemini(StatusCode::OK, PARIS).await;
    let app = build_test_app(&url);

    let response = app
        .clone()
        .oneshot(ask_request(
            r#"{"question":"What is a pod?","topic":"metrics-scrape-topic"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;

    assert!(text.contains(r#"chat_messages_total{topic="metrics-scrape-topic"} 1"#), "{text}");
    assert!(text.contains("http_requests_total{"), "{text}");
    assert!(text.contains(r#"endpoint="/api/ask""#), "{text}");
    assert!(text.contains("http_request_duration_seconds"), "{text}");
}

#[tokio::test]
async fn e2e_upstream_failure_counts_a_gemini_error() {
    let (url, _calls) = spawn_mock_gemini(StatusCode::BAD_GATEWAY, "{}").await;
    let app = build_test_app(&url);

    let response = app
        .clone()
        .oneshot(ask_request(r#"{"question":"hi","topic":"metrics-failure-topic"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = body_text(app.oneshot(get_request("/metrics")).await.unwrap()).await;
    assert!(text.contains(r#"chat_messages_total{topic="metrics-failure-topic"} 1"#), "{text}");
    assert!(text.contains("gemini_errors_total"), "{text}");
}

#[tokio::test]
async fn e2e_rejected_question_is_not_counted_as_a_chat_message() {
    let app = build_test_app("http://127.0.0.1:1");

    let response = app
        .clone()
        .oneshot(ask_request(r#"{"question":"  ","topic":"metrics-rejected-topic"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let text = body_text(app.oneshot(get_request("/metrics")).await.unwrap()).await;
    assert!(!text.contains("metrics-rejected-topic"), "{text}");
}
