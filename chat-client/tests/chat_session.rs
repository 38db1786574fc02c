use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chat_client::{
    ChatController, RelayClient,
    session::RelayStatus,
    transcript::{REQUEST_FAILED, Role},
};
use serde_json::{Value, json};

#[derive(Clone)]
struct MockRelay {
    asks: Arc<AtomicUsize>,
    fail: bool,
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "study-chat-relay",
        "version": "0.1.0",
        "time": "2026-01-01T00:00:00Z"
    }))
}

async fn topics() -> Json<Value> {
    Json(json!([
        {"id": "docker", "name": "Docker and Containers", "description": "Containers"},
        {"id": "kubernetes", "name": "Kubernetes", "description": "Orchestration"}
    ]))
}

// Questions starting with "slow" answer after a delay so tests can overlap asks.
async fn ask(State(mock): State<MockRelay>, Json(body): Json<Value>) -> Response {
    mock.asks.fetch_add(1, Ordering::SeqCst);
    if mock.fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "UPSTREAM_FAILURE", "message": "failed to process question"})),
        )
            .into_response();
    }

    let question = body["question"].as_str().unwrap_or_default().to_string();
    if question.starts_with("slow") {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    Json(json!({
        "answer": format!("answer to {question}"),
        "topic": body["topic"].as_str().unwrap_or_default(),
        "timestamp": "2026-01-01T00:00:00Z"
    }))
    .into_response()
}

async fn spawn_mock_relay(fail: bool) -> (String, Arc<AtomicUsize>) {
    let asks = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/topics", get(topics))
        .route("/api/ask", post(ask))
        .with_state(MockRelay {
            asks: asks.clone(),
            fail,
        });
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), asks)
}

#[tokio::test]
async fn mount_reads_health_and_topics() {
    let (url, _) = spawn_mock_relay(false).await;
    let mut ctl = ChatController::new(RelayClient::new(&url).unwrap());

    ctl.mount().await;

    assert_eq!(ctl.session().relay_status(), RelayStatus::Online);
    let names: Vec<_> = ctl.session().topics().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Docker and Containers", "Kubernetes"]);
}

#[tokio::test]
async fn mount_against_dead_relay_stays_usable() {
    let mut ctl = ChatController::new(RelayClient::new("http://127.0.0.1:1").unwrap());

    ctl.mount().await;

    assert_eq!(ctl.session().relay_status(), RelayStatus::Offline);
    assert_eq!(ctl.session().topics().len(), 4);

    ctl.session_mut().set_input("anyone there?");
    assert!(ctl.submit().is_some());
    ctl.next_completion().await;
    let last = ctl.session().transcript().last().unwrap();
    assert!(last.is_error);
    assert_eq!(last.content, REQUEST_FAILED);
    assert!(!ctl.session().is_loading());
}

#[tokio::test]
async fn question_round_trip_appends_user_then_assistant() {
    let (url, asks) = spawn_mock_relay(false).await;
    let mut ctl = ChatController::new(RelayClient::new(&url).unwrap());

    ctl.session_mut().select_topic(Some("Kubernetes"));
    ctl.session_mut().set_input("What is a pod?");
    ctl.submit().unwrap();
    assert!(ctl.session().is_loading());

    ctl.next_completion().await;

    let msgs = ctl.session().transcript().messages();
    assert_eq!(msgs.len(), 3);
    assert_eq!(msgs[1].role, Role::User);
    assert_eq!(msgs[2].role, Role::Assistant);
    assert_eq!(msgs[2].content, "answer to What is a pod?");
    assert_eq!(msgs[2].topic, "Kubernetes");
    assert!(!ctl.session().is_loading());
    assert_eq!(asks.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn overlapping_asks_apply_in_arrival_order() {
    let (url, asks) = spawn_mock_relay(false).await;
    let mut ctl = ChatController::new(RelayClient::new(&url).unwrap());

    ctl.session_mut().set_input("slow one");
    let slow = ctl.submit().unwrap();
    ctl.session_mut().set_input("fast one");
    let fast = ctl.submit().unwrap();

    // Both user messages are in before any answer.
    assert_eq!(ctl.session().transcript().len(), 3);
    assert_eq!(ctl.session().in_flight(), 2);

    assert_eq!(ctl.next_completion().await, fast);
    assert!(ctl.session().is_loading());
    assert_eq!(ctl.next_completion().await, slow);
    assert!(!ctl.session().is_loading());

    let tail: Vec<_> = ctl.session().transcript().messages()[3..]
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(tail, ["answer to fast one", "answer to slow one"]);
    assert_eq!(asks.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn relay_error_becomes_failure_message() {
    let (url, asks) = spawn_mock_relay(true).await;
    let mut ctl = ChatController::new(RelayClient::new(&url).unwrap());

    ctl.session_mut().set_input("What is Docker?");
    ctl.submit().unwrap();
    ctl.next_completion().await;

    let last = ctl.session().transcript().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert!(last.is_error);
    assert_eq!(asks.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_question_sends_nothing() {
    let (url, asks) = spawn_mock_relay(false).await;
    let mut ctl = ChatController::new(RelayClient::new(&url).unwrap());

    ctl.session_mut().set_input("   ");
    assert!(ctl.submit().is_none());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(asks.load(Ordering::SeqCst), 0);
    assert!(ctl.session().transcript().is_fresh());
}
