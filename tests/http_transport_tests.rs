use chat_widget::error::WidgetError;
use chat_widget::message::{ChatRequest, ChatResponse};
use chat_widget::transport::{ChatTransport, HttpTransport};
use chat_widget::view::{ElementIds, RecordingView, UiEvent};
use chat_widget::widget::{ChatWidget, GREETING_ERROR};

use axum::{Json, Router, http::StatusCode, routing::post};
use reqwest::Url;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Seen = Arc<Mutex<Vec<Value>>>;

/// Stands in for the chat server: greets on empty messages, echoes otherwise.
async fn spawn_stub() -> (Url, Seen) {
    let seen: Seen = Arc::default();
    let recorded = seen.clone();

    let app = Router::new()
        .route(
            "/api/chat",
            post(move |Json(body): Json<Value>| {
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push(body.clone());
                    let message = body["message"].as_str().unwrap_or_default();
                    let reply = match message {
                        "" => "Hello! How can I assist you today?".to_string(),
                        "Hello" => "Hi there!".to_string(),
                        other => format!("echo: {}", other),
                    };
                    Json(json!({ "response": reply, "state": "response" }))
                }
            }),
        )
        .route(
            "/api/broken",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/html", post(|| async { "<html>not json</html>" }))
        .route("/api/wrong-shape", post(|| async { Json(json!({ "reply": "hi" })) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{}/api/chat", addr)).unwrap();
    (base, seen)
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        session_id: "session_test".to_string(),
    }
}

#[tokio::test]
async fn posts_json_and_decodes_reply() {
    let (endpoint, seen) = spawn_stub().await;
    let transport = HttpTransport::new(endpoint);

    let reply = transport.send(request("Hello")).await.unwrap();
    assert_eq!(reply.response, "Hi there!");
    assert_eq!(reply.state.as_deref(), Some("response"));

    let bodies = seen.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({ "message": "Hello", "session_id": "session_test" })]);
}

#[tokio::test]
async fn error_status_is_failure() {
    let (endpoint, _) = spawn_stub().await;
    let transport = HttpTransport::new(endpoint.join("broken").unwrap());

    let err = transport.send(request("Hello")).await.unwrap_err();
    assert!(matches!(err, WidgetError::Status(s) if s.as_u16() == 500));
}

#[tokio::test]
async fn non_json_body_is_decode_failure() {
    let (endpoint, _) = spawn_stub().await;

    let html = HttpTransport::new(endpoint.join("html").unwrap());
    assert!(matches!(html.send(request("Hello")).await, Err(WidgetError::Decode(_))));

    let wrong = HttpTransport::new(endpoint.join("wrong-shape").unwrap());
    assert!(matches!(wrong.send(request("Hello")).await, Err(WidgetError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_is_http_failure() {
    // bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{}/api/chat", addr)).unwrap();
    let err = HttpTransport::new(endpoint).send(request("Hello")).await.unwrap_err();
    assert!(matches!(err, WidgetError::Http(_)));
}

#[tokio::test]
async fn widget_over_http() {
    let (endpoint, seen) = spawn_stub().await;
    let transport = HttpTransport::new(endpoint);
    let mut widget = ChatWidget::mount(ElementIds::default(), transport, RecordingView::new());
    widget.settle().await;

    widget.handle_event(UiEvent::input("user-input", "Hello"));
    widget.handle_event(UiEvent::key_press("user-input", "Enter"));
    widget.settle().await;

    assert_eq!(
        widget.view().texts(),
        vec!["Hello! How can I assist you today?", "Hello", "Hi there!"]
    );

    let bodies = seen.lock().unwrap().clone();
    let session = widget.session_id().as_str();
    assert_eq!(
        bodies,
        vec![
            json!({ "message": "", "session_id": session }),
            json!({ "message": "Hello", "session_id": session }),
        ]
    );
}

#[tokio::test]
async fn greeting_against_dead_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{}/api/chat", addr)).unwrap();
    let transport = HttpTransport::new(endpoint);
    let mut widget = ChatWidget::mount(ElementIds::default(), transport, RecordingView::new());
    widget.settle().await;

    assert_eq!(widget.view().texts(), vec![GREETING_ERROR]);
}

#[test]
fn response_type_matches_stub_shape() {
    let decoded: ChatResponse =
        serde_json::from_value(json!({ "response": "ok", "state": "response" })).unwrap();
    let expected = ChatResponse {
        response: "ok".into(),
        state: Some("response".into()),
    };
    assert_eq!(decoded, expected);
}
