//! HTTP Bridge Tests
//!
//! Drives the axum router in-process; packets land in a recording
//! transport instead of the network.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use slider_osc::network::{router, Server};
use slider_osc::protocol::decode;
use slider_osc::{
    Config, Dispatcher, Endpoint, Message, RecordingTransport, Result, SliderError, Transport,
};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

struct DownTransport;

impl Transport for DownTransport {
    fn send(&self, _packet: &[u8]) -> Result<()> {
        Err(SliderError::Transport {
            endpoint: "192.168.1.22:8000".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "host unreachable"),
        })
    }
}

/// Blocks inside `send`, like a slow hostname lookup would
struct SlowTransport {
    delay: Duration,
    entered: AtomicBool,
}

impl SlowTransport {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            entered: AtomicBool::new(false),
        }
    }

    fn entered(&self) -> bool {
        self.entered.load(Ordering::SeqCst)
    }
}

impl Transport for SlowTransport {
    fn send(&self, _packet: &[u8]) -> Result<()> {
        self.entered.store(true, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Ok(())
    }
}

fn status_request() -> Request<Body> {
    Request::builder()
        .uri("/api/status")
        .body(Body::empty())
        .unwrap()
}

fn setup() -> (Router, Arc<Dispatcher<RecordingTransport>>) {
    let dispatcher = Arc::new(Dispatcher::new(RecordingTransport::new()));
    let app = router(Arc::clone(&dispatcher), &Endpoint::new("192.168.1.22", 8000));
    (app, dispatcher)
}

async fn post(app: Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, request).await
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn sent(dispatcher: &Dispatcher<RecordingTransport>) -> Vec<Message> {
    dispatcher
        .transport()
        .packets()
        .iter()
        .map(|packet| decode(packet).unwrap())
        .collect()
}

// =============================================================================
// Status Tests
// =============================================================================

#[tokio::test]
async fn test_status() {
    let (app, dispatcher) = setup();

    let (status, body) = call(app, status_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "device": "192.168.1.22:8000" }));
    assert!(dispatcher.transport().is_empty());
}

// =============================================================================
// Operation Tests
// =============================================================================

#[tokio::test]
async fn test_pan_clamped() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/pan", r#"{"value": 1.7}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "value": 1.0 }));
    assert_eq!(sent(&dispatcher), vec![Message::new("/pan").arg(1.0f32)]);
}

#[tokio::test]
async fn test_joystick_combined() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/joystick/combined", r#"{"pan": 0.25, "tilt": -0.5}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "pan": 0.25, "tilt": -0.5 }));
    assert_eq!(
        sent(&dispatcher),
        vec![Message::new("/joy/pt").arg(0.25f32).arg(-0.5f32)]
    );
}

#[tokio::test]
async fn test_joystick_alias() {
    let (app, dispatcher) = setup();
    let (status, _) = post(app, "/api/joystick/pan", r#"{"value": -0.75}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(sent(&dispatcher), vec![Message::new("/pan").arg(-0.75f32)]);
}

#[tokio::test]
async fn test_preset_set_reports_ints() {
    let (app, dispatcher) = setup();
    let (status, body) = post(
        app,
        "/api/preset/set",
        r#"{"id": 1, "pan": 100, "tilt": 200, "zoom": 300, "slide": 400}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["slide"], json!(400));
    assert_eq!(sent(&dispatcher)[0].type_tags(), ",iiiii");
}

#[tokio::test]
async fn test_defaults_for_empty_body() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/slide/goto", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "position": 0.5, "duration": 2.0 }));
    assert_eq!(dispatcher.transport().len(), 1);
}

#[tokio::test]
async fn test_stop_without_body() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/stop", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert_eq!(dispatcher.transport().len(), 3);
}

#[tokio::test]
async fn test_reset_all_axes() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/reset_all_axes", "{}").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(dispatcher.transport().len(), 4);
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_operation() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/slide/teleport", "{}").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("slide/teleport"));
    assert!(dispatcher.transport().is_empty());
}

#[tokio::test]
async fn test_invalid_json() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/tilt", "{value: ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(dispatcher.transport().is_empty());
}

#[tokio::test]
async fn test_non_object_body() {
    let (app, _) = setup();
    let (status, _) = post(app, "/api/tilt", "[0.5]").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_numeric_field() {
    let (app, dispatcher) = setup();
    let (status, body) = post(app, "/api/axis_zoom", r#"{"value": "wide"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("value"));
    assert!(dispatcher.transport().is_empty());
}

#[tokio::test]
async fn test_int_out_of_range() {
    let (app, dispatcher) = setup();
    let (status, _) = post(app, "/api/config/pan_map", r#"{"min": 5000000000}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(dispatcher.transport().is_empty());
}

#[tokio::test]
async fn test_transport_failure_is_not_http_error() {
    let dispatcher = Arc::new(Dispatcher::new(DownTransport));
    let app = router(dispatcher, &Endpoint::new("192.168.1.22", 8000));

    let (status, body) = post(app, "/api/slide/jog", r#"{"value": 0.5}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false, "value": 0.5 }));
}

#[tokio::test]
async fn test_get_on_operation_not_allowed() {
    let (app, _) = setup();
    let request = Request::builder()
        .uri("/api/pan")
        .body(Body::empty())
        .unwrap();

    let (status, _) = call(app, request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test]
async fn test_slow_send_does_not_stall_other_requests() {
    let dispatcher = Arc::new(Dispatcher::new(SlowTransport::new(Duration::from_millis(800))));
    let app = router(Arc::clone(&dispatcher), &Endpoint::new("slider.local", 8000));

    let start = Instant::now();
    let slow = tokio::spawn(post(app.clone(), "/api/pan", r#"{"value": 0.1}"#));
    while !dispatcher.transport().entered() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    let (status, body) = call(app, status_request()).await;
    let elapsed = start.elapsed();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert!(
        elapsed < Duration::from_millis(400),
        "status request took {:?} while a send was in progress",
        elapsed
    );

    let (status, body) = slow.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "value": 0.1 }));
}

// =============================================================================
// Server Tests
// =============================================================================

#[tokio::test]
async fn test_server_router_uses_config_device() {
    let config = Config::builder().device_host("slider.local").device_port(9001).build();
    let server = Server::new(config, Arc::new(Dispatcher::new(RecordingTransport::new())));

    let (_, body) = call(server.router(), status_request()).await;
    assert_eq!(body["device"], json!("slider.local:9001"));
}
