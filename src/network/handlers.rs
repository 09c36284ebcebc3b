//! HTTP Handlers
//!
//! One POST route per operation under `/api/`, plus a status route.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::Endpoint;
use crate::dispatch::{Dispatcher, Fields, Operation};
use crate::transport::Transport;

struct AppState<T> {
    dispatcher: Arc<Dispatcher<T>>,
    device: String,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            device: self.device.clone(),
        }
    }
}

/// Build the axum router for a dispatcher
pub fn router<T: Transport + 'static>(dispatcher: Arc<Dispatcher<T>>, device: &Endpoint) -> Router {
    let state = AppState {
        dispatcher,
        device: device.to_string(),
    };

    Router::new()
        .route("/api/status", get(status_handler::<T>))
        .route("/api/{*operation}", post(operation_handler::<T>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler<T: Transport + 'static>(State(state): State<AppState<T>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "device": state.device,
    }))
}

async fn operation_handler<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Path(route): Path<String>,
    body: Bytes,
) -> Response {
    let Some(operation) = Operation::from_route(&route) else {
        tracing::debug!("Unknown operation {:?}", route);
        return error_response(StatusCode::NOT_FOUND, format!("unknown operation: {}", route));
    };

    let fields = match Fields::from_slice(&body) {
        Ok(fields) => fields,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    tracing::trace!("got HTTP message {} {:?}", operation.route(), fields);

    // Sends resolve the device and touch a socket; keep them off the async workers
    let dispatcher = Arc::clone(&state.dispatcher);
    let result = match tokio::task::spawn_blocking(move || dispatcher.run(operation, &fields)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Dispatch task for {} failed: {}", operation.route(), e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("dispatch of {} failed", operation.route()),
            );
        }
    };

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) if e.is_rejection() => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e) => {
            tracing::error!("Unhandled error for {}: {}", operation.route(), e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
        })),
    )
        .into_response()
}
