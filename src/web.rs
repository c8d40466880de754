use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::DeviceConfig;
use crate::device::Connector;
use crate::dispatch;
use crate::models::action::Action;
use crate::models::result::{timestamp, ActionResult};

/// Shared, read-only server state. Each request opens its own device session.
pub struct AppState {
    pub connector: Arc<dyn Connector>,
    pub config: DeviceConfig,
}

type Reply = (StatusCode, Json<Value>);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/turnOn", post(turn_on))
        .route("/turnOff", post(turn_off))
        .route("/status", get(status))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

fn server_error(result: &ActionResult) -> Reply {
    let message = result
        .error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "unexpected result".into());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "message": message,
            "timestamp": timestamp(),
        })),
    )
}

async fn power(state: &AppState, action: Action, message: &str) -> Reply {
    let result = dispatch::run_action(state.connector.as_ref(), &state.config, action).await;
    match &result {
        ActionResult::Success { action, timestamp } => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": message,
                "action": action.name(),
                "timestamp": timestamp,
            })),
        ),
        _ => server_error(&result),
    }
}

async fn turn_on(State(state): State<Arc<AppState>>) -> Reply {
    tracing::info!("POST /turnOn");
    power(&state, Action::On, "Device turned on").await
}

async fn turn_off(State(state): State<Arc<AppState>>) -> Reply {
    tracing::info!("POST /turnOff");
    power(&state, Action::Off, "Device turned off").await
}

async fn status(State(state): State<Arc<AppState>>) -> Reply {
    tracing::info!("GET /status");
    let result =
        dispatch::run_action(state.connector.as_ref(), &state.config, Action::Status).await;
    match &result {
        ActionResult::Status { info, timestamp } => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "status": info,
                "timestamp": timestamp,
            })),
        ),
        _ => server_error(&result),
    }
}

async fn not_found(uri: Uri) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Requested resource not found",
            "path": uri.path(),
            "timestamp": timestamp(),
        })),
    )
}
