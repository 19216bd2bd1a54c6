use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

pub mod trending;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/trending", get(trending::trending_handler))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub enum ServiceError {
    /// GitHub failed; its status is mirrored when known.
    Upstream {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::Upstream { status, message } => (
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message.unwrap_or_else(|| "Failed to fetch trending data".to_string()),
            ),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
