// handlers/public.rs - endpoints that need no token, plus the JSON fallbacks

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;

const GREETING: &str = "Hello";
const EXCITED_SUFFIX: &str = "!!!!! You are doing great in this Udacity project.";

/// GET /
pub async fn greeting(State(state): State<AppState>) -> String {
    if state.config.api.excited {
        format!("{}{}", GREETING, EXCITED_SUFFIX)
    } else {
        GREETING.to_string()
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": 503,
                    "message": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

/// Router fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Method fallback for known paths
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
