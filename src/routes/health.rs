use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "model": state.config.gemini_model,
        "provider_configured": state.config.gemini_api_key.is_some(),
    });
    (StatusCode::OK, Json(body))
}
