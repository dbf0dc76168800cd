use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
};

use crate::dto::quiz_dto::GenerateQuizResponse;
use crate::error::{Error, Result};
use crate::models::quiz::QuizRequest;
use crate::AppState;

#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected quiz request body: {}", rejection.body_text());
        Error::Request(rejection.body_text())
    })?;

    let quiz = state.ai_service.generate_quiz(&request).await?;
    Ok(Json(GenerateQuizResponse { quiz }))
}
