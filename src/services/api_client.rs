use crate::dto::quiz_dto::{ErrorResponse, GenerateQuizResponse};
use crate::error::{Error, Result};
use crate::models::quiz::QuizRequest;
use reqwest::Client;

pub const GENERATE_QUIZ_PATH: &str = "/api/generate-quiz";

/// Client side of `POST /api/generate-quiz`.
#[derive(Clone)]
pub struct QuizApiClient {
    client: Client,
    base_url: String,
}

impl QuizApiClient {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<String> {
        let url = format!("{}{}", self.base_url, GENERATE_QUIZ_PATH);
        let res = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| "Failed to generate quiz".to_string());
            tracing::warn!(%status, "Quiz generation request failed: {}", message);
            return Err(Error::Request(message));
        }

        let parsed: GenerateQuizResponse =
            serde_json::from_str(&body).map_err(|e| Error::Request(e.to_string()))?;
        Ok(parsed.quiz)
    }
}
