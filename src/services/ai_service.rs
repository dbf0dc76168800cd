use crate::config::Config;
use crate::error::{Error, Result, UNKNOWN_STATUS};
use crate::models::quiz::QuizRequest;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Suffix the model is told to put after the correct option.
pub const CORRECT_ANSWER_MARKER: &str = "(Correct Answer)";

pub const MISSING_KEY_MESSAGE: &str = "Gemini API key is not configured";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

pub const SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.7,
    top_k: 40,
    top_p: 0.95,
    max_output_tokens: 2048,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: SamplingConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

pub fn build_prompt(request: &QuizRequest) -> String {
    let mut prompt = format!(
        "Create a {} difficulty quiz for {} grade students about {} in {}.\n\
         The quiz should have {} questions.\n\
         Format the quiz in HTML with the following structure:\n\
         - Each question should be numbered and in a <h3> tag\n\
         - Multiple choice options should be in a <ul> tag with <li> tags\n\
         - The correct answer should be marked with {} at the end\n\
         - Add a <hr> tag between questions\n\
         - Make sure the content is appropriate for the grade level",
        request.difficulty,
        request.grade,
        request.topic,
        request.subject,
        request.number_of_questions,
        CORRECT_ANSWER_MARKER,
    );

    if let Some(info) = request
        .additional_info
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        prompt.push_str("\nAdditional context: ");
        prompt.push_str(info);
    }

    prompt
}

#[derive(Clone)]
pub struct AIService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl AIService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
        }
    }

    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config(MISSING_KEY_MESSAGE.to_string()))?;

        let prompt = build_prompt(request);
        tracing::info!(
            topic = %request.topic,
            difficulty = %request.difficulty,
            questions = request.number_of_questions,
            "Requesting quiz from {}",
            self.model
        );

        let quiz = self.generate_content(api_key, &prompt).await?;
        if quiz.is_empty() {
            return Err(Error::generation("Generated quiz is empty", UNKNOWN_STATUS));
        }

        tracing::info!("Quiz generated ({} chars)", quiz.len());
        Ok(quiz)
    }

    async fn generate_content(&self, api_key: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: SAMPLING,
        };

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {:?}", e);
                Error::generation(e.to_string(), status_of(&e))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            Error::generation(e.to_string(), status.as_u16().to_string())
        })?;

        if !status.is_success() {
            let (details, provider_status) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(env) => (
                    env.error.message.unwrap_or_else(|| body.clone()),
                    env.error.status.unwrap_or_else(|| status.as_u16().to_string()),
                ),
                Err(_) => (body.clone(), status.as_u16().to_string()),
            };
            tracing::error!(status = %provider_status, "Gemini API error {}: {}", status, details);
            return Err(Error::generation(details, provider_status));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            Error::generation(
                format!("Invalid Gemini response format: {}", e),
                status.as_u16().to_string(),
            )
        })?;
        Ok(parsed.text())
    }
}

fn status_of(err: &reqwest::Error) -> String {
    err.status()
        .map(|s| s.as_u16().to_string())
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::Difficulty;

    fn request(info: Option<&str>) -> QuizRequest {
        QuizRequest {
            topic: "Volcanoes".into(),
            subject: "Geography".into(),
            grade: "6th".into(),
            number_of_questions: 4,
            difficulty: Difficulty::Easy,
            additional_info: info.map(str::to_string),
        }
    }

    #[test]
    fn prompt_embeds_parameters_and_directives() {
        let prompt = build_prompt(&request(None));
        assert!(prompt.starts_with(
            "Create a easy difficulty quiz for 6th grade students about Volcanoes in Geography."
        ));
        assert!(prompt.contains("The quiz should have 4 questions."));
        assert!(prompt.contains("<h3>"));
        assert!(prompt.contains("<ul>"));
        assert!(prompt.contains("<hr>"));
        assert!(prompt.contains(CORRECT_ANSWER_MARKER));
        assert!(!prompt.contains("Additional context"));
    }

    #[test]
    fn prompt_appends_non_blank_additional_info() {
        let prompt = build_prompt(&request(Some("  mention Vesuvius ")));
        assert!(prompt.ends_with("Additional context: mention Vesuvius"));

        let prompt = build_prompt(&request(Some("   ")));
        assert!(!prompt.contains("Additional context"));
    }

    #[test]
    fn sampling_serializes_in_provider_casing() {
        let value = serde_json::to_value(SAMPLING).unwrap();
        assert_eq!(value["topK"], 40);
        assert_eq!(value["maxOutputTokens"], 2048);
        assert!((value["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn response_text_joins_parts_and_tolerates_missing_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"<h3>1"},{"text":"</h3>"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.text(), "<h3>1</h3>");

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(blocked.text(), "");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = Config {
            gemini_base_url: "http://127.0.0.1:9".into(),
            ..Config::default()
        };
        let svc = AIService::new(&config, Client::new());
        let err = svc.generate_quiz(&request(None)).await.unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg == MISSING_KEY_MESSAGE));
    }
}
