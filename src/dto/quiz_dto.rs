use crate::error::Result;
use crate::models::quiz::{Difficulty, QuizRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MIN_QUESTIONS: i32 = 1;
pub const MAX_QUESTIONS: i32 = 20;
pub const DEFAULT_QUESTIONS: i32 = 5;

/// Editable form state. Range and presence checks live here; the
/// generation endpoint itself accepts whatever it is sent.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct QuizForm {
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topic: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Grade level is required"))]
    pub grade: String,
    #[validate(range(min = 1, max = 20, message = "Number of questions must be between 1 and 20"))]
    pub number_of_questions: i32,
    pub difficulty: Difficulty,
    pub additional_info: String,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            subject: String::new(),
            grade: String::new(),
            number_of_questions: DEFAULT_QUESTIONS,
            difficulty: Difficulty::default(),
            additional_info: String::new(),
        }
    }
}

impl QuizForm {
    /// Trims text fields, validates, and freezes the form into a request.
    pub fn to_request(&self) -> Result<QuizRequest> {
        let form = QuizForm {
            topic: self.topic.trim().to_string(),
            subject: self.subject.trim().to_string(),
            grade: self.grade.trim().to_string(),
            number_of_questions: self.number_of_questions,
            difficulty: self.difficulty,
            additional_info: self.additional_info.trim().to_string(),
        };
        form.validate()?;

        Ok(QuizRequest {
            topic: form.topic,
            subject: form.subject,
            grade: form.grade,
            number_of_questions: form.number_of_questions,
            difficulty: form.difficulty,
            additional_info: Some(form.additional_info).filter(|s| !s.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub quiz: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
