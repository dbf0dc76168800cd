use crate::dto::quiz_dto::QuizForm;
use crate::error::{Error, Result};
use crate::models::quiz::QuizRequest;
use crate::models::session::QuizSession;
use crate::services::api_client::QuizApiClient;
use crate::services::grading_service::{GradingService, OptionMark, GUIDANCE_TIPS};
use crate::services::parser_service::parse_quiz;

pub const SUBMISSION_PENDING: &str = "A quiz is already being generated";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    /// Present only below the guidance threshold.
    pub guidance: Option<Vec<&'static str>>,
}

/// Form, loading flag, inline error and the current quiz session of one user.
#[derive(Debug, Default)]
pub struct QuizController {
    pub form: QuizForm,
    session: QuizSession,
    loading: bool,
    error: Option<String>,
}

impl QuizController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a submission. Rejected while another one is outstanding; a form
    /// that fails validation is reported inline and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<QuizRequest> {
        if self.loading {
            tracing::debug!("Ignoring submission while one is pending");
            return Err(Error::Request(SUBMISSION_PENDING.to_string()));
        }

        match self.form.to_request() {
            Ok(request) => {
                self.loading = true;
                self.error = None;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Applies the outcome of a submission started with [`begin_submit`].
    /// Failures keep the previous session.
    ///
    /// [`begin_submit`]: QuizController::begin_submit
    pub fn complete_submit(&mut self, outcome: Result<String>) {
        self.loading = false;
        match outcome {
            Ok(raw) => {
                let questions = parse_quiz(&raw);
                if questions.is_empty() {
                    tracing::warn!("Generated quiz contained no recognizable questions");
                }
                self.session = QuizSession::new(questions);
            }
            Err(e) => {
                tracing::error!("Error generating quiz: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub async fn submit_request(&mut self, client: &QuizApiClient) -> Result<()> {
        let request = self.begin_submit()?;
        let outcome = client.generate_quiz(&request).await;
        self.complete_submit(outcome);
        match &self.error {
            Some(msg) => Err(Error::Request(msg.clone())),
            None => Ok(()),
        }
    }

    /// Records a selection. Ignored once the quiz is revealed.
    pub fn select_answer(&mut self, index: usize, option: impl Into<String>) -> bool {
        if self.session.revealed {
            return false;
        }
        self.session.selected_answers.insert(index, option.into());
        true
    }

    pub fn can_reveal(&self) -> bool {
        !self.session.revealed && !self.session.is_empty() && self.session.all_answered()
    }

    pub fn reveal(&mut self) -> usize {
        if !self.session.revealed {
            self.session.score =
                GradingService::score(&self.session.questions, &self.session.selected_answers);
            self.session.revealed = true;
        }
        self.session.score
    }

    pub fn reset(&mut self) {
        self.session = QuizSession::default();
    }

    pub fn results(&self) -> Option<QuizResults> {
        if !self.session.revealed {
            return None;
        }
        let score = self.session.score;
        let total = self.session.question_count();
        Some(QuizResults {
            score,
            total,
            percentage: GradingService::percentage(score, total),
            guidance: GradingService::needs_guidance(score, total).then(|| GUIDANCE_TIPS.to_vec()),
        })
    }

    /// Feedback for one option; only available after reveal.
    pub fn option_mark(&self, index: usize, option: &str) -> Option<OptionMark> {
        if !self.session.revealed {
            return None;
        }
        let question = self.session.questions.get(index)?;
        let selected = self.session.selected_answers.get(&index).map(String::as_str);
        Some(GradingService::mark_option(question, selected, option))
    }
}
