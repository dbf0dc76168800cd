use crate::models::quiz::QuizQuestion;
use std::collections::BTreeMap;

/// Quiz-taking state for one generated quiz. Replaced wholesale on every
/// successful generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub questions: Vec<QuizQuestion>,
    pub selected_answers: BTreeMap<usize, String>,
    pub revealed: bool,
    pub score: usize,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn all_answered(&self) -> bool {
        (0..self.questions.len()).all(|idx| self.selected_answers.contains_key(&idx))
    }
}
