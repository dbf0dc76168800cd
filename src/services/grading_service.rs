use crate::models::quiz::QuizQuestion;
use std::collections::BTreeMap;

/// Below this percentage the results view shows improvement guidance.
pub const GUIDANCE_THRESHOLD: u32 = 70;

pub const GUIDANCE_TIPS: [&str; 3] = [
    "Review the basic concepts",
    "Practice more questions",
    "Seek additional resources or explanations",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
    Neutral,
}

pub struct GradingService;

impl GradingService {
    /// Counts questions whose selection equals the recorded correct answer.
    /// Unanswered questions never count.
    pub fn score(questions: &[QuizQuestion], selected: &BTreeMap<usize, String>) -> usize {
        questions
            .iter()
            .enumerate()
            .filter(|(idx, q)| {
                selected
                    .get(idx)
                    .is_some_and(|answer| *answer == q.correct_answer)
            })
            .count()
    }

    pub fn percentage(score: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        (100.0 * score as f64 / total as f64).round() as u32
    }

    /// Compares the unrounded ratio, so 16/23 (69.6%) still gets guidance
    /// although it displays as 70%.
    pub fn needs_guidance(score: usize, total: usize) -> bool {
        total > 0 && (100.0 * score as f64 / total as f64) < GUIDANCE_THRESHOLD as f64
    }

    pub fn mark_option(question: &QuizQuestion, selected: Option<&str>, option: &str) -> OptionMark {
        if option == question.correct_answer {
            OptionMark::Correct
        } else if selected == Some(option) {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(options: &[&str], correct: &str) -> QuizQuestion {
        QuizQuestion {
            prompt: "?".into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: correct.into(),
        }
    }

    #[test]
    fn scores_exact_matches_only() {
        let questions = vec![q(&["A", "B"], "A"), q(&["C", "D"], "D")];
        let selected = BTreeMap::from([(0, "A".to_string()), (1, "C".to_string())]);

        let score = GradingService::score(&questions, &selected);
        assert_eq!(score, 1);
        assert_eq!(GradingService::percentage(score, questions.len()), 50);
    }

    #[test]
    fn unscorable_question_does_not_match_missing_selection() {
        let questions = vec![q(&["A"], "")];
        assert_eq!(GradingService::score(&questions, &BTreeMap::new()), 0);
    }

    #[test]
    fn percentage_rounds_and_handles_empty() {
        assert_eq!(GradingService::percentage(2, 3), 67);
        assert_eq!(GradingService::percentage(1, 3), 33);
        assert_eq!(GradingService::percentage(0, 0), 0);
    }

    #[test]
    fn guidance_below_seventy() {
        assert!(GradingService::needs_guidance(1, 2));
        assert!(!GradingService::needs_guidance(7, 10));
        assert!(GradingService::needs_guidance(16, 23));
        assert_eq!(GradingService::percentage(16, 23), 70);
        assert!(!GradingService::needs_guidance(0, 0));
    }

    #[test]
    fn option_marks() {
        let question = q(&["A", "B", "C"], "A");
        assert_eq!(GradingService::mark_option(&question, Some("B"), "A"), OptionMark::Correct);
        assert_eq!(GradingService::mark_option(&question, Some("B"), "B"), OptionMark::Incorrect);
        assert_eq!(GradingService::mark_option(&question, Some("B"), "C"), OptionMark::Neutral);
    }
}
