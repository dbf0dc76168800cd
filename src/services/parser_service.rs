//! Best-effort extraction of quiz questions from the model's HTML.
//!
//! The model is only asked to follow a markup convention, so nothing here is
//! treated as a grammar: missing lists, missing markers and broken markup all
//! degrade to partial questions instead of errors.

use crate::models::quiz::QuizQuestion;
use crate::services::ai_service::CORRECT_ANSWER_MARKER;
use scraper::{ElementRef, Html, Selector};

pub fn parse_quiz(raw: &str) -> Vec<QuizQuestion> {
    let (Ok(headings), Ok(items)) = (Selector::parse("h3"), Selector::parse("li")) else {
        return Vec::new();
    };

    let document = Html::parse_fragment(raw);
    document
        .select(&headings)
        .map(|heading| {
            let mut question = QuizQuestion {
                prompt: text_of(&heading).trim().to_string(),
                ..QuizQuestion::default()
            };

            if let Some(list) = next_element_sibling(&heading).filter(is_list) {
                for item in list.select(&items) {
                    let text = text_of(&item);
                    if text.contains(CORRECT_ANSWER_MARKER) {
                        let answer = text.replacen(CORRECT_ANSWER_MARKER, "", 1).trim().to_string();
                        question.correct_answer = answer.clone();
                        question.options.push(answer);
                    } else {
                        question.options.push(text.trim().to_string());
                    }
                }
            }

            question
        })
        .collect()
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

fn next_element_sibling<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn is_list(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}
