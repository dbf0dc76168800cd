//! Terminal front-end: fills the quiz form, takes the quiz, shows the results.

use quiz_generator::config::parse_url;
use quiz_generator::dto::quiz_dto::{MAX_QUESTIONS, MIN_QUESTIONS};
use quiz_generator::models::quiz::Difficulty;
use quiz_generator::services::api_client::QuizApiClient;
use quiz_generator::services::grading_service::OptionMark;
use quiz_generator::services::session_service::QuizController;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Returns `None` once stdin is closed. An empty answer picks the default.
    async fn ask(&mut self, label: &str, default: &str) -> anyhow::Result<Option<String>> {
        if default.is_empty() {
            print!("{}: ", label);
        } else {
            print!("{} [{}]: ", label, default);
        }
        std::io::stdout().flush()?;

        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim();
        Ok(Some(if line.is_empty() { default.to_string() } else { line.to_string() }))
    }

    async fn ask_parsed<T>(&mut self, label: &str, default: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        loop {
            let Some(raw) = self.ask(label, default).await? else {
                return Ok(None);
            };
            match raw.parse() {
                Ok(v) => return Ok(Some(v)),
                Err(e) => println!("  {}", e),
            }
        }
    }
}

/// Fills the form in place; `false` when input ended.
async fn fill_form(prompter: &mut Prompter, ctl: &mut QuizController) -> anyhow::Result<bool> {
    let form = ctl.form.clone();

    let Some(topic) = prompter.ask("Topic", &form.topic).await? else { return Ok(false) };
    let Some(subject) = prompter.ask("Subject", &form.subject).await? else { return Ok(false) };
    let Some(grade) = prompter.ask("Grade level", &form.grade).await? else { return Ok(false) };
    let count_label = format!("Number of questions ({}-{})", MIN_QUESTIONS, MAX_QUESTIONS);
    let Some(count) = prompter
        .ask_parsed::<i32>(&count_label, &form.number_of_questions.to_string())
        .await?
    else {
        return Ok(false);
    };
    let Some(difficulty) = prompter
        .ask_parsed::<Difficulty>("Difficulty (easy/medium/hard)", form.difficulty.as_str())
        .await?
    else {
        return Ok(false);
    };
    let Some(info) = prompter
        .ask("Additional information (optional)", &form.additional_info)
        .await?
    else {
        return Ok(false);
    };

    ctl.form.topic = topic;
    ctl.form.subject = subject;
    ctl.form.grade = grade;
    ctl.form.number_of_questions = count;
    ctl.form.difficulty = difficulty;
    ctl.form.additional_info = info;
    Ok(true)
}

/// Collects one answer per question; `false` when input ended.
async fn take_quiz(prompter: &mut Prompter, ctl: &mut QuizController) -> anyhow::Result<bool> {
    let questions = ctl.session().questions.clone();
    for (idx, question) in questions.iter().enumerate() {
        println!("\n{}", question.prompt);
        if question.options.is_empty() {
            println!("  (no options could be read for this question)");
            continue;
        }
        for (n, option) in question.options.iter().enumerate() {
            println!("  {}. {}", n + 1, option);
        }

        loop {
            let Some(choice) = prompter.ask_parsed::<usize>("Your answer", "").await? else {
                return Ok(false);
            };
            match choice.checked_sub(1).and_then(|i| question.options.get(i)) {
                Some(option) => {
                    ctl.select_answer(idx, option.clone());
                    break;
                }
                None => println!("  Pick a number between 1 and {}", question.options.len()),
            }
        }
    }
    Ok(true)
}

fn print_results(ctl: &QuizController) {
    for (idx, question) in ctl.session().questions.iter().enumerate() {
        println!("\n{}", question.prompt);
        for option in &question.options {
            let mark = match ctl.option_mark(idx, option) {
                Some(OptionMark::Correct) => "[correct]  ",
                Some(OptionMark::Incorrect) => "[incorrect]",
                _ => "           ",
            };
            println!("  {} {}", mark, option);
        }
        if !question.is_scorable() {
            println!("  (no answer was marked for this question)");
        }
    }

    let Some(results) = ctl.results() else { return };
    println!("\nQuiz Results: {}/{}", results.score, results.total);
    println!("{}% Correct", results.percentage);

    if let Some(tips) = results.guidance {
        println!("\nAreas for Improvement");
        println!(
            "You scored {} out of {} ({}%). Consider reviewing the following areas:",
            results.score, results.total, results.percentage
        );
        for tip in tips {
            println!("  - {}", tip);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    dotenvy::dotenv().ok();

    let api_url = std::env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = QuizApiClient::new(parse_url("QUIZ_API_URL", &api_url)?, reqwest::Client::new());
    let mut ctl = QuizController::new();
    let mut prompter = Prompter::new();

    println!("AI Quiz Generator");
    loop {
        if !fill_form(&mut prompter, &mut ctl).await? {
            return Ok(());
        }

        println!("Generating Quiz...");
        if ctl.submit_request(&client).await.is_err() {
            println!("Error: {}", ctl.error().unwrap_or("Failed to generate quiz"));
            continue;
        }
        if ctl.session().is_empty() {
            println!("The generated quiz contained no readable questions, try again.");
            continue;
        }

        if !take_quiz(&mut prompter, &mut ctl).await? {
            return Ok(());
        }
        ctl.reveal();
        print_results(&ctl);

        let Some(again) = prompter.ask("\nGenerate a new quiz? (y/n)", "n").await? else {
            return Ok(());
        };
        if !again.eq_ignore_ascii_case("y") {
            return Ok(());
        }
        ctl.reset();
    }
}
