//! Free-text sections of the pull request body.

extern crate regex;

use crate::config::text::{ALGORITHM, APPROACH, DIFFICULTY, EMPTY_SECTION, LEARNED};
use regex::Regex;
use std::sync::OnceLock;

fn sentence_end() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\.\s+").unwrap())
}

pub trait Prompt {
    /// `None` when the user cancelled the question.
    fn ask(&mut self, question: &str) -> Option<String>;
}

/// Answers every question by cancelling it, leaving placeholders in place.
pub struct Silent;
impl Prompt for Silent {
    fn ask(&mut self, _: &str) -> Option<String> {
        None
    }
}

impl<F> Prompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask(&mut self, question: &str) -> Option<String> {
        self(question)
    }
}

const QUESTIONS: [(&str, &str, bool); 4] = [
    (ALGORITHM, "알고리즘 분류를 입력하세요.\n (예: DFS, DP, 구현)", false),
    (APPROACH, "어떻게 접근했나요?", true),
    (DIFFICULTY, "어떤 점이 어려웠나요?", true),
    (LEARNED, "무엇을 배웠나요?", true),
];

/// `-` clears the section, a cancelled or blank answer becomes the
/// placeholder text. With `line_breaks`, a sentence end followed by
/// whitespace becomes a markdown hard break.
pub fn fill_section(answer: Option<&str>, line_breaks: bool) -> String {
    match answer {
        Some("-") => String::new(),
        None => EMPTY_SECTION.to_string(),
        Some(a) if a.trim().is_empty() => EMPTY_SECTION.to_string(),
        Some(a) if line_breaks => sentence_end().replace_all(a, ".  \n").into_owned(),
        Some(a) => a.to_string(),
    }
}

/// Asks for every placeholder present in `body` and substitutes the answer.
pub fn fill_body<P: Prompt + ?Sized>(body: &str, prompt: &mut P) -> String {
    let mut body = body.to_string();
    for (token, question, line_breaks) in QUESTIONS.iter() {
        if !body.contains(token) {
            continue;
        }
        let answer = prompt.ask(question);
        body = body.replacen(token, &fill_section(answer.as_deref(), *line_breaks), 1);
    }
    body
}
