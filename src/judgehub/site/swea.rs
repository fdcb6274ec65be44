//! SW Expert Academy: the solving page is watched until the grader reports a
//! pass, its editor source is cached, and the result page later supplies the
//! rest of the record.

extern crate async_trait;
extern crate regex;
extern crate scraper;
extern crate tokio;

use super::{
    dom::{self, attr, text},
    page::Page,
    Error, Result, SubmissionSource,
};
use crate::{
    config::site::SWEA_PASS,
    language::{extension, normalize_case},
    poll::poll,
    storage::{swea_code_key, Cache},
    types::{ProblemDetails, Site, SubmissionRecord},
};
use async_trait::async_trait;
use log::{debug, error, info};
use regex::Regex;
use scraper::Html;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

struct ResultRegex {
    level_suffix: Regex,
    submitted_at: Regex,
}
impl ResultRegex {
    fn new() -> Self {
        ResultRegex {
            level_suffix: Regex::new(r" D[0-9]$").unwrap(),
            submitted_at: Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}").unwrap(),
        }
    }
}
fn regex() -> &'static ResultRegex {
    static REGEX: OnceLock<ResultRegex> = OnceLock::new();
    REGEX.get_or_init(ResultRegex::new)
}

/// Source captured from the solving page once it passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedCode {
    pub problem_id: String,
    pub contest_prob_id: String,
    pub code: String,
}

/// Lower-cased text of the grading popup, empty while it is hidden.
pub fn solved_result(doc: &Html) -> String {
    dom::first(doc, "div.popup_layer.show > div > p.txt")
        .map(|p| text(p).trim().to_lowercase())
        .unwrap_or_default()
}
pub fn is_passed(doc: &Html) -> bool {
    solved_result(doc).contains(SWEA_PASS)
}

fn contest_prob_id(doc: &Html) -> Option<String> {
    dom::last(doc, "#contestProbId").and_then(|e| attr(e, "value"))
}

pub fn parse_code(doc: &Html) -> Option<SolvedCode> {
    let heading = text(dom::first(doc, "div.problem_box > h3")?);
    let problem_id = heading.split('.').next().unwrap_or("").trim().to_string();
    let source = dom::first(doc, "#textSource")?;
    let code = attr(source, "value").unwrap_or_else(|| text(source));
    if problem_id.is_empty() {
        return None;
    }
    Some(SolvedCode {
        problem_id,
        contest_prob_id: contest_prob_id(doc)?,
        code,
    })
}

/// Result page listing `nickname`'s submissions of the problem.
pub fn result_url(origin: &str, contest_prob_id: &str, nickname: &str) -> String {
    format!(
        "{}/main/code/problem/problemSolver.do?contestProbId={}&nickName={}",
        origin, contest_prob_id, nickname
    )
}

async fn check_solving_page(page: &Page) -> Result<Option<SolvedCode>> {
    let html = page.load().await?;
    let doc = Html::parse_document(&html);
    if !is_passed(&doc) {
        debug!("Not passed yet");
        return Ok(None);
    }
    info!("Passed, reading source");
    parse_code(&doc)
        .map(Some)
        .ok_or(Error::Missing("problem heading, contest id or editor source"))
}

/// Reloads the solving page every poll interval until it shows a pass, then
/// stores the editor source. `Ok(None)` when `stop` fired first; a passed page
/// without a readable source ends the watch with an error.
pub async fn watch_solving_page(
    page: &Page,
    cache: &Cache,
    stop: watch::Receiver<bool>,
) -> Result<Option<SolvedCode>> {
    let solved = poll(stop, || check_solving_page(page)).await?;
    if let Some(s) = &solved {
        cache.set_code(&swea_code_key(&s.problem_id), &s.code);
    }
    Ok(solved)
}

/// Result page fields, everything but the code.
fn parse_result(doc: &Html, nickname: &str, origin: &str) -> Option<SubmissionRecord> {
    let searched = dom::first(doc, "#searchinput").and_then(|e| attr(e, "value"))?;
    if searched != nickname {
        debug!("Result page is for {}, not {}", searched, nickname);
        return None;
    }
    dom::first(doc, "#problemForm div.info")?;

    let heading = dom::first(doc, "div.problem_box > p.problem_title")?;
    let heading_text = text(heading);
    let title = regex().level_suffix.replace(heading_text.trim(), "");
    let title = match title.find('.') {
        Some(i) => title[i + 1..].trim().to_string(),
        None => title.trim().to_string(),
    };
    let level = dom::first_in(heading, "span.badge")
        .map(|b| text(b).trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "Unrated".to_string());
    let problem_id = heading_text.split('.').next().unwrap_or("").trim().to_string();
    let contest_prob_id = contest_prob_id(doc)?;

    let info = |n: usize| {
        dom::first(
            doc,
            &format!(
                "#problemForm div.info > ul > li:nth-child({}) > span:nth-child(1)",
                n
            ),
        )
        .map(|s| text(s).trim().to_string())
    };
    let language = info(1)?;
    let memory = info(2)?.to_uppercase();
    let runtime = info(3)?;
    let code_length = info(4);
    let submission_time = dom::first(doc, ".smt_txt > dd").and_then(|dd| {
        regex()
            .submitted_at
            .find(&text(dd))
            .map(|m| m.as_str().to_string())
    });

    Some(SubmissionRecord {
        site: Site::SweA,
        problem_id,
        submission_id: None,
        title,
        level,
        tags: Vec::new(),
        extension: extension(&language).map(str::to_string),
        language: normalize_case(&language),
        code: String::new(),
        runtime,
        memory,
        code_length,
        submission_time,
        link: format!(
            "{}/main/code/problem/problemDetail.do?contestProbId={}",
            origin, contest_prob_id
        ),
        details: ProblemDetails::default(),
    })
}

/// Result page of a passed problem; the code must have been captured by
/// [`watch_solving_page`] before.
pub struct SweaSource {
    page: Page,
    cache: Arc<Cache>,
    nickname: String,
    origin: String,
}
impl SweaSource {
    pub fn new(page: Page, cache: Arc<Cache>, nickname: String, origin: String) -> Self {
        SweaSource {
            page,
            cache,
            nickname,
            origin,
        }
    }
}

#[async_trait]
impl SubmissionSource for SweaSource {
    fn site(&self) -> Site {
        Site::SweA
    }
    async fn find_submission(&self) -> Result<Option<SubmissionRecord>> {
        let html = self.page.load().await?;
        let mut record =
            match parse_result(&Html::parse_document(&html), &self.nickname, &self.origin) {
                Some(r) => r,
                None => return Ok(None),
            };
        match self.cache.code(&swea_code_key(&record.problem_id)) {
            Some(code) => {
                record.code = code;
                Ok(Some(record))
            }
            None => {
                error!(
                    "No source stored for problem {}; watch its solving page first",
                    record.problem_id
                );
                Ok(None)
            }
        }
    }
}
