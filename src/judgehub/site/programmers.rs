//! Programmers challenge pages saved (or fetched) after an accepted run.

extern crate async_trait;
extern crate regex;
extern crate scraper;

use super::{
    dom::{self, attr, text, widen},
    page::Page,
    Result, SubmissionSource,
};
use crate::types::{ProblemDetails, Site, SubmissionRecord};
use async_trait::async_trait;
use log::{debug, info};
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

struct CaseRegex {
    noise: Regex,
    unit: Regex,
}
impl CaseRegex {
    fn new() -> Self {
        CaseRegex {
            noise: Regex::new(r"[^., 0-9a-zA-Z]").unwrap(),
            unit: Regex::new(r"([0-9])([A-Za-z])").unwrap(),
        }
    }
}
fn regex() -> &'static CaseRegex {
    static REGEX: OnceLock<CaseRegex> = OnceLock::new();
    REGEX.get_or_init(CaseRegex::new)
}

pub struct ProgrammersSource {
    page: Page,
}
impl ProgrammersSource {
    pub fn new(page: Page) -> Self {
        ProgrammersSource { page }
    }
}

#[async_trait]
impl SubmissionSource for ProgrammersSource {
    fn site(&self) -> Site {
        Site::Programmers
    }
    async fn find_submission(&self) -> Result<Option<SubmissionRecord>> {
        let html = self.page.load().await?;
        let record = parse_challenge(&Html::parse_document(&html));
        if record.is_none() {
            info!("Page does not contain a finished challenge");
        }
        Ok(record)
    }
}

/// Runtime and memory of the slowest passed case, e.g. `("0.02 ms", "10.2 MB")`.
fn slowest_case(cases: &[String]) -> (String, String) {
    let regex = regex();
    let millis = |s: &str| -> f64 { s.trim_end_matches("ms").trim().parse().unwrap_or(0.0) };

    let mut best = ("0.00ms".to_string(), "0.0MB".to_string());
    for case in cases {
        let cleaned = regex.noise.replace_all(case, "").trim().to_string();
        let mut parts = cleaned.split(", ");
        let (runtime, memory) = match (parts.next(), parts.next()) {
            (Some(t), Some(m)) => (t.to_string(), m.to_string()),
            _ => continue,
        };
        if millis(&runtime) >= millis(&best.0) {
            best = (runtime, memory);
        }
    }
    let spaced = |s: String| regex.unit.replace(&s, "$1 $2").into_owned();
    (spaced(best.0), spaced(best.1))
}

/// Console lines that carry a `key: value` result.
fn result_message(doc: &Html) -> String {
    let lines: Vec<String> = dom::all(doc, "#output .console-message")
        .into_iter()
        .map(text)
        .filter(|t| t.contains(':'))
        .collect();
    if lines.is_empty() {
        "Empty".to_string()
    } else {
        lines.join("<br/>")
    }
}

/// `None` unless every graded case on the page passed.
pub fn parse_challenge(doc: &Html) -> Option<SubmissionRecord> {
    let link = dom::first(doc, "head > meta[name$=url]")
        .and_then(|m| attr(m, "content"))?
        .split('?')
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    let lesson = dom::first(doc, "div.main > div.lesson-content")?;
    let problem_id = attr(lesson, "data-lesson-id")?;
    let level = attr(lesson, "data-challenge-level").unwrap_or_default();
    let division: Vec<String> = dom::first(doc, "ol.breadcrumb")
        .map(|b| {
            dom::children(b, &["li"])
                .into_iter()
                .filter(|li| !li.value().classes().any(|c| c == "active"))
                .map(|li| widen(text(li).trim()))
                .collect()
        })
        .unwrap_or_default();
    let title = text(dom::first(doc, ".algorithm-title .challenge-title")?)
        .replace("\\n", "")
        .trim()
        .to_string();
    let description = dom::first(doc, "div.guide-section-description > div.markdown")
        .map(|d| d.inner_html())
        .unwrap_or_default();
    let extension = dom::first(doc, "div.editor > ul > li.nav-item > a")
        .and_then(|a| text(a).split('.').nth(1).map(|e| e.trim().to_string()))?;
    let code = text(dom::first(doc, "textarea#code")?);
    let language = dom::first(doc, "div#tour7 > button")
        .map(|b| text(b).trim().to_string())
        .unwrap_or_default();
    let cases: Vec<String> = dom::all(doc, "td.result.passed").into_iter().map(text).collect();
    let failed = dom::all(doc, "td.result.failed").len();
    if cases.is_empty() || failed > 0 {
        debug!(
            "Programmers {} was not accepted: {} passed, {} failed",
            problem_id,
            cases.len(),
            failed
        );
        return None;
    }
    let (runtime, memory) = slowest_case(&cases);
    debug!(
        "Programmers {} ({}): {} passed cases",
        problem_id,
        language,
        cases.len()
    );

    Some(SubmissionRecord {
        site: Site::Programmers,
        problem_id,
        submission_id: None,
        title,
        level,
        tags: division,
        language,
        extension: Some(extension),
        code,
        runtime,
        memory,
        code_length: None,
        submission_time: None,
        link,
        details: ProblemDetails {
            description,
            input: None,
            output: Some(result_message(doc)),
        },
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const CHALLENGE_PAGE: &str = r#"
<html><head>
<meta name="twitter:url" content="https://school.programmers.co.kr/learn/courses/30/lessons/42576?language=java">
<title>완주하지 못한 선수</title>
</head><body>
<div class="main">
<ol class="breadcrumb">
  <li><a href="/learn/challenges">코딩테스트 연습</a></li>
  <li><a href="/learn/courses/30/parts/12077">해시</a></li>
  <li class="active">완주하지 못한 선수</li>
</ol>
<div class="lesson-content" data-lesson-id="42576" data-challenge-level="1">
  <div class="algorithm-title"><h3 class="challenge-title">완주하지 못한 선수</h3></div>
  <div class="guide-section-description"><div class="markdown"><h6>문제 설명</h6><p>수많은 마라톤 선수들이 마라톤에 참여하였습니다.</p></div></div>
  <div class="editor"><ul><li class="nav-item"><a>solution.java</a></li></ul></div>
  <div id="tour7"><button> Java </button></div>
  <textarea id="code">import java.util.*;
class Solution {
    public String solution(String[] participant, String[] completion) { return ""; }
}</textarea>
  <div id="output">
    <pre class="console-message">정확성: 58.3</pre>
    <pre class="console-message">효율성: 41.7</pre>
    <pre class="console-message">합계: 100.0 / 100.0</pre>
    <pre class="console-message">채점을 시작합니다.</pre>
  </div>
  <table>
    <tr><td>테스트 1</td><td class="result passed">통과 (0.02ms, 10.2MB)</td></tr>
    <tr><td>테스트 2</td><td class="result passed">통과 (1.35ms, 10.3MB)</td></tr>
    <tr><td>테스트 3</td><td class="result passed">통과 (0.40ms, 10.4MB)</td></tr>
  </table>
</div>
</div>
</body></html>"#;

    #[test]
    fn parses_challenge() {
        let record = parse_challenge(&Html::parse_document(CHALLENGE_PAGE)).unwrap();
        assert_eq!(
            record.link,
            "https://school.programmers.co.kr/learn/courses/30/lessons/42576"
        );
        assert_eq!(record.problem_id, "42576");
        assert_eq!(record.level, "1");
        assert_eq!(record.title, "완주하지 못한 선수");
        assert_eq!(record.extension.as_deref(), Some("java"));
        assert_eq!(record.language, "Java");
        assert_eq!(record.tags, vec!["코딩테스트\u{2005}연습", "해시"]);
        assert!(record.code.starts_with("import java.util.*;"));
        assert!(record.details.description.contains("마라톤"));
    }

    #[test]
    fn keeps_slowest_passed_case() {
        let record = parse_challenge(&Html::parse_document(CHALLENGE_PAGE)).unwrap();
        assert_eq!(record.runtime, "1.35 ms");
        assert_eq!(record.memory, "10.3 MB");
    }

    #[test]
    fn collects_result_lines() {
        let record = parse_challenge(&Html::parse_document(CHALLENGE_PAGE)).unwrap();
        assert_eq!(
            record.details.output.as_deref(),
            Some("정확성: 58.3<br/>효율성: 41.7<br/>합계: 100.0 / 100.0")
        );
    }

    #[test]
    fn no_passed_cases_defaults_to_zero() {
        assert_eq!(
            slowest_case(&[]),
            ("0.00 ms".to_string(), "0.0 MB".to_string())
        );
    }

    #[test]
    fn failed_run_is_none() {
        let page = CHALLENGE_PAGE.replacen(
            r#"<td class="result passed">통과 (1.35ms, 10.3MB)</td>"#,
            r#"<td class="result failed">실패 (1.35ms, 10.3MB)</td>"#,
            1,
        );
        assert!(parse_challenge(&Html::parse_document(&page)).is_none());
    }

    #[test]
    fn ungraded_run_is_none() {
        let page = CHALLENGE_PAGE.replace("result passed", "result");
        assert!(parse_challenge(&Html::parse_document(&page)).is_none());
    }

    #[test]
    fn unfinished_page_is_none() {
        assert!(parse_challenge(&Html::parse_document("<html><body></body></html>")).is_none());
    }
}
