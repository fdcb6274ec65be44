//! `#status-table` parsing and best-submission selection.

extern crate scraper;

use crate::site::dom::{self, attr, children, first_in, text};
use log::debug;
use scraper::Html;
use std::{cmp::Ordering, collections::HashMap};

pub const RESULT_ACCEPTED: &str = "ac";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    ProblemId,
    Result,
    Language,
    SubmissionId,
    Username,
    SubmissionTime,
    Runtime,
    Memory,
    CodeLength,
    Unknown,
}
fn column(header: &str) -> Column {
    match header {
        "문제번호" | "문제" => Column::ProblemId,
        "결과" => Column::Result,
        "언어" => Column::Language,
        "제출 번호" => Column::SubmissionId,
        "아이디" => Column::Username,
        "제출시간" | "제출한 시간" => Column::SubmissionTime,
        "시간" => Column::Runtime,
        "메모리" => Column::Memory,
        "코드 길이" => Column::CodeLength,
        _ => Column::Unknown,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    pub element_id: String,
    pub submission_id: String,
    pub username: String,
    pub problem_id: String,
    pub result: String,
    pub result_category: String,
    pub memory: String,
    pub runtime: String,
    pub language: String,
    pub code_length: String,
    pub submission_time: Option<String>,
}

pub fn parse_result_table(doc: &Html) -> Vec<ResultRow> {
    if dom::first(doc, "#status-table").is_none() {
        debug!("Result table not found");
        return Vec::new();
    }
    let mut rows = dom::all(doc, "#status-table tr").into_iter();
    let headers: Vec<Column> = match rows.next() {
        Some(head) => children(head, &["th", "td"])
            .into_iter()
            .map(|c| column(text(c).trim()))
            .collect(),
        None => return Vec::new(),
    };

    let mut list = Vec::new();
    for row in rows {
        let mut item = ResultRow {
            element_id: attr(row, "id").unwrap_or_default(),
            ..ResultRow::default()
        };
        for (cell, col) in children(row, &["td", "th"]).into_iter().zip(headers.iter()) {
            let value = text(cell).trim().to_string();
            match col {
                Column::Result => {
                    item.result_category = first_in(cell, "[data-color]")
                        .and_then(|x| attr(x, "data-color"))
                        .map(|c| c.replace("-eng", "").trim().to_string())
                        .unwrap_or_default();
                    item.result = value;
                }
                Column::Language => {
                    let lang = dom::unescape_html(&value);
                    item.language = lang.split('/').next().unwrap_or("").trim().to_string();
                }
                Column::SubmissionTime => {
                    item.submission_time =
                        first_in(cell, "a.show-date").and_then(|a| attr(a, "data-original-title"));
                }
                Column::ProblemId => {
                    if let Some(href) = first_in(cell, "a.problem_title").and_then(|a| attr(a, "href")) {
                        item.problem_id = href.rsplit('/').next().unwrap_or("").to_string();
                    }
                }
                Column::SubmissionId => item.submission_id = value,
                Column::Username => item.username = value,
                Column::Runtime => item.runtime = value,
                Column::Memory => item.memory = value,
                Column::CodeLength => item.code_length = value,
                Column::Unknown => (),
            }
        }
        list.push(item);
    }
    debug!("Parsed {} result rows", list.len());
    list
}

/// `#next_page` link of a paged status listing.
pub fn next_page(doc: &Html) -> Option<String> {
    dom::first(doc, "#next_page").and_then(|a| attr(a, "href"))
}

/// Accepted rows of `username` in the language of the newest row.
pub fn filter_accepted(table: Vec<ResultRow>, username: &str) -> Vec<ResultRow> {
    let language = match table.first() {
        Some(r) => r.language.clone(),
        None => return table,
    };
    table
        .into_iter()
        .filter(|r| {
            r.result_category == RESULT_ACCEPTED && r.username == username && r.language == language
        })
        .collect()
}

fn number(text: &str) -> u64 {
    dom::leading_number(text).parse().unwrap_or(u64::MAX)
}
fn score(result: &str) -> Option<f64> {
    if result.contains('점') {
        dom::leading_number(result).parse().ok()
    } else {
        None
    }
}

/// `Less` when `a` is the better submission: higher subtask score, then
/// faster, smaller, shorter, and finally newer.
pub fn compare_submission(a: &ResultRow, b: &ResultRow) -> Ordering {
    match (score(&a.result), score(&b.result)) {
        (Some(x), Some(y)) if (x - y).abs() > f64::EPSILON => {
            return y.partial_cmp(&x).unwrap_or(Ordering::Equal)
        }
        _ => (),
    }
    number(&a.runtime)
        .cmp(&number(&b.runtime))
        .then_with(|| number(&a.memory).cmp(&number(&b.memory)))
        .then_with(|| number(&a.code_length).cmp(&number(&b.code_length)))
        .then_with(|| number(&b.submission_id).cmp(&number(&a.submission_id)))
}

/// One best row per problem, in order of first appearance.
pub fn select_best_submission_list(rows: Vec<ResultRow>) -> Vec<ResultRow> {
    let mut order = Vec::new();
    let mut best: HashMap<String, ResultRow> = HashMap::new();
    for row in rows {
        match best.get(&row.problem_id) {
            Some(cur) if compare_submission(cur, &row) != Ordering::Greater => (),
            Some(_) => {
                best.insert(row.problem_id.clone(), row);
            }
            None => {
                order.push(row.problem_id.clone());
                best.insert(row.problem_id.clone(), row);
            }
        }
    }
    order.into_iter().filter_map(|id| best.remove(&id)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const STATUS_PAGE: &str = r#"
<html><body>
<a class="username" href="/user/dahee">dahee</a>
<table id="status-table">
<thead><tr>
  <th>제출 번호</th><th>아이디</th><th>문제</th><th>결과</th>
  <th>메모리</th><th>시간</th><th>언어</th><th>코드 길이</th><th>제출한 시간</th>
</tr></thead>
<tbody>
<tr id="solution-70000003">
  <td>70000003</td><td><a href="/user/dahee">dahee</a></td>
  <td><a href="/problem/1000" class="problem_title tooltip-click">1000</a></td>
  <td class="result"><span class="result-text result-ac" data-color="ac">맞았습니다!!</span></td>
  <td class="memory">2024<span class="kb-text">KB</span></td>
  <td class="time">0<span class="ms-text">ms</span></td>
  <td>C++17 / <a href="/source/70000003">수정</a></td>
  <td>120<span class="b-text">B</span></td>
  <td><a href="/status?top=70000003" class="real-time-update show-date" data-original-title="2024년 3월 5일 21:12:34">1분 전</a></td>
</tr>
<tr id="solution-70000002">
  <td>70000002</td><td><a href="/user/dahee">dahee</a></td>
  <td><a href="/problem/1000" class="problem_title tooltip-click">1000</a></td>
  <td class="result"><span class="result-text result-ac" data-color="ac">맞았습니다!!</span></td>
  <td class="memory">2020<span class="kb-text">KB</span></td>
  <td class="time">0<span class="ms-text">ms</span></td>
  <td>C++17 / <a href="/source/70000002">수정</a></td>
  <td>118<span class="b-text">B</span></td>
  <td><a href="/status?top=70000002" class="real-time-update show-date" data-original-title="2024년 3월 5일 21:10:02">3분 전</a></td>
</tr>
<tr id="solution-70000001">
  <td>70000001</td><td><a href="/user/dahee">dahee</a></td>
  <td><a href="/problem/1000" class="problem_title tooltip-click">1000</a></td>
  <td class="result"><span class="result-text result-wa" data-color="wa">틀렸습니다</span></td>
  <td class="memory"></td><td class="time"></td>
  <td>C++17 / <a href="/source/70000001">수정</a></td>
  <td>110<span class="b-text">B</span></td>
  <td><a href="/status?top=70000001" class="real-time-update show-date" data-original-title="2024년 3월 5일 21:08:00">5분 전</a></td>
</tr>
<tr id="solution-69999999">
  <td>69999999</td><td><a href="/user/other">other</a></td>
  <td><a href="/problem/1000" class="problem_title tooltip-click">1000</a></td>
  <td class="result"><span class="result-text result-ac" data-color="ac">맞았습니다!!</span></td>
  <td class="memory">1000<span class="kb-text">KB</span></td>
  <td class="time">0<span class="ms-text">ms</span></td>
  <td>C++17 / <a href="/source/69999999">수정</a></td>
  <td>90<span class="b-text">B</span></td>
  <td><a href="/status?top=69999999" class="real-time-update show-date" data-original-title="2024년 3월 5일 20:00:00">1시간 전</a></td>
</tr>
</tbody>
</table>
<a id="next_page" href="/status?user_id=dahee&amp;result_id=4&amp;top=69999998">다음 페이지</a>
</body></html>"#;

    #[test]
    fn parses_rows() {
        let rows = parse_result_table(&Html::parse_document(STATUS_PAGE));
        assert_eq!(rows.len(), 4);
        let top = &rows[0];
        assert_eq!(top.element_id, "solution-70000003");
        assert_eq!(top.submission_id, "70000003");
        assert_eq!(top.username, "dahee");
        assert_eq!(top.problem_id, "1000");
        assert_eq!(top.result_category, "ac");
        assert_eq!(top.language, "C++17");
        assert_eq!(top.memory, "2024KB");
        assert_eq!(top.submission_time.as_deref(), Some("2024년 3월 5일 21:12:34"));
        assert_eq!(rows[2].result_category, "wa");
    }

    #[test]
    fn picks_smallest_accepted_submission() {
        let rows = parse_result_table(&Html::parse_document(STATUS_PAGE));
        let best = select_best_submission_list(filter_accepted(rows, "dahee"));
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].submission_id, "70000002");
    }

    #[test]
    fn newer_wins_a_tie() {
        let a = ResultRow {
            submission_id: "10".to_string(),
            problem_id: "1000".to_string(),
            ..ResultRow::default()
        };
        let b = ResultRow {
            submission_id: "11".to_string(),
            ..a.clone()
        };
        assert_eq!(compare_submission(&b, &a), Ordering::Less);
    }

    #[test]
    fn higher_score_wins() {
        let partial = ResultRow {
            result: "40점".to_string(),
            runtime: "0".to_string(),
            ..ResultRow::default()
        };
        let full = ResultRow {
            result: "100점".to_string(),
            runtime: "100".to_string(),
            ..ResultRow::default()
        };
        assert_eq!(compare_submission(&full, &partial), Ordering::Less);
    }

    #[test]
    fn finds_next_page() {
        let doc = Html::parse_document(STATUS_PAGE);
        assert_eq!(
            next_page(&doc).as_deref(),
            Some("/status?user_id=dahee&result_id=4&top=69999998")
        );
    }

    #[test]
    fn missing_table_is_empty() {
        assert!(parse_result_table(&Html::parse_document("<html></html>")).is_empty());
    }
}
