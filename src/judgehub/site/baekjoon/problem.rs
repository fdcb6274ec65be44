extern crate scraper;

use crate::{
    config::site::BAEKJOON,
    site::dom::{self, absolute_images, unescape_html},
    types::ProblemDetails,
};
use scraper::Html;

/// Problem id and statement sections of `/problem/{id}`. Input and output
/// stay escaped so their tags can be stripped safely later.
pub fn parse_problem_description(doc: &Html) -> Option<(String, ProblemDetails)> {
    let title = dom::text(dom::first(doc, "title")?);
    let problem_id: String = title
        .split(':')
        .next()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let description = dom::first(doc, "#problem_description")
        .map(|d| unescape_html(absolute_images(d.inner_html().trim(), BAEKJOON).as_str()))?;
    if problem_id.is_empty() || description.is_empty() {
        return None;
    }
    let section = |css: &str| {
        dom::first(doc, css)
            .map(|e| e.inner_html().trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| Some("Empty".to_string()))
    };
    Some((
        problem_id,
        ProblemDetails {
            description,
            input: section("#problem_input"),
            output: section("#problem_output"),
        },
    ))
}
