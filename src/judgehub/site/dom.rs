extern crate regex;
extern crate scraper;

use log::warn;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

struct MarkupRegex {
    tag: Regex,
    root_image: Regex,
    number: Regex,
}
impl MarkupRegex {
    fn new() -> Self {
        MarkupRegex {
            tag: Regex::new(r"<[^>]*>?").unwrap(),
            root_image: Regex::new(r#"(<img[^>]*\ssrc=")/"#).unwrap(),
            number: Regex::new(r"[0-9]+(\.[0-9]+)?").unwrap(),
        }
    }
}
fn regex() -> &'static MarkupRegex {
    static REGEX: OnceLock<MarkupRegex> = OnceLock::new();
    REGEX.get_or_init(MarkupRegex::new)
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("Bad selector {}: {:?}", css, e);
            None
        }
    }
}

pub fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    doc.select(&selector(css)?).next()
}
pub fn last<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    doc.select(&selector(css)?).last()
}
pub fn all<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(s) => doc.select(&s).collect(),
        None => Vec::new(),
    }
}
pub fn first_in<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    el.select(&selector(css)?).next()
}

/// Concatenated descendant text, like `textContent`.
pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
pub fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value().attr(name).map(str::to_string)
}
/// Direct element children with tag `name`.
pub fn children<'a>(el: ElementRef<'a>, names: &[&str]) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| names.contains(&c.value().name()))
        .collect()
}

pub fn strip_tags(html: &str) -> String {
    regex().tag.replace_all(html, "").into_owned()
}

pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Rewrites root-relative image sources against `origin`.
pub fn absolute_images(html: &str, origin: &str) -> String {
    regex()
        .root_image
        .replace_all(html, format!("${{1}}{}/", origin).as_str())
        .into_owned()
}

/// First run of digits in `text`, or the trimmed text itself.
pub fn leading_number(text: &str) -> String {
    let trimmed = text.trim();
    regex()
        .number
        .find(trimmed)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Half-width punctuation to the full-width forms used in folder names.
pub fn widen(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '!' => '！',
            '%' => '％',
            '&' => '＆',
            '(' => '（',
            ')' => '）',
            '*' => '＊',
            '+' => '＋',
            ',' => '，',
            '-' => '－',
            '.' => '．',
            '/' => '／',
            ':' => '：',
            ';' => '；',
            '<' => '＜',
            '=' => '＝',
            '>' => '＞',
            '?' => '？',
            '@' => '＠',
            '[' => '［',
            '\\' => '＼',
            ']' => '］',
            '^' => '＾',
            '_' => '＿',
            '`' => '｀',
            '{' => '｛',
            '|' => '｜',
            '}' => '｝',
            '~' => '～',
            ' ' => '\u{2005}',
            c => c,
        })
        .collect()
}
