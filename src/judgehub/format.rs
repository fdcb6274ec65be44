//! Turns a [`SubmissionRecord`] into the path, commit message, pull request
//! body and final code of an [`UploadPlan`].

extern crate chrono;
extern crate handlebars;
extern crate serde;

use crate::{
    config::text::{ALGORITHM, APPROACH, DIFFICULTY, LEARNED, NO_CLASSIFICATION},
    language,
    site::dom::{strip_tags, unescape_html},
    types::{Site, SubmissionRecord, UploadPlan},
};
use chrono::{DateTime, Datelike, Local};
use handlebars::{no_escape, Handlebars};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod error;
pub mod java;
mod template;

pub use error::{Error, Result};
use error::{render_error, template_error};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const DATE_FORMAT: &str = "%Y년 %m월 %d일 %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderScheme {
    /// `src/{SITE}/{author}/{Language}`
    Language,
    /// `src/{SITE}/{author}`
    Platform,
}
impl Default for FolderScheme {
    fn default() -> Self {
        FolderScheme::Language
    }
}

#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Path segment and package name, e.g. `dahee`.
    pub author: String,
    /// Name in the commit message prefix, e.g. `다희`.
    pub display_name: String,
    pub folder_scheme: FolderScheme,
    /// Labels whose trailing version token is kept in folder names.
    pub version_ignore: HashSet<String>,
}

#[derive(Serialize)]
struct Context<'a> {
    problem_id: &'a str,
    title: &'a str,
    link: &'a str,
    level: &'a str,
    category: String,
    date: String,
    description: String,
    input: String,
    output: String,
    memory: &'a str,
    runtime: &'a str,
    code_length: &'a str,
    algorithm: &'static str,
    approach: &'static str,
    difficulty: &'static str,
    learned: &'static str,
}

pub struct Formatter {
    engine: Handlebars<'static>,
    config: FormatConfig,
}

fn template_name(site: Site) -> &'static str {
    site.tag()
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.register_escape_fn(no_escape);
        for (site, text) in [
            (Site::Baekjoon, template::BAEKJOON),
            (Site::Programmers, template::PROGRAMMERS),
            (Site::SweA, template::SWEA),
        ]
        .iter()
        {
            engine
                .register_template_string(template_name(*site), *text)
                .map_err(template_error)?;
        }
        Ok(Formatter { engine, config })
    }
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    fn extension<'a>(&self, record: &'a SubmissionRecord) -> Result<&'a str> {
        match &record.extension {
            Some(ext) => Ok(ext.as_str()),
            None => language::extension(&record.language)
                .ok_or_else(|| Error::UnknownLanguage(record.language.clone())),
        }
    }

    fn directory(&self, record: &SubmissionRecord) -> String {
        let base = format!("src/{}/{}", record.site.tag(), self.config.author);
        match self.config.folder_scheme {
            FolderScheme::Platform => base,
            FolderScheme::Language => format!(
                "{}/{}",
                base,
                language::folder(&record.language, &self.config.version_ignore)
            ),
        }
    }

    fn commit_message(&self, record: &SubmissionRecord, now: &DateTime<Local>) -> String {
        format!(
            "[{}/{}] {} {} {}",
            MONTHS[now.month0() as usize],
            self.config.display_name,
            record.site.tag(),
            record.problem_id,
            record.title
        )
    }

    fn body(&self, record: &SubmissionRecord, now: &DateTime<Local>) -> Result<String> {
        let details = &record.details;
        let category = if record.tags.is_empty() {
            NO_CLASSIFICATION.to_string()
        } else if record.site == Site::Programmers {
            record.tags.join(" > ")
        } else {
            record.tags.join(", ")
        };
        let description = match record.site {
            Site::Programmers => strip_tags(&details.description),
            _ => details.description.clone(),
        };
        let clean = |s: &Option<String>| {
            unescape_html(strip_tags(s.as_deref().unwrap_or("")).trim())
        };
        let context = Context {
            problem_id: &record.problem_id,
            title: &record.title,
            link: &record.link,
            level: &record.level,
            category,
            date: record
                .submission_time
                .clone()
                .unwrap_or_else(|| now.format(DATE_FORMAT).to_string()),
            description,
            input: clean(&details.input),
            output: clean(&details.output),
            memory: &record.memory,
            runtime: &record.runtime,
            code_length: record.code_length.as_deref().unwrap_or(""),
            algorithm: ALGORITHM,
            approach: APPROACH,
            difficulty: DIFFICULTY,
            learned: LEARNED,
        };
        self.engine
            .render(template_name(record.site), &context)
            .map_err(render_error)
    }

    fn code(&self, record: &SubmissionRecord, extension: &str) -> String {
        if extension != "java" {
            return record.code.clone();
        }
        let author = &self.config.author;
        match record.site {
            Site::Baekjoon => java::with_package(
                &java::rename_public_class(&record.code, &format!("BOJ_{}", record.problem_id)),
                &format!("BOJ.{}", author),
                "\n\n",
            ),
            Site::SweA => java::with_package(
                &java::rename_public_class(&record.code, &format!("SWEA_{}", record.problem_id)),
                &format!("SWEA.{}", record.level),
                "\n",
            ),
            Site::Programmers => java::wrap_solution(&record.code, &record.problem_id, author),
        }
    }

    /// Same record, configuration and `now` always give the same plan.
    pub fn format(&self, record: &SubmissionRecord, now: &DateTime<Local>) -> Result<UploadPlan> {
        let extension = self.extension(record)?;
        Ok(UploadPlan {
            site: record.site,
            problem_id: record.problem_id.clone(),
            directory: self.directory(record),
            file_name: format!("{}_{}.{}", record.site.tag(), record.problem_id, extension),
            commit_message: self.commit_message(record, now),
            pr_body: self.body(record, now)?,
            code: self.code(record, extension),
        })
    }
}
