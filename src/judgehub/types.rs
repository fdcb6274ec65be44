extern crate serde;

use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt, str::FromStr};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Baekjoon,
    Programmers,
    SweA,
}
impl Site {
    /// Short tag used in paths, file names and commit messages.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Baekjoon => "BOJ",
            Self::Programmers => "PRO",
            Self::SweA => "SWEA",
        }
    }
}
impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Baekjoon => "Baekjoon",
            Self::Programmers => "Programmers",
            Self::SweA => "SW Expert Academy",
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProblemDetails {
    pub description: String,
    pub input: Option<String>,
    pub output: Option<String>,
}

/// Normalized accepted submission, identical in shape for every judge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubmissionRecord {
    pub site: Site,
    pub problem_id: String,
    pub submission_id: Option<String>,
    pub title: String,
    pub level: String,
    pub tags: Vec<String>,
    pub language: String,
    /// Set when the page names the file extension directly.
    pub extension: Option<String>,
    pub code: String,
    pub runtime: String,
    pub memory: String,
    pub code_length: Option<String>,
    pub submission_time: Option<String>,
    pub link: String,
    pub details: ProblemDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub site: Site,
    pub problem_id: String,
    pub directory: String,
    pub file_name: String,
    pub commit_message: String,
    pub pr_body: String,
    pub code: String,
}
impl UploadPlan {
    pub fn path(&self) -> String {
        format!("{}/{}", self.directory, self.file_name)
    }
    /// Branch name built from the author tag and the digits of the file name.
    pub fn branch_name(&self, author: &str) -> String {
        let digits: String = self.file_name.chars().filter(char::is_ascii_digit).collect();
        format!("{}/{}-{}", author, self.site.tag(), digits)
    }
}

/// `owner/repo` pair used as the GitHub API path segment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Hook {
    owner: String,
    repo: String,
}
impl Hook {
    pub fn owner(&self) -> &str {
        &self.owner
    }
    pub fn repo(&self) -> &str {
        &self.repo
    }
}
impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError(String);
impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid repository {:?}, expected owner/repo", self.0)
    }
}
impl StdError for HookError {}

impl FromStr for Hook {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.trim().split('/');
        match (it.next(), it.next(), it.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Ok(Hook {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(HookError(s.to_string())),
        }
    }
}
impl std::convert::TryFrom<String> for Hook {
    type Error = HookError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
impl From<Hook> for String {
    fn from(hook: Hook) -> Self {
        hook.to_string()
    }
}

/// Fork receiving the commit and upstream receiving the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub fork: Hook,
    pub upstream: Hook,
}
