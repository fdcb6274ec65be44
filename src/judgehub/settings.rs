//! User settings read from a YAML file.

extern crate serde;
extern crate serde_yaml;

use crate::{
    config::github::API_BASE,
    format::{FolderScheme, FormatConfig},
    types::{Hook, RepoCoordinates},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    env,
    io::{Read, Write},
};

pub type Result<T> = serde_yaml::Result<T>;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaekjoonSettings {
    pub username: String,
    #[serde(default)]
    pub cookie: Option<String>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweaSettings {
    pub nickname: String,
    #[serde(default)]
    pub cookie: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_api_base() -> String {
    API_BASE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub token: String,
    /// Fork receiving the commits.
    pub hook: Hook,
    /// Repository the pull requests are opened against.
    pub upstream_hook: Hook,
    pub author_tag: String,
    pub display_name: String,
    #[serde(default)]
    pub folder_scheme: FolderScheme,
    #[serde(default)]
    pub version_ignore: HashSet<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub baekjoon: Option<BaekjoonSettings>,
    #[serde(default)]
    pub swea: Option<SweaSettings>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Settings {
    pub fn format_config(&self) -> FormatConfig {
        FormatConfig {
            author: self.author_tag.clone(),
            display_name: self.display_name.clone(),
            folder_scheme: self.folder_scheme,
            version_ignore: self.version_ignore.clone(),
        }
    }
    pub fn coordinates(&self) -> RepoCoordinates {
        RepoCoordinates {
            fork: self.hook.clone(),
            upstream: self.upstream_hook.clone(),
        }
    }
    fn fill_token(&mut self, from_env: Option<String>) {
        if self.token.is_empty() {
            if let Some(token) = from_env.filter(|t| !t.is_empty()) {
                self.token = token;
            }
        }
    }
}

/// Parses settings; an empty `token` is taken from `GITHUB_TOKEN`.
pub fn from_reader<R: Read>(rdr: R) -> Result<Settings> {
    let mut settings: Settings = serde_yaml::from_reader(rdr)?;
    settings.fill_token(env::var(TOKEN_ENV).ok());
    Ok(settings)
}
pub fn to_writer<W: Write>(wdr: W, settings: &Settings) -> Result<()> {
    serde_yaml::to_writer(wdr, settings)
}
