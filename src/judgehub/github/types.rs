extern crate serde;
extern crate serde_json;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub sha: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub tree_sha: String,
}

/// Entry of a tree being written. `mode` is always a regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Entry of a tree listed from the remote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteEntry {
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    /// `owner:branch` of the fork.
    pub head: &'a str,
    pub base: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

// Response bodies, only the fields read back.

#[derive(Deserialize)]
pub(super) struct RepoBody {
    pub default_branch: String,
}
#[derive(Deserialize)]
pub(super) struct ObjectBody {
    pub sha: String,
}
#[derive(Deserialize)]
pub(super) struct RefBody {
    #[serde(rename = "ref")]
    pub name: String,
    pub object: ObjectBody,
}
#[derive(Deserialize)]
pub(super) struct CommitBody {
    pub tree: ObjectBody,
}
#[derive(Deserialize)]
pub(super) struct TreeBody {
    pub tree: Vec<RemoteEntry>,
}
#[derive(Deserialize, Default)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<Value>,
}
