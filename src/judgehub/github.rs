//! Git data API calls used to add one file without a local clone.
//!
//! Each call is single-shot: nothing is retried, and each step's output sha is
//! the next step's input.

extern crate async_trait;
extern crate base64;
extern crate reqwest;
extern crate serde;
extern crate serde_json;

use crate::{
    config::github::{ACCEPT, API_BASE, FILE_MODE, USER_AGENT},
    types::Hook,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

mod error;
pub mod types;

pub use error::{Error, Result};
use types::{
    Commit, CommitBody, ErrorBody, NewPullRequest, ObjectBody, PullRequest, RefBody, Reference,
    RemoteEntry, RepoBody, TreeBody, TreeEntry,
};

/// Operations the upload flow needs from a remote git host.
#[async_trait]
pub trait GitRemote: Send + Sync {
    async fn get_default_branch(&self, hook: &Hook) -> Result<String>;
    async fn get_reference(&self, hook: &Hook, branch: &str) -> Result<Reference>;
    async fn get_commit(&self, hook: &Hook, sha: &str) -> Result<Commit>;
    async fn create_blob(&self, hook: &Hook, content: &str, path: &str) -> Result<TreeEntry>;
    async fn create_tree(&self, hook: &Hook, base_tree: &str, entries: &[TreeEntry])
        -> Result<String>;
    async fn create_commit(
        &self,
        hook: &Hook,
        message: &str,
        tree: &str,
        parent: &str,
    ) -> Result<String>;
    async fn create_reference(&self, hook: &Hook, name: &str, sha: &str) -> Result<Reference>;
    async fn update_reference(&self, hook: &Hook, name: &str, sha: &str, force: bool)
        -> Result<String>;
    async fn create_pull_request(
        &self,
        hook: &Hook,
        request: &NewPullRequest<'_>,
    ) -> Result<PullRequest>;
    async fn get_tree(&self, hook: &Hook) -> Result<Vec<RemoteEntry>>;
}

pub struct GitHub {
    client: Client,
    token: String,
    api_base: String,
}

impl GitHub {
    pub fn new(token: String) -> Result<Self> {
        Self::with_base(token, API_BASE.to_string())
    }
    pub fn with_base(token: String, api_base: String) -> Result<Self> {
        Ok(GitHub {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(Error::Builder)?,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, hook: &Hook, path: &str) -> String {
        format!("{}/repos/{}{}", self.api_base, hook, path)
    }
    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header(header::ACCEPT, ACCEPT)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = self
            .request(builder)
            .send()
            .await
            .map_err(Error::Network)?;
        let status = response.status();
        debug!("GitHub {}: {}", what, status);
        if status.is_success() {
            return response.json::<T>().await.map_err(Error::Decode);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(what.to_string()));
        }
        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            message: body.message,
            errors: body.errors,
        })
    }
}

#[async_trait]
impl GitRemote for GitHub {
    async fn get_default_branch(&self, hook: &Hook) -> Result<String> {
        let body: RepoBody = self
            .send(self.client.get(self.url(hook, "")), &format!("repository {}", hook))
            .await?;
        Ok(body.default_branch)
    }

    async fn get_reference(&self, hook: &Hook, branch: &str) -> Result<Reference> {
        let body: RefBody = self
            .send(
                self.client
                    .get(self.url(hook, &format!("/git/refs/heads/{}", branch))),
                &format!("branch {} of {}", branch, hook),
            )
            .await?;
        Ok(Reference {
            sha: body.object.sha,
            name: body.name,
        })
    }

    async fn get_commit(&self, hook: &Hook, sha: &str) -> Result<Commit> {
        let body: CommitBody = self
            .send(
                self.client
                    .get(self.url(hook, &format!("/git/commits/{}", sha))),
                &format!("commit {}", sha),
            )
            .await?;
        Ok(Commit {
            tree_sha: body.tree.sha,
        })
    }

    async fn create_blob(&self, hook: &Hook, content: &str, path: &str) -> Result<TreeEntry> {
        // base64 of the utf-8 bytes, never of individual chars
        let body: ObjectBody = self
            .send(
                self.client.post(self.url(hook, "/git/blobs")).json(&json!({
                    "content": base64::encode(content.as_bytes()),
                    "encoding": "base64",
                })),
                "blob",
            )
            .await?;
        Ok(TreeEntry {
            path: path.to_string(),
            sha: body.sha,
            mode: FILE_MODE,
            kind: "blob",
        })
    }

    async fn create_tree(
        &self,
        hook: &Hook,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<String> {
        let body: ObjectBody = self
            .send(
                self.client
                    .post(self.url(hook, "/git/trees"))
                    .json(&json!({ "tree": entries, "base_tree": base_tree })),
                "tree",
            )
            .await?;
        Ok(body.sha)
    }

    async fn create_commit(
        &self,
        hook: &Hook,
        message: &str,
        tree: &str,
        parent: &str,
    ) -> Result<String> {
        let body: ObjectBody = self
            .send(
                self.client
                    .post(self.url(hook, "/git/commits"))
                    .json(&json!({ "message": message, "tree": tree, "parents": [parent] })),
                "commit",
            )
            .await?;
        Ok(body.sha)
    }

    async fn create_reference(&self, hook: &Hook, name: &str, sha: &str) -> Result<Reference> {
        let body: RefBody = self
            .send(
                self.client
                    .post(self.url(hook, "/git/refs"))
                    .json(&json!({ "ref": name, "sha": sha })),
                &format!("reference {}", name),
            )
            .await?;
        Ok(Reference {
            sha: body.object.sha,
            name: body.name,
        })
    }

    async fn update_reference(
        &self,
        hook: &Hook,
        name: &str,
        sha: &str,
        force: bool,
    ) -> Result<String> {
        let body: RefBody = self
            .send(
                self.client
                    .patch(self.url(hook, &format!("/git/{}", name)))
                    .json(&json!({ "sha": sha, "force": force })),
                &format!("reference {}", name),
            )
            .await?;
        Ok(body.object.sha)
    }

    async fn create_pull_request(
        &self,
        hook: &Hook,
        request: &NewPullRequest<'_>,
    ) -> Result<PullRequest> {
        match self
            .send(
                self.client.post(self.url(hook, "/pulls")).json(request),
                "pull request",
            )
            .await
        {
            Err(Error::Api { errors, .. }) if !errors.is_empty() => {
                Err(Error::PullRequest(errors))
            }
            other => other,
        }
    }

    async fn get_tree(&self, hook: &Hook) -> Result<Vec<RemoteEntry>> {
        let body: TreeBody = self
            .send(
                self.client
                    .get(self.url(hook, "/git/trees/HEAD"))
                    .query(&[("recursive", "1")]),
                &format!("tree of {}", hook),
            )
            .await?;
        Ok(body.tree)
    }
}
