//! Parser → formatter → GitHub, one submission at a time.
//!
//! A plan whose code hashes to the blob already recorded for its path is not
//! written again. Otherwise a fresh branch is cut from the fork's base branch,
//! the file is committed on it and a pull request is opened upstream. Nothing
//! is rolled back: a failed pull request leaves the branch in place.

extern crate chrono;

use crate::{
    format::Formatter,
    github::{
        self,
        types::{NewPullRequest, PullRequest},
        GitRemote,
    },
    hash::blob_sha,
    prompt::{fill_body, Prompt},
    site::{check_policy, SubmissionSource},
    storage::Cache,
    types::{Hook, RepoCoordinates, SubmissionRecord, UploadPlan},
};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::sync::Arc;

mod error;

pub use error::{Error, Kind, Result, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Same content is already on the fork; nothing was written.
    AlreadyUploaded { path: String },
    Uploaded {
        branch: String,
        pull_request: PullRequest,
    },
}

pub struct Uploader<R: GitRemote> {
    remote: R,
    cache: Arc<Cache>,
    formatter: Formatter,
    coordinates: RepoCoordinates,
}

impl<R: GitRemote> Uploader<R> {
    pub fn new(
        remote: R,
        cache: Arc<Cache>,
        formatter: Formatter,
        coordinates: RepoCoordinates,
    ) -> Self {
        Uploader {
            remote,
            cache,
            formatter,
            coordinates,
        }
    }
    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    fn cache_key(&self, plan: &UploadPlan) -> String {
        format!("{}/{}", self.coordinates.fork, plan.path())
    }

    /// Drops the whole cache and re-seeds blob hashes from the fork's tree.
    pub async fn sync(&self) -> Result<usize> {
        let fork = &self.coordinates.fork;
        self.cache.reset();
        let entries = self
            .remote
            .get_tree(fork)
            .await
            .map_err(Error::github(Stage::Syncing))?;
        let mut count = 0;
        for entry in entries.iter().filter(|e| e.kind == "blob") {
            self.cache
                .set_blob_sha(&format!("{}/{}", fork, entry.path), &entry.sha);
            count += 1;
        }
        self.cache.mark_synced(&fork.to_string());
        info!("Synced {} blobs of {}", count, fork);
        Ok(count)
    }
    /// Syncs when the cache is stale or has never seen the fork.
    pub async fn ensure_current(&self) -> Result<()> {
        if !self.cache.is_current() || !self.cache.is_synced(&self.coordinates.fork.to_string()) {
            self.sync().await?;
        }
        Ok(())
    }

    /// Policy check, formatting and the free-text prompts. No network.
    pub fn plan<P: Prompt + ?Sized>(
        &self,
        record: &SubmissionRecord,
        prompt: &mut P,
        now: &DateTime<Local>,
    ) -> Result<UploadPlan> {
        check_policy(record.site, &record.problem_id)?;
        let mut plan = self.formatter.format(record, now)?;
        plan.pr_body = fill_body(&plan.pr_body, prompt);
        Ok(plan)
    }

    /// Base branch of `hook`, looked up once and then cached.
    async fn base_branch(&self, hook: &Hook) -> Result<String> {
        let key = hook.to_string();
        if let Some(branch) = self.cache.branch(&key) {
            return Ok(branch);
        }
        let branch = self
            .remote
            .get_default_branch(hook)
            .await
            .map_err(Error::github(Stage::BranchResolution))?;
        debug!("Default branch of {} is {}", hook, branch);
        self.cache.set_branch(&key, &branch);
        Ok(branch)
    }

    /// Commits the plan on a new branch of the fork and returns its name.
    async fn commit(&self, plan: &UploadPlan) -> Result<String> {
        let fork = &self.coordinates.fork;
        let base = self.base_branch(fork).await?;
        let err = || Error::github(Stage::Committing);

        let head = self
            .remote
            .get_reference(fork, &base)
            .await
            .map_err(err())?;
        let commit = self
            .remote
            .get_commit(fork, &head.sha)
            .await
            .map_err(err())?;

        let branch = plan.branch_name(&self.formatter.config().author);
        let reference = format!("refs/heads/{}", branch);
        match self.remote.create_reference(fork, &reference, &head.sha).await {
            Ok(_) => (),
            Err(github::Error::Api { status: 422, .. }) => {
                warn!("Branch {} already exists, moving it", branch)
            }
            Err(e) => return Err(err()(e)),
        }

        let entry = self
            .remote
            .create_blob(fork, &plan.code, &plan.path())
            .await
            .map_err(err())?;
        let tree = self
            .remote
            .create_tree(fork, &commit.tree_sha, &[entry])
            .await
            .map_err(err())?;
        let sha = self
            .remote
            .create_commit(fork, &plan.commit_message, &tree, &head.sha)
            .await
            .map_err(err())?;
        self.remote
            .update_reference(fork, &reference, &sha, true)
            .await
            .map_err(err())?;
        info!("Committed {} on {}:{}", plan.path(), fork, branch);
        Ok(branch)
    }

    async fn open_pull_request(&self, plan: &UploadPlan, branch: &str) -> Result<PullRequest> {
        let RepoCoordinates { fork, upstream } = &self.coordinates;
        let base = self.base_branch(upstream).await?;
        let head = format!("{}:{}", fork.owner(), branch);
        let pr = self
            .remote
            .create_pull_request(
                upstream,
                &NewPullRequest {
                    title: &plan.commit_message,
                    body: &plan.pr_body,
                    head: &head,
                    base: &base,
                },
            )
            .await
            .map_err(Error::github(Stage::PullRequesting))?;
        info!("Opened pull request #{}: {}", pr.number, pr.html_url);
        Ok(pr)
    }

    pub async fn upload_plan(&self, plan: &UploadPlan) -> Result<Outcome> {
        check_policy(plan.site, &plan.problem_id)?;
        self.ensure_current().await?;
        let key = self.cache_key(plan);
        if self.cache.blob_sha(&key).as_deref() == Some(blob_sha(&plan.code).as_str()) {
            info!("{} is already uploaded", plan.path());
            return Ok(Outcome::AlreadyUploaded { path: plan.path() });
        }
        let branch = self.commit(plan).await?;
        self.cache.set_blob_sha(&key, &blob_sha(&plan.code));
        let pull_request = self.open_pull_request(plan, &branch).await?;
        Ok(Outcome::Uploaded {
            branch,
            pull_request,
        })
    }

    pub async fn upload_record<P: Prompt + ?Sized>(
        &self,
        record: &SubmissionRecord,
        prompt: &mut P,
        now: &DateTime<Local>,
    ) -> Result<Outcome> {
        let plan = self.plan(record, prompt, now)?;
        self.upload_plan(&plan).await
    }

    /// `Ok(None)` when the source has nothing to upload. The cache is brought
    /// up to date before the source runs, so what it fetches is kept.
    pub async fn upload_from<S, P>(
        &self,
        source: &S,
        prompt: &mut P,
        now: &DateTime<Local>,
    ) -> Result<Option<Outcome>>
    where
        S: SubmissionSource + ?Sized,
        P: Prompt + ?Sized,
    {
        source.precheck()?;
        self.ensure_current().await?;
        match source.find_submission().await? {
            Some(record) => Ok(Some(self.upload_record(&record, prompt, now).await?)),
            None => {
                debug!("{} page has no submission to upload", source.site());
                Ok(None)
            }
        }
    }
}
