//! Flat key-value cache persisted as YAML.
//!
//! Holds the schema version, base branch per repository, uploaded blob hashes
//! by path, and memoized problem descriptions, submitted code and solved.ac
//! metadata. Entries are never evicted; a version change wipes everything.

extern crate serde;
extern crate serde_yaml;

use crate::{
    config::storage::VERSION, site::baekjoon::solved::SolvedProblem, types::ProblemDetails,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yaml::{from_reader, to_writer};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, Read, Write},
    path::Path,
    sync::{Mutex, MutexGuard},
};

mod error;

pub use error::{Error, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stats {
    version: Option<String>,
    #[serde(default)]
    synced: HashSet<String>,
    #[serde(default)]
    branches: HashMap<String, String>,
    #[serde(default)]
    submission: HashMap<String, String>,
    #[serde(default)]
    problems: HashMap<String, ProblemDetails>,
    #[serde(default)]
    codes: HashMap<String, String>,
    #[serde(default)]
    solved: HashMap<String, SolvedProblem>,
}

/// Writers are last-writer-wins; the lock is never held across an await.
#[derive(Debug, Default)]
pub struct Cache {
    stats: Mutex<Stats>,
}

/// Key under which SWEA keeps the code captured from the solving page.
pub fn swea_code_key(problem_id: &str) -> String {
    format!("swea:{}", problem_id)
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }
    fn stats(&self) -> MutexGuard<'_, Stats> {
        self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn load<R: Read>(rdr: R) -> Result<Self> {
        let stats: Stats = from_reader(rdr).map_err(Error::Yaml)?;
        Ok(Self {
            stats: Mutex::new(stats),
        })
    }
    pub fn save<W: Write>(&self, wr: W) -> Result<()> {
        to_writer(wr, &*self.stats()).map_err(Error::Yaml)
    }
    /// A missing file is an empty cache.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        match File::open(path.as_ref()) {
            Ok(f) => Self::load(f),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No cache at {}, starting empty", path.as_ref().display());
                Ok(Self::new())
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save(File::create(path).map_err(Error::Io)?)
    }

    pub fn is_current(&self) -> bool {
        self.stats().version.as_deref() == Some(VERSION)
    }
    /// Full invalidation: every namespace is dropped and the version bumped.
    pub fn reset(&self) {
        let mut stats = self.stats();
        info!(
            "Resetting cache (version {:?} -> {})",
            stats.version, VERSION
        );
        *stats = Stats {
            version: Some(VERSION.to_string()),
            ..Stats::default()
        };
    }
    pub fn is_synced(&self, hook: &str) -> bool {
        self.stats().synced.contains(hook)
    }
    pub fn mark_synced(&self, hook: &str) {
        self.stats().synced.insert(hook.to_string());
    }

    pub fn branch(&self, hook: &str) -> Option<String> {
        self.stats().branches.get(hook).cloned()
    }
    pub fn set_branch(&self, hook: &str, branch: &str) {
        self.stats()
            .branches
            .insert(hook.to_string(), branch.to_string());
    }

    /// Hash of the blob last uploaded (or seen in the tree) at `{hook}/{path}`.
    pub fn blob_sha(&self, path: &str) -> Option<String> {
        self.stats().submission.get(path).cloned()
    }
    pub fn set_blob_sha(&self, path: &str, sha: &str) {
        self.stats()
            .submission
            .insert(path.to_string(), sha.to_string());
    }

    pub fn problem(&self, id: &str) -> Option<ProblemDetails> {
        self.stats().problems.get(id).cloned()
    }
    pub fn set_problem(&self, id: &str, details: ProblemDetails) {
        self.stats().problems.insert(id.to_string(), details);
    }

    pub fn code(&self, key: &str) -> Option<String> {
        self.stats().codes.get(key).cloned()
    }
    pub fn set_code(&self, key: &str, code: &str) {
        self.stats().codes.insert(key.to_string(), code.to_string());
    }

    pub fn solved(&self, id: &str) -> Option<SolvedProblem> {
        self.stats().solved.get(id).cloned()
    }
    pub fn set_solved(&self, id: &str, problem: SolvedProblem) {
        self.stats().solved.insert(id.to_string(), problem);
    }
}
