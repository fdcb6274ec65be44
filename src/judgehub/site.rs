//! Per-judge scrapers producing a normalized [`SubmissionRecord`].

extern crate async_trait;

use crate::{config::policy::MIN_PROBLEM_ID, types::{Site, SubmissionRecord}};
use async_trait::async_trait;

pub mod baekjoon;
pub(crate) mod dom;
mod error;
pub mod page;
pub mod programmers;
pub mod swea;

pub use error::{Error, Result};

#[async_trait]
pub trait SubmissionSource: Send + Sync {
    fn site(&self) -> Site;
    /// Checks that need no network, run before anything is fetched.
    fn precheck(&self) -> Result<()> {
        Ok(())
    }
    /// `Ok(None)` when the page does not (yet) show an accepted submission of
    /// the current user; the caller must not upload anything.
    async fn find_submission(&self) -> Result<Option<SubmissionRecord>>;
}

/// Rejects Baekjoon contest problems, whose ids are below the threshold.
pub fn check_policy(site: Site, problem_id: &str) -> Result<()> {
    if site != Site::Baekjoon {
        return Ok(());
    }
    match problem_id.trim().parse::<u32>() {
        Ok(id) if id >= MIN_PROBLEM_ID => Ok(()),
        _ => Err(Error::Policy(problem_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_problems_are_rejected() {
        assert!(check_policy(Site::Baekjoon, "1000").is_ok());
        assert!(matches!(
            check_policy(Site::Baekjoon, "999"),
            Err(Error::Policy(_))
        ));
        assert!(matches!(
            check_policy(Site::Baekjoon, "abc"),
            Err(Error::Policy(_))
        ));
    }

    #[test]
    fn other_sites_have_no_threshold() {
        assert!(check_policy(Site::Programmers, "42576").is_ok());
        assert!(check_policy(Site::SweA, "1").is_ok());
    }
}
