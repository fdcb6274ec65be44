//! Baekjoon Online Judge: status table, statement, source download and
//! solved.ac metadata, each memoized in the cache.

extern crate async_trait;
extern crate futures;
extern crate reqwest;
extern crate scraper;

use super::{
    check_policy,
    error::{network_error, Error, Result},
    page::session_client,
    SubmissionSource,
};
use crate::{
    config::{
        pool::{FETCH_DEGREE, LOOKUP_CHUNK, LOOKUP_DEGREE},
        site::{BAEKJOON, SOLVED_AC},
    },
    pool::async_pool,
    site::dom::leading_number,
    storage::Cache,
    types::{ProblemDetails, Site, SubmissionRecord},
};
use async_trait::async_trait;
use futures::try_join;
use log::{debug, info};
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;

pub mod problem;
pub mod solved;
pub mod table;

use problem::parse_problem_description;
use solved::SolvedProblem;
use table::{filter_accepted, next_page, parse_result_table, select_best_submission_list, ResultRow};

/// Logged-in Baekjoon session plus the solved.ac API.
pub struct Baekjoon {
    client: Client,
    cache: Arc<Cache>,
    username: String,
}

impl Baekjoon {
    pub fn new(username: String, cookie: Option<&str>, cache: Arc<Cache>) -> Result<Self> {
        Ok(Baekjoon {
            client: session_client(BAEKJOON, cookie)?,
            cache,
            username,
        })
    }
    pub fn username(&self) -> &str {
        &self.username
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?
            .text()
            .await
            .map_err(network_error)
    }

    async fn fetch_problem_description(&self, problem_id: &str) -> Result<Option<ProblemDetails>> {
        let html = self
            .get_text(&format!("{}/problem/{}", BAEKJOON, problem_id))
            .await?;
        Ok(parse_problem_description(&Html::parse_document(&html)).map(|(id, details)| {
            info!("Caching statement of problem {}", id);
            self.cache.set_problem(&id, details.clone());
            details
        }))
    }
    pub async fn get_problem_description(&self, problem_id: &str) -> Result<Option<ProblemDetails>> {
        match self.cache.problem(problem_id) {
            Some(p) => Ok(Some(p)),
            None => self.fetch_problem_description(problem_id).await,
        }
    }

    pub async fn get_submit_code(&self, submission_id: &str) -> Result<String> {
        if let Some(code) = self.cache.code(submission_id) {
            return Ok(code);
        }
        let code = self
            .get_text(&format!("{}/source/download/{}", BAEKJOON, submission_id))
            .await?;
        self.cache.set_code(submission_id, &code);
        Ok(code)
    }

    pub async fn get_solved(&self, problem_id: &str) -> Result<SolvedProblem> {
        if let Some(p) = self.cache.solved(problem_id) {
            return Ok(p);
        }
        let problem: SolvedProblem = self
            .client
            .get(format!("{}/problem/show", SOLVED_AC))
            .query(&[("problemId", problem_id)])
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?
            .json()
            .await
            .map_err(network_error)?;
        self.cache.set_solved(problem_id, problem.clone());
        Ok(problem)
    }

    /// Rows of `username`'s submissions to `problem_id`.
    pub async fn find_result_table(&self, problem_id: &str) -> Result<Vec<ResultRow>> {
        let html = self
            .get_text(&format!(
                "{}/status?from_mine=1&problem_id={}&user_id={}",
                BAEKJOON, problem_id, self.username
            ))
            .await?;
        Ok(parse_result_table(&Html::parse_document(&html)))
    }

    /// Every accepted submission of the user, following `#next_page`.
    pub async fn find_result_table_list(&self) -> Result<Vec<ResultRow>> {
        let mut url = format!("{}/status?user_id={}&result_id=4", BAEKJOON, self.username);
        let mut result = Vec::new();
        loop {
            let html = self.get_text(&url).await?;
            let doc = Html::parse_document(&html);
            result.extend(parse_result_table(&doc));
            match next_page(&doc) {
                Some(href) if href.starts_with('/') => url = format!("{}{}", BAEKJOON, href),
                Some(href) => url = href,
                None => break,
            }
        }
        Ok(result)
    }
    /// One best accepted submission per problem.
    pub async fn find_unique_result_table_list(&self) -> Result<Vec<ResultRow>> {
        Ok(select_best_submission_list(self.find_result_table_list().await?))
    }

    /// solved.ac lookup in chunks of 100 ids, one chunk at a time.
    pub async fn fetch_problem_info_by_ids(&self, ids: &[String]) -> Result<Vec<SolvedProblem>> {
        let chunks: Vec<Vec<String>> = ids.chunks(LOOKUP_CHUNK).map(<[String]>::to_vec).collect();
        let results = async_pool(LOOKUP_DEGREE, chunks, |chunk| async move {
            self.client
                .get(format!("{}/problem/lookup", SOLVED_AC))
                .query(&[("problemIds", chunk.join(","))])
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<SolvedProblem>>()
                .await
        })
        .await;
        let mut problems = Vec::new();
        for r in results {
            for p in r.map_err(network_error)? {
                self.cache.set_solved(&p.problem_id.to_string(), p.clone());
                problems.push(p);
            }
        }
        Ok(problems)
    }
    pub async fn fetch_problem_descriptions_by_ids(
        &self,
        ids: &[String],
    ) -> Vec<Result<Option<ProblemDetails>>> {
        async_pool(FETCH_DEGREE, ids, |id| self.get_problem_description(id)).await
    }
    pub async fn fetch_submission_code_by_ids(&self, ids: &[String]) -> Vec<Result<String>> {
        async_pool(FETCH_DEGREE, ids, |id| self.get_submit_code(id)).await
    }

    /// Statement, code and metadata for an accepted row, merged into a record.
    pub async fn find_problem_info_and_submission_code(
        &self,
        row: &ResultRow,
    ) -> Result<Option<SubmissionRecord>> {
        check_policy(Site::Baekjoon, &row.problem_id)?;
        let (details, code, solved) = try_join!(
            self.get_problem_description(&row.problem_id),
            self.get_submit_code(&row.submission_id),
            self.get_solved(&row.problem_id),
        )?;
        let details = match details {
            Some(d) => d,
            None => {
                debug!("No statement for problem {}", row.problem_id);
                return Ok(None);
            }
        };
        Ok(Some(SubmissionRecord {
            site: Site::Baekjoon,
            problem_id: row.problem_id.clone(),
            submission_id: Some(row.submission_id.clone()),
            title: solved.title_ko.clone(),
            level: solved.level_label(),
            tags: solved.korean_tags(),
            language: row.language.clone(),
            extension: None,
            code,
            runtime: leading_number(&row.runtime),
            memory: leading_number(&row.memory),
            code_length: Some(leading_number(&row.code_length)),
            submission_time: row.submission_time.clone(),
            link: format!("{}/problem/{}", BAEKJOON, row.problem_id),
            details,
        }))
    }
}

/// Best (or a specific) accepted submission of one problem.
pub struct BaekjoonSource {
    judge: Baekjoon,
    problem_id: String,
    submission_id: Option<String>,
}
impl BaekjoonSource {
    pub fn new(judge: Baekjoon, problem_id: String, submission_id: Option<String>) -> Self {
        Self {
            judge,
            problem_id,
            submission_id,
        }
    }
}

/// Picks the requested submission, or the best accepted one.
pub fn select_row(
    table: Vec<ResultRow>,
    username: &str,
    submission_id: Option<&str>,
) -> Option<ResultRow> {
    let accepted = filter_accepted(table, username);
    match submission_id {
        Some(id) => accepted.into_iter().find(|r| r.submission_id == id),
        None => select_best_submission_list(accepted).into_iter().next(),
    }
}

#[async_trait]
impl SubmissionSource for BaekjoonSource {
    fn site(&self) -> Site {
        Site::Baekjoon
    }
    fn precheck(&self) -> Result<()> {
        check_policy(Site::Baekjoon, &self.problem_id)
    }
    async fn find_submission(&self) -> Result<Option<SubmissionRecord>> {
        self.precheck()?;
        let table = self.judge.find_result_table(&self.problem_id).await?;
        if table.is_empty() {
            return Ok(None);
        }
        match select_row(table, self.judge.username(), self.submission_id.as_deref()) {
            Some(row) => self.judge.find_problem_info_and_submission_code(&row).await,
            None => {
                info!("No accepted submission of {} for {}", self.judge.username(), self.problem_id);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{table::tests::STATUS_PAGE, *};

    fn rows() -> Vec<ResultRow> {
        parse_result_table(&Html::parse_document(STATUS_PAGE))
    }

    #[test]
    fn selects_requested_submission() {
        let row = select_row(rows(), "dahee", Some("70000003")).unwrap();
        assert_eq!(row.submission_id, "70000003");
    }

    #[test]
    fn rejected_submission_is_not_selected() {
        assert!(select_row(rows(), "dahee", Some("70000001")).is_none());
    }

    #[test]
    fn other_users_are_ignored() {
        assert!(select_row(rows(), "nobody", None).is_none());
        assert_eq!(
            select_row(rows(), "dahee", None).unwrap().submission_id,
            "70000002"
        );
    }

    #[tokio::test]
    async fn contest_problem_fails_before_any_request() {
        let cache = Arc::new(Cache::new());
        let judge = Baekjoon::new("dahee".to_string(), None, cache).unwrap();
        let source = BaekjoonSource::new(judge, "999".to_string(), None);
        // No server is reachable in tests, so reaching the network would be a
        // network error rather than a policy error.
        assert!(matches!(
            source.find_submission().await,
            Err(Error::Policy(_))
        ));
    }

    #[tokio::test]
    async fn cached_entries_skip_the_network() {
        let cache = Arc::new(Cache::new());
        cache.set_code("70000002", "int main() {}");
        cache.set_problem(
            "1000",
            ProblemDetails {
                description: "<p>A+B</p>".to_string(),
                input: None,
                output: None,
            },
        );
        cache.set_solved(
            "1000",
            SolvedProblem {
                problem_id: 1000,
                title_ko: "A+B".to_string(),
                level: 3,
                tags: Vec::new(),
            },
        );
        let judge = Baekjoon::new("dahee".to_string(), None, cache).unwrap();
        let row = select_row(rows(), "dahee", None).unwrap();
        let record = judge
            .find_problem_info_and_submission_code(&row)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.title, "A+B");
        assert_eq!(record.level, "Bronze III");
        assert_eq!(record.language, "C++17");
        assert_eq!(record.memory, "2020");
        assert_eq!(record.runtime, "0");
        assert!(record.tags.is_empty());
    }
}
