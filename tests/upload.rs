use async_trait::async_trait;
use chrono::Local;
use judgehub::{
    config::text::{APPROACH, EMPTY_SECTION},
    format::{FolderScheme, FormatConfig, Formatter},
    github::{
        self,
        types::{Commit, NewPullRequest, PullRequest, Reference, RemoteEntry, TreeEntry},
        GitRemote,
    },
    hash::blob_sha,
    prompt::Silent,
    site::{
        self,
        baekjoon::{Baekjoon, BaekjoonSource},
        SubmissionSource,
    },
    storage::{swea_code_key, Cache},
    types::{Hook, ProblemDetails, RepoCoordinates, Site, SubmissionRecord},
    upload::{Kind, Outcome, Stage, Uploader},
};
use serde_json::json;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

const FORK: &str = "dahee/algorithm-study";
const UPSTREAM: &str = "study-group/algorithm-study";
const PATH: &str = "src/BOJ/dahee/Cpp/BOJ_1000.cpp";
const CODE: &str = "#include <cstdio>\nint main() { int a, b; scanf(\"%d%d\", &a, &b); printf(\"%d\", a + b); }\n";

/// In-memory git host that logs every call.
#[derive(Default)]
struct FakeRemote {
    log: Arc<Mutex<Vec<String>>>,
    tree: Vec<RemoteEntry>,
    branch_exists: bool,
    reject_pull_request: bool,
}
impl FakeRemote {
    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitRemote for FakeRemote {
    async fn get_default_branch(&self, hook: &Hook) -> github::Result<String> {
        self.record(format!("get_default_branch {}", hook));
        Ok(if hook.to_string() == FORK { "main" } else { "master" }.to_string())
    }
    async fn get_reference(&self, hook: &Hook, branch: &str) -> github::Result<Reference> {
        self.record(format!("get_reference {} {}", hook, branch));
        Ok(Reference {
            sha: "base-sha".to_string(),
            name: format!("refs/heads/{}", branch),
        })
    }
    async fn get_commit(&self, _: &Hook, sha: &str) -> github::Result<Commit> {
        self.record(format!("get_commit {}", sha));
        Ok(Commit {
            tree_sha: "base-tree".to_string(),
        })
    }
    async fn create_blob(&self, _: &Hook, content: &str, path: &str) -> github::Result<TreeEntry> {
        self.record(format!("create_blob {}", path));
        Ok(TreeEntry {
            path: path.to_string(),
            sha: blob_sha(content),
            mode: "100644",
            kind: "blob",
        })
    }
    async fn create_tree(
        &self,
        _: &Hook,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> github::Result<String> {
        self.record(format!("create_tree {} {}", base_tree, entries.len()));
        Ok("new-tree".to_string())
    }
    async fn create_commit(
        &self,
        _: &Hook,
        _: &str,
        tree: &str,
        parent: &str,
    ) -> github::Result<String> {
        self.record(format!("create_commit {} {}", tree, parent));
        Ok("new-commit".to_string())
    }
    async fn create_reference(&self, _: &Hook, name: &str, sha: &str) -> github::Result<Reference> {
        self.record(format!("create_reference {} {}", name, sha));
        if self.branch_exists {
            return Err(github::Error::Api {
                status: 422,
                message: "Reference already exists".to_string(),
                errors: Vec::new(),
            });
        }
        Ok(Reference {
            sha: sha.to_string(),
            name: name.to_string(),
        })
    }
    async fn update_reference(
        &self,
        _: &Hook,
        name: &str,
        sha: &str,
        force: bool,
    ) -> github::Result<String> {
        self.record(format!("update_reference {} {} {}", name, sha, force));
        Ok(sha.to_string())
    }
    async fn create_pull_request(
        &self,
        hook: &Hook,
        request: &NewPullRequest<'_>,
    ) -> github::Result<PullRequest> {
        self.record(format!(
            "create_pull_request {} {} -> {}",
            hook, request.head, request.base
        ));
        if self.reject_pull_request {
            return Err(github::Error::PullRequest(vec![
                json!({ "resource": "PullRequest", "code": "custom", "message": "A pull request already exists" }),
            ]));
        }
        Ok(PullRequest {
            number: 7,
            html_url: format!("https://github.com/{}/pull/7", hook),
        })
    }
    async fn get_tree(&self, hook: &Hook) -> github::Result<Vec<RemoteEntry>> {
        self.record(format!("get_tree {}", hook));
        Ok(self.tree.clone())
    }
}

fn writes(log: &[String]) -> usize {
    log.iter()
        .filter(|c| c.starts_with("create_") || c.starts_with("update_"))
        .count()
}

fn record(problem_id: &str) -> SubmissionRecord {
    SubmissionRecord {
        site: Site::Baekjoon,
        problem_id: problem_id.to_string(),
        submission_id: Some("70000002".to_string()),
        title: "A+B".to_string(),
        level: "Bronze III".to_string(),
        tags: vec!["수학".to_string(), "구현".to_string()],
        language: "C++17".to_string(),
        extension: None,
        code: CODE.to_string(),
        runtime: "0".to_string(),
        memory: "2020".to_string(),
        code_length: Some("118".to_string()),
        submission_time: Some("2024년 3월 5일 21:10:02".to_string()),
        link: format!("https://www.acmicpc.net/problem/{}", problem_id),
        details: ProblemDetails {
            description: "<p>A+B</p>".to_string(),
            input: Some("<p>A B</p>".to_string()),
            output: Some("<p>A+B</p>".to_string()),
        },
    }
}

fn uploader(remote: FakeRemote, cache: Arc<Cache>) -> Uploader<FakeRemote> {
    let formatter = Formatter::new(FormatConfig {
        author: "dahee".to_string(),
        display_name: "다희".to_string(),
        folder_scheme: FolderScheme::Language,
        version_ignore: HashSet::new(),
    })
    .unwrap();
    Uploader::new(
        remote,
        cache,
        formatter,
        RepoCoordinates {
            fork: FORK.parse().unwrap(),
            upstream: UPSTREAM.parse().unwrap(),
        },
    )
}

#[tokio::test]
async fn uploads_then_skips_the_same_code() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let cache = Arc::new(Cache::new());
    let uploader = uploader(remote, cache.clone());

    let outcome = uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap();
    match outcome {
        Outcome::Uploaded {
            branch,
            pull_request,
        } => {
            assert_eq!(branch, "dahee/BOJ-1000");
            assert_eq!(pull_request.number, 7);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            format!("get_tree {}", FORK),
            format!("get_default_branch {}", FORK),
            format!("get_reference {} main", FORK),
            "get_commit base-sha".to_string(),
            "create_reference refs/heads/dahee/BOJ-1000 base-sha".to_string(),
            format!("create_blob {}", PATH),
            "create_tree base-tree 1".to_string(),
            "create_commit new-tree base-sha".to_string(),
            "update_reference refs/heads/dahee/BOJ-1000 new-commit true".to_string(),
            format!("get_default_branch {}", UPSTREAM),
            format!(
                "create_pull_request {} dahee:dahee/BOJ-1000 -> master",
                UPSTREAM
            ),
        ]
    );
    assert_eq!(
        cache.blob_sha(&format!("{}/{}", FORK, PATH)),
        Some(blob_sha(CODE))
    );

    let before = log.lock().unwrap().len();
    let again = uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert_eq!(
        again,
        Outcome::AlreadyUploaded {
            path: PATH.to_string()
        }
    );
    assert_eq!(log.lock().unwrap().len(), before);
}

#[tokio::test]
async fn code_already_in_fork_is_not_written() {
    let remote = FakeRemote {
        tree: vec![
            RemoteEntry {
                path: "src".to_string(),
                sha: "dir".to_string(),
                kind: "tree".to_string(),
            },
            RemoteEntry {
                path: PATH.to_string(),
                sha: blob_sha(CODE),
                kind: "blob".to_string(),
            },
        ],
        ..FakeRemote::default()
    };
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    let outcome = uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::AlreadyUploaded { .. }));
    let log = log.lock().unwrap();
    assert_eq!(writes(&log), 0);
    assert_eq!(*log, vec![format!("get_tree {}", FORK)]);
}

#[tokio::test]
async fn changed_code_is_uploaded_again() {
    let remote = FakeRemote {
        tree: vec![RemoteEntry {
            path: PATH.to_string(),
            sha: blob_sha("int main() {}\n"),
            kind: "blob".to_string(),
        }],
        ..FakeRemote::default()
    };
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));
    uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert_eq!(writes(&log.lock().unwrap()), 6);
}

#[tokio::test]
async fn contest_problem_makes_no_call() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    let err = uploader
        .upload_record(&record("999"), &mut Silent, &Local::now())
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Parsing);
    assert!(matches!(err.kind(), Kind::Site(site::Error::Policy(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_pull_request_keeps_the_branch() {
    let remote = FakeRemote {
        reject_pull_request: true,
        ..FakeRemote::default()
    };
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    let err = uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Stage::PullRequesting);
    assert!(err
        .to_string()
        .contains("Pull request creation failed: [{"));
    assert!(err.to_string().contains("A pull request already exists"));
    assert!(log
        .lock()
        .unwrap()
        .iter()
        .any(|c| c.starts_with("update_reference")));
}

#[tokio::test]
async fn existing_branch_is_moved() {
    let remote = FakeRemote {
        branch_exists: true,
        ..FakeRemote::default()
    };
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    let outcome = uploader
        .upload_record(&record("1000"), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Uploaded { .. }));
    assert!(log
        .lock()
        .unwrap()
        .contains(&"update_reference refs/heads/dahee/BOJ-1000 new-commit true".to_string()));
}

#[tokio::test]
async fn base_branches_are_looked_up_once() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    for id in &["1000", "1001"] {
        uploader
            .upload_record(&record(id), &mut Silent, &Local::now())
            .await
            .unwrap();
    }
    let lookups = log
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.starts_with("get_default_branch"))
        .count();
    assert_eq!(lookups, 2);
}

#[tokio::test]
async fn silent_prompt_fills_placeholders() {
    let uploader = uploader(FakeRemote::default(), Arc::new(Cache::new()));
    let plan = uploader
        .plan(&record("1000"), &mut Silent, &Local::now())
        .unwrap();
    assert!(!plan.pr_body.contains(APPROACH));
    assert!(plan.pr_body.contains(EMPTY_SECTION));
    assert!(plan.pr_body.contains("수학, 구현"));
    assert!(plan.pr_body.contains("2024년 3월 5일 21:10:02"));
}

struct Fixed(Option<SubmissionRecord>);

#[async_trait]
impl SubmissionSource for Fixed {
    fn site(&self) -> Site {
        Site::Baekjoon
    }
    async fn find_submission(&self) -> site::Result<Option<SubmissionRecord>> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn empty_source_uploads_nothing() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));

    let outcome = uploader
        .upload_from(&Fixed(None), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert_eq!(outcome, None);
    assert_eq!(*log.lock().unwrap(), vec![format!("get_tree {}", FORK)]);

    let outcome = uploader
        .upload_from(&Fixed(Some(record("1000"))), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert!(matches!(outcome, Some(Outcome::Uploaded { .. })));
}

/// Stores code in the cache while it is being parsed, like the SWEA source.
struct Caching(Arc<Cache>);

#[async_trait]
impl SubmissionSource for Caching {
    fn site(&self) -> Site {
        Site::Baekjoon
    }
    async fn find_submission(&self) -> site::Result<Option<SubmissionRecord>> {
        self.0.set_code(&swea_code_key("1000"), CODE);
        Ok(Some(record("1000")))
    }
}

#[tokio::test]
async fn stale_cache_is_synced_before_parsing() {
    let cache = Arc::new(Cache::new());
    let uploader = uploader(FakeRemote::default(), cache.clone());

    uploader
        .upload_from(&Caching(cache.clone()), &mut Silent, &Local::now())
        .await
        .unwrap();
    assert_eq!(cache.code(&swea_code_key("1000")).as_deref(), Some(CODE));
}

#[tokio::test]
async fn contest_source_is_rejected_before_sync() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let cache = Arc::new(Cache::new());
    let uploader = uploader(remote, cache.clone());
    let judge = Baekjoon::new("dahee".to_string(), None, cache).unwrap();
    let source = BaekjoonSource::new(judge, "999".to_string(), None);

    let err = uploader
        .upload_from(&source, &mut Silent, &Local::now())
        .await
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Parsing);
    assert!(matches!(err.kind(), Kind::Site(site::Error::Policy(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn contest_plan_is_not_committed() {
    let remote = FakeRemote::default();
    let log = remote.log.clone();
    let uploader = uploader(remote, Arc::new(Cache::new()));
    let mut plan = uploader
        .plan(&record("1000"), &mut Silent, &Local::now())
        .unwrap();
    plan.problem_id = "999".to_string();

    let err = uploader.upload_plan(&plan).await.unwrap_err();
    assert!(matches!(err.kind(), Kind::Site(site::Error::Policy(_))));
    assert!(log.lock().unwrap().is_empty());
}
