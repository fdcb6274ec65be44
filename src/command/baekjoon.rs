extern crate chrono;
extern crate termcolor;

use crate::{
    read::{read_line, read_optional, StdinPrompt},
    write::write_outcome,
    Context,
};
use chrono::Local;
use judgehub::{
    prompt::Silent,
    site::{
        baekjoon::{Baekjoon, BaekjoonSource},
        check_policy,
    },
    types::Site,
};
use std::io::Write;
use termcolor::{Color, StandardStream};

fn open_judge(stdout: &mut StandardStream, ctx: &Context) -> Option<Baekjoon> {
    let settings = match ctx.settings.baekjoon.as_ref() {
        Some(s) => s,
        None => {
            write_error!(stdout, "Error", "No `baekjoon` section in settings");
            return None;
        }
    };
    match Baekjoon::new(
        settings.username.clone(),
        settings.cookie.as_deref(),
        ctx.uploader.cache().clone(),
    ) {
        Ok(j) => Some(j),
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            None
        }
    }
}

pub async fn upload_one(stdout: &mut StandardStream, ctx: &Context) {
    let judge = match open_judge(stdout, ctx) {
        Some(j) => j,
        None => return,
    };
    let problem = read_line(stdout, b"Problem id: ").trim().to_string();
    let submission = read_optional(stdout, b"Submission id (empty for best): ");
    write_progress!(stdout, "Search", "Problem {} of {}", problem, judge.username());
    let source = BaekjoonSource::new(judge, problem, submission);
    let result = ctx
        .uploader
        .upload_from(&source, &mut StdinPrompt::new(stdout), &Local::now())
        .await;
    write_outcome(stdout, result);
}

/// Every accepted problem of the user, with placeholder sections.
pub async fn upload_all(stdout: &mut StandardStream, ctx: &Context) {
    let judge = match open_judge(stdout, ctx) {
        Some(j) => j,
        None => return,
    };
    if let Err(e) = ctx.uploader.ensure_current().await {
        write_error!(stdout, "Error", "{}", e);
        return;
    }
    write_progress!(stdout, "Search", "Reading status pages of {}", judge.username());
    let rows: Vec<_> = match judge.find_unique_result_table_list().await {
        Ok(r) => r
            .into_iter()
            .filter(|r| check_policy(Site::Baekjoon, &r.problem_id).is_ok())
            .collect(),
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            return;
        }
    };
    write_info!(stdout, "Info", "Found {} accepted problems", rows.len());

    let problems: Vec<String> = rows.iter().map(|r| r.problem_id.clone()).collect();
    let submissions: Vec<String> = rows.iter().map(|r| r.submission_id.clone()).collect();
    write_progress!(stdout, "Fetch", "Problem metadata");
    if let Err(e) = judge.fetch_problem_info_by_ids(&problems).await {
        write_error!(stdout, "Error", "{}", e);
        return;
    }
    write_progress!(stdout, "Fetch", "Problem statements");
    for (id, r) in problems
        .iter()
        .zip(judge.fetch_problem_descriptions_by_ids(&problems).await)
    {
        if let Err(e) = r {
            write_warn!(stdout, "Warning", "Statement of {}: {}", id, e);
        }
    }
    write_progress!(stdout, "Fetch", "Submitted code");
    for (id, r) in submissions
        .iter()
        .zip(judge.fetch_submission_code_by_ids(&submissions).await)
    {
        if let Err(e) = r {
            write_warn!(stdout, "Warning", "Code of submission {}: {}", id, e);
        }
    }

    let now = Local::now();
    let (mut uploaded, mut failed) = (0, 0);
    for (i, row) in rows.iter().enumerate() {
        write_progress!(
            stdout,
            "Upload",
            "[{}/{}] Problem {}",
            i + 1,
            rows.len(),
            row.problem_id
        );
        let result = match judge.find_problem_info_and_submission_code(row).await {
            Ok(Some(record)) => ctx
                .uploader
                .upload_record(&record, &mut Silent, &now)
                .await
                .map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e.into()),
        };
        match &result {
            Ok(Some(_)) => uploaded += 1,
            Ok(None) => (),
            Err(_) => failed += 1,
        }
        write_outcome(stdout, result);
    }
    write_info!(
        stdout,
        "Info",
        "{} handled, {} failed",
        uploaded,
        failed
    );
}
