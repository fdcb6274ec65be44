extern crate chrono;
extern crate termcolor;
extern crate tokio;

use crate::{read::read_line, read::StdinPrompt, write::write_outcome, Context};
use chrono::Local;
use judgehub::{
    config::site::SWEA,
    settings::SweaSettings,
    site::{
        page::Page,
        swea::{result_url, watch_solving_page, SweaSource},
    },
};
use std::io::Write;
use termcolor::{Color, StandardStream};
use tokio::{signal, sync::watch};

fn read_page<'a>(
    stdout: &mut StandardStream,
    ctx: &'a Context,
    prompt: &[u8],
) -> Option<(&'a SweaSettings, Page)> {
    let settings = match ctx.settings.swea.as_ref() {
        Some(s) => s,
        None => {
            write_error!(stdout, "Error", "No `swea` section in settings");
            return None;
        }
    };
    let arg = read_line(stdout, prompt);
    match Page::from_arg(arg.trim(), SWEA, settings.cookie.as_deref()) {
        Ok(p) => Some((settings, p)),
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            None
        }
    }
}

/// Polls a solving page until it passes, then stores the code.
pub async fn watch(stdout: &mut StandardStream, ctx: &Context) {
    let (settings, page) = match read_page(stdout, ctx, b"Solving page (file or url): ") {
        Some(v) => v,
        None => return,
    };
    let (tx, rx) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });
    write_progress!(stdout, "Watch", "Waiting for a pass, Ctrl-C to stop");
    let result = watch_solving_page(&page, ctx.uploader.cache(), rx).await;
    interrupt.abort();
    match result {
        Ok(Some(solved)) => {
            write_ok!(
                stdout,
                "Pass",
                "Saved code of problem {}",
                solved.problem_id
            );
            write_info!(
                stdout,
                "Info",
                "Open the result page and run `swea`: {}",
                result_url(
                    &page.origin(SWEA),
                    &solved.contest_prob_id,
                    &settings.nickname
                )
            );
        }
        Ok(None) => write_info!(stdout, "Info", "Stopped watching"),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}

pub async fn upload(stdout: &mut StandardStream, ctx: &Context) {
    let (settings, page) = match read_page(stdout, ctx, b"Result page (file or url): ") {
        Some(v) => v,
        None => return,
    };
    let origin = page.origin(SWEA);
    let source = SweaSource::new(
        page,
        ctx.uploader.cache().clone(),
        settings.nickname.clone(),
        origin,
    );
    let result = ctx
        .uploader
        .upload_from(&source, &mut StdinPrompt::new(stdout), &Local::now())
        .await;
    write_outcome(stdout, result);
}
