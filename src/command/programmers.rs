extern crate chrono;
extern crate termcolor;

use crate::{read::read_line, read::StdinPrompt, write::write_outcome, Context};
use chrono::Local;
use judgehub::{
    config::site::PROGRAMMERS,
    site::{page::Page, programmers::ProgrammersSource},
};
use std::io::Write;
use termcolor::{Color, StandardStream};

pub async fn upload(stdout: &mut StandardStream, ctx: &Context) {
    let arg = read_line(stdout, b"Challenge page (file or url): ");
    let page = match Page::from_arg(arg.trim(), PROGRAMMERS, None) {
        Ok(p) => p,
        Err(e) => {
            write_error!(stdout, "Error", "{}", e);
            return;
        }
    };
    write_progress!(stdout, "Parse", "Reading {}", arg.trim());
    let source = ProgrammersSource::new(page);
    let result = ctx
        .uploader
        .upload_from(&source, &mut StdinPrompt::new(stdout), &Local::now())
        .await;
    write_outcome(stdout, result);
}
