extern crate termcolor;

use crate::Context;
use std::io::Write;
use termcolor::{Color, StandardStream};

pub async fn sync(stdout: &mut StandardStream, ctx: &Context) {
    write_progress!(stdout, "Sync", "Reading tree of {}", ctx.settings.hook);
    match ctx.uploader.sync().await {
        Ok(count) => write_ok!(stdout, "Success", "Recorded {} files", count),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}
