extern crate termcolor;

use judgehub::upload::{self, Outcome};
use std::io::Write;
use termcolor::{Color, StandardStream};

pub fn write_outcome(stdout: &mut StandardStream, result: upload::Result<Option<Outcome>>) {
    match result {
        Ok(Some(Outcome::Uploaded {
            branch,
            pull_request,
        })) => write_ok!(
            stdout,
            "Success",
            "Pushed {} and opened #{}: {}",
            branch,
            pull_request.number,
            pull_request.html_url
        ),
        Ok(Some(Outcome::AlreadyUploaded { path })) => {
            write_warn!(stdout, "Skip", "{} is already uploaded", path)
        }
        Ok(None) => write_warn!(stdout, "Skip", "No accepted submission found"),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}
