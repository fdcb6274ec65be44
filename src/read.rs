extern crate termcolor;

use judgehub::prompt::Prompt;
use std::io::{stdin, Write};
use termcolor::{Color, StandardStream, WriteColor};

/// `None` on end of input.
pub fn try_read_line(stdout: &mut StandardStream, prompt: &[u8]) -> Option<String> {
    let mut dest = String::new();
    loop {
        let _ = stdout.write(prompt);
        let _ = stdout.flush();
        match stdin().read_line(&mut dest) {
            Ok(0) => return None,
            Ok(_) => {
                dest.truncate(dest.trim_end().len());
                return Some(dest);
            }
            Err(e) => write_error!(stdout, "Error", "Read: {}", e),
        }
        let _ = stdout.reset();
    }
}
pub fn read_line(stdout: &mut StandardStream, prompt: &[u8]) -> String {
    try_read_line(stdout, prompt).unwrap_or_default()
}
/// Empty input reads as `None`.
pub fn read_optional(stdout: &mut StandardStream, prompt: &[u8]) -> Option<String> {
    Some(read_line(stdout, prompt).trim().to_string()).filter(|s| !s.is_empty())
}

/// Pull request sections typed on the terminal. End of input cancels.
pub struct StdinPrompt<'a> {
    stdout: &'a mut StandardStream,
}
impl<'a> StdinPrompt<'a> {
    pub fn new(stdout: &'a mut StandardStream) -> Self {
        StdinPrompt { stdout }
    }
}
impl Prompt for StdinPrompt<'_> {
    fn ask(&mut self, question: &str) -> Option<String> {
        write_info!(self.stdout, "Prompt", "{} (- for none)", question);
        let answer = try_read_line(self.stdout, b"> ");
        let _ = self.stdout.reset();
        answer
    }
}
