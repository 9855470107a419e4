//! Terminal implementations of the console's front-end hooks.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use qbank_console::Confirm;
use qbank_gateway::{Navigator, Notice, NoticeLevel, Notifier};

/// Prints notices to stderr so stdout stays clean for rendered output.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{} {}", marker(notice.level), notice.message);
    }
}

fn marker(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "[ok]",
        NoticeLevel::Warning => "[warn]",
        NoticeLevel::Error => "[error]",
        NoticeLevel::Info => "[info]",
    }
}

/// There is no login screen to move to; tell the user how to get one.
#[derive(Debug, Default)]
pub struct LoginHint;

impl Navigator for LoginHint {
    fn to_login(&self) {
        eprintln!("Run `qbank login --email <email>` to sign in again.");
    }
}

/// `y/N` prompt on stdin; `--yes` answers every prompt up front.
#[derive(Debug, Clone, Copy)]
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    #[must_use]
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = format!("{message} [y/N] ");
        tokio::task::spawn_blocking(move || prompt_line(&prompt).is_ok_and(|line| is_yes(&line)))
            .await
            .unwrap_or(false)
    }
}

/// Print `prompt` to stderr and read one line from stdin.
///
/// # Errors
/// Stdin or stderr is closed.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
