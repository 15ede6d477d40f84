//! Operator confirmation for destructive commands.

use std::fmt;
use std::io::{self, BufRead, Write};

/// Asks the operator before an irreversible request is sent.
pub trait Confirm: fmt::Debug + Send + Sync {
    /// Shows `question` and returns true only on an explicit yes.
    fn confirm(&self, question: &str) -> bool;
}

/// Prompts on stderr and reads one line from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if write!(stderr, "{question}\n(type 'yes' to accept): ")
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return false;
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => is_yes(&line),
            Err(e) => {
                tracing::debug!("Failed to read confirmation: {e}");
                false
            }
        }
    }
}

/// True for `yes` in any case, ignoring surrounding whitespace.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
