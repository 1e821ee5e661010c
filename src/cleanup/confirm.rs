//! Sources of yes/no answers for destructive steps

use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};

/// Answers a yes/no question. Only an affirmative answer lets a deletion
/// proceed.
#[async_trait]
pub trait Confirm: Send {
    async fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// `y` or `yes`, any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Prompts on stdout and reads one line from stdin per question.
/// End of input counts as "no".
pub struct ConsoleConfirm {
    stdin: BufReader<Stdin>,
}

impl ConsoleConfirm {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for ConsoleConfirm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Confirm for ConsoleConfirm {
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut answer = String::new();
        let read = self.stdin.read_line(&mut answer).await?;
        if read == 0 {
            stdout.write_all(b"\n").await?;
            return Ok(false);
        }

        Ok(is_affirmative(&answer))
    }
}

/// Replays a fixed list of answers and records every prompt it was shown.
/// Once the answers run out every further question is declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Answer "y" to everything
    pub fn always_yes(count: usize) -> Self {
        Self::new(std::iter::repeat_n("y", count))
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        let answer = self.answers.pop_front().unwrap_or_default();
        Ok(is_affirmative(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        for yes in ["y", "Y", "yes", "YES", "Yes", " y\n", "yEs\r\n"] {
            assert!(is_affirmative(yes), "{:?} should confirm", yes);
        }
        for no in ["", "n", "no", "yep", "ye", "yess", "ok", "1", "y y"] {
            assert!(!is_affirmative(no), "{:?} should not confirm", no);
        }
    }

    #[tokio::test]
    async fn test_scripted_confirm_replays_then_declines() {
        let mut confirm = ScriptedConfirm::new(["yes", "n"]);

        assert!(confirm.confirm("first? ").await.unwrap());
        assert!(!confirm.confirm("second? ").await.unwrap());
        assert!(!confirm.confirm("third? ").await.unwrap());
        assert_eq!(confirm.prompts(), ["first? ", "second? ", "third? "]);
    }
}
