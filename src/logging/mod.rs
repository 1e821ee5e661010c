//! Logging and output control
//!
//! This module provides the [`Logger`] for user-visible console output with
//! quiet and verbose switches, and [`init_tracing`] which installs the
//! `tracing` subscriber used for diagnostics on stderr.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Column at which [`wrap_words`] breaks lines
pub const WRAP_WIDTH: usize = 80;

/// Logger responsible for all user-visible output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    /// Main section heading
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n=== {} ===", title);
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("📝 {}", message);
        }
    }

    /// Information message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("ℹ️  {}", message);
        }
    }

    /// Success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("✅ {}", message);
        }
    }

    /// Warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("⚠️  WARNING: {}", message);
        }
    }

    /// Error message, printed even when quiet
    pub fn error(&self, message: &str) {
        eprintln!("❌ ERROR: {}", message);
    }

    /// Step information
    pub fn step(&self, message: &str) {
        if !self.quiet {
            println!("▶️  {}", message);
        }
    }

    /// Plain line with no decoration
    pub fn plain(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Detailed information (only shown in verbose mode)
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("   {}", message);
        }
    }

    /// Print words as an indented, wrapped block
    pub fn words(&self, words: &[String]) {
        if !self.quiet {
            println!("{}", wrap_words(words, WRAP_WIDTH));
        }
    }

    /// Key-value pair summary display
    pub fn summary_kv(&self, title: &str, items: &[(&str, String)]) {
        if !self.quiet {
            println!("\n--- {} ---", title);
            for (key, value) in items {
                println!("  {}: {}", key, value);
            }
        }
    }
}

/// Join words with single spaces into lines no longer than `width`, each
/// indented by two spaces. Words are never split, so a word longer than the
/// line gets a line of its own.
pub fn wrap_words(words: &[String], width: usize) -> String {
    const INDENT: &str = "  ";

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::from(INDENT);

    for word in words {
        let fits = current.len() + 1 + word.len() <= width;
        if current.len() > INDENT.len() && !fits {
            lines.push(std::mem::replace(&mut current, String::from(INDENT)));
        }
        if current.len() > INDENT.len() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if current.len() > INDENT.len() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Install the diagnostics subscriber. `RUST_LOG` wins when set; otherwise
/// this crate logs at `debug` under `verbose` and everything else at `warn`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,docker_registry_api=debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be set when embedded; keep the existing one
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wrap_words_single_line() {
        assert_eq!(wrap_words(&words(&["app", "db", "web"]), 80), "  app db web");
    }

    #[test]
    fn test_wrap_words_breaks_at_width() {
        let wrapped = wrap_words(&words(&["alpha", "beta", "gamma"]), 12);
        assert_eq!(wrapped, "  alpha beta\n  gamma");
        assert!(wrapped.lines().all(|line| line.len() <= 12));
    }

    #[test]
    fn test_wrap_words_keeps_long_words_whole() {
        let wrapped = wrap_words(&words(&["a", "very-long-hyphenated-name", "b"]), 10);
        assert_eq!(wrapped, "  a\n  very-long-hyphenated-name\n  b");
    }

    #[test]
    fn test_wrap_words_empty() {
        assert_eq!(wrap_words(&[], 80), "");
    }
}
