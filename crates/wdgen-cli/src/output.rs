//! Status lines and progress reporting

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Status reporter writing to stderr, so stdout carries only generated text.
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` test cases
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Advance by one test case
    pub fn advance(&self, title: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(title.to_string());
            pb.inc(1);
        }
    }

    /// Finish progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// A file was written
    pub fn wrote(&self, path: &Path) {
        self.success(&format!("wrote {}", path.display()));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Failures print even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };

        self.line(&format!("{prefix} {message}"));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.line(&styled);
    }

    fn line(&self, text: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.println(text),
            None => {
                let _ = self.term.write_line(text);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_skips_progress() {
        let mut reporter = ProgressReporter::new(false, true);
        reporter.start_progress(3, "formatting");
        assert!(reporter.progress_bar.is_none());
        reporter.advance("a");
        reporter.finish();
    }

    #[test]
    fn test_progress_lifecycle() {
        let mut reporter = ProgressReporter::new(false, false);
        reporter.start_progress(2, "formatting");
        reporter.advance("Login");
        reporter.advance("Checkout");
        assert_eq!(reporter.progress_bar.as_ref().map(ProgressBar::position), Some(2));
        reporter.finish();
        assert!(reporter.progress_bar.is_none());
    }

    #[test]
    fn test_messages_do_not_panic() {
        let reporter = ProgressReporter::default();
        reporter.header("Suite");
        reporter.success("done");
        reporter.failure("broken");
        reporter.wrote(Path::new("login.t"));
    }
}
