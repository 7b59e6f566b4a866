//! Error types for the CLI

use std::path::Path;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation failed for one input
    #[error("{path}: {source}")]
    Input {
        /// Input file being formatted
        path: String,
        /// Underlying failure
        #[source]
        source: wdgen::GenError,
    },

    /// Generator error not tied to one input
    #[error(transparent)]
    Gen(#[from] wdgen::GenError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Options could not be serialized
    #[error("Serialization error: {message}")]
    Serialize {
        /// Error message
        message: String,
    },

    /// One or more embedded test cases could not be formatted
    #[error("{failed} of {total} test cases could not be formatted")]
    FormatFailed {
        /// Cases that failed
        failed: usize,
        /// Cases attempted
        total: usize,
    },

    /// One or more generated files failed verification
    #[error("{failed} of {total} generated files failed verification")]
    VerificationFailed {
        /// Files that failed
        failed: usize,
        /// Files checked
        total: usize,
    },
}

impl CliError {
    /// Attach the input path to a generator error
    #[must_use]
    pub fn input(path: &Path, source: wdgen::GenError) -> Self {
        Self::Input {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::Serialize {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_names_file() {
        let err = CliError::input(
            Path::new("login.yaml"),
            wdgen::GenError::UnsupportedCommand {
                verb: "dragAndDrop".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "login.yaml: Unsupported command 'dragAndDrop'"
        );
    }

    #[test]
    fn test_gen_error_is_transparent() {
        let err: CliError = wdgen::GenError::UnsupportedCommand {
            verb: "x".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unsupported command 'x'");
    }

    #[test]
    fn test_verification_failed() {
        let err = CliError::VerificationFailed { failed: 1, total: 3 };
        assert!(err.to_string().contains("1 of 3"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
