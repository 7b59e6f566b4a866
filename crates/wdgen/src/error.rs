//! Error types for `wdgen`.
//!
//! Every error is synchronous and aborts formatting of the current test case.
//! The caller decides how to surface it; nothing here retries or recovers.

use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur while generating test scripts.
#[derive(Debug, Error)]
pub enum GenError {
    /// Locator strategy outside the supported set.
    #[error("Error: unknown strategy [{strategy}] for locator [{locator}]")]
    UnknownLocatorStrategy {
        /// The strategy tag that was not recognised
        strategy: String,
        /// The locator it was paired with
        locator: String,
    },

    /// Command verb with no emitter mapping.
    #[error("Unsupported command '{verb}'")]
    UnsupportedCommand {
        /// The verb as recorded
        verb: String,
    },

    /// Known verb with unusable operands.
    #[error("Invalid '{verb}' command: {reason}")]
    InvalidCommand {
        /// The verb as recorded
        verb: String,
        /// What was wrong with the operands
        reason: String,
    },

    /// Header or footer references a placeholder that is not an option.
    #[error("Unknown placeholder '${{{placeholder}}}' in option '{option}'")]
    UnknownPlaceholder {
        /// Placeholder name without the `${}` wrapper
        placeholder: String,
        /// Option whose text contains it
        option: String,
    },

    /// Option value that cannot be used.
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption {
        /// Option name
        option: String,
        /// Why it's invalid
        reason: String,
    },

    /// Manifest verification failed (file was manually modified)
    #[error("Manifest verification failed for '{path}': {reason}")]
    ManifestError {
        /// Path to the file
        path: String,
        /// Why verification failed
        reason: String,
    },

    /// Hash mismatch (generated file was modified)
    #[error("Hash mismatch for '{path}': expected {expected}, got {actual}")]
    HashMismatch {
        /// Path to the file
        path: String,
        /// Expected hash
        expected: String,
        /// Actual hash
        actual: String,
    },

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl GenError {
    /// Create an unknown-strategy error.
    #[must_use]
    pub fn unknown_strategy(strategy: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::UnknownLocatorStrategy {
            strategy: strategy.into(),
            locator: locator.into(),
        }
    }

    /// Create an invalid-command error.
    #[must_use]
    pub fn invalid_command(verb: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            verb: verb.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_strategy_names_both_parts() {
        let err = GenError::unknown_strategy("dom", "document.forms[0]");
        let msg = err.to_string();
        assert!(msg.contains("[dom]"));
        assert!(msg.contains("[document.forms[0]]"));
    }

    #[test]
    fn error_display_unsupported_command() {
        let err = GenError::UnsupportedCommand {
            verb: "dragAndDrop".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported command 'dragAndDrop'");
    }

    #[test]
    fn error_display_unknown_placeholder() {
        let err = GenError::UnknownPlaceholder {
            placeholder: "baseUrl".to_string(),
            option: "header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown placeholder '${baseUrl}' in option 'header'"
        );
    }

    #[test]
    fn error_display_hash_mismatch() {
        let err = GenError::HashMismatch {
            path: "login.t".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("Hash mismatch"));
        assert!(err.to_string().contains("login.t"));
    }
}
