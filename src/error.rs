use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release packaging operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing prerequisite: {what} not found at {}", path.display())]
    MissingPrerequisite { what: String, path: PathBuf },

    #[error("Bundler failed: `{command}` {status}")]
    Bundler { command: String, status: String },

    #[error("Failed to {action} {}: {source}", path.display())]
    FileOperation {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in the release tooling
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a usage error with context
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseError::Usage(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a missing-prerequisite error for `path`
    pub fn missing(what: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ReleaseError::MissingPrerequisite {
            what: what.into(),
            path: path.into(),
        }
    }

    /// Wrap an I/O error with the action and path that produced it
    pub fn file_op(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseError::FileOperation {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_missing_prerequisite_names_path() {
        let err = ReleaseError::missing("entry file", "/work/src/ui-kit-0.js");
        let msg = err.to_string();
        assert!(msg.contains("entry file"));
        assert!(msg.contains("/work/src/ui-kit-0.js"));
    }

    #[test]
    fn test_file_operation_keeps_source() {
        let err = ReleaseError::file_op(
            "copy",
            "/work/dist/a.js",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to copy /work/dist/a.js: denied");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_bundler_error_mentions_command() {
        let err = ReleaseError::Bundler {
            command: "npx -y esbuild".to_string(),
            status: "exited with code 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Bundler failed: `npx -y esbuild` exited with code 1"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::usage("x"), "Usage error"),
            (ReleaseError::missing("src directory", "src"), "Missing prerequisite"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
