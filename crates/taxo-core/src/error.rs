//! Error types for taxo-core
//!
//! Every crate in the workspace reports failures through this enum, so the
//! CLI can map any of them to a single descriptive line and an exit code.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for taxo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or maintaining a taxonomy.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A referenced entity does not exist.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What was looked up (e.g. "category").
        kind: &'static str,
        /// The name that was not found.
        name: String,
    },

    /// A rename target collides with an existing name.
    #[error("{kind} already exists: {name}")]
    DuplicateName {
        /// What collided (e.g. "category").
        kind: &'static str,
        /// The name that is already taken.
        name: String,
    },

    /// The backing store could not be reached.
    #[error("Connection failure: {message}")]
    ConnectionFailure {
        /// Driver or transport message.
        message: String,
    },

    /// Unrecognized command selector.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Wrong number or shape of arguments for a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A query did not complete within the configured time limit.
    #[error("Query timed out after {seconds}s")]
    Timeout {
        /// Configured limit in seconds.
        seconds: u64,
    },

    /// The backing store rejected or failed a query.
    #[error("Store error: {message}")]
    Store {
        /// Driver message.
        message: String,
    },

    /// Configuration is missing or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration.
        message: String,
    },

    /// CSV input could not be read or is missing required columns.
    #[error("CSV error: {message}")]
    Csv {
        /// Parser message or missing column.
        message: String,
    },

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific file.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a `NotFound` error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Creates a `DuplicateName` error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Error::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Creates a `ConnectionFailure` error.
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Error::ConnectionFailure {
            message: message.into(),
        }
    }

    /// Creates a `Store` error.
    pub fn store<S: Into<String>>(message: S) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// Creates a `Config` error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a `Csv` error.
    pub fn csv<S: Into<String>>(message: S) -> Self {
        Error::Csv {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns whether the error stems from how the tool was invoked
    /// rather than from the data or the store.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Error::InvalidArguments(_))
    }

    /// Process exit code for this error: 2 for malformed arguments, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage_error() { 2 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("category", "Films");
        assert_eq!(err.to_string(), "category not found: Films");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_duplicate_display() {
        let err = Error::duplicate("category", "Films");
        assert_eq!(err.to_string(), "category already exists: Films");
    }

    #[test]
    fn test_invalid_arguments_is_usage_error() {
        let err = Error::InvalidArguments("goal 1 expects 1 name".to_string());
        assert!(err.is_usage_error());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_command_is_not_usage_error() {
        let err = Error::InvalidCommand("13".to_string());
        assert!(!err.is_usage_error());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "Query timed out after 30s");
    }

    #[test]
    fn test_io_with_path_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(source, "/tmp/edges.csv");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/edges.csv"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::other("boom");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
