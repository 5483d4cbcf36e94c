//! Typed error handling for symtally.
//!
//! Provides structured errors that library consumers can match on,
//! with full context about what went wrong and where. Every failure
//! aborts the run: aggregation is a deterministic fold over a finite
//! event sequence, so there is nothing to retry or resume.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for symtally operations.
#[derive(Error, Debug)]
pub enum SymtallyError {
    /// I/O error when reading event streams or configuration
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed event-stream content produced by a front end
    #[error("Decode error in {path}: {message}")]
    Decode {
        path: PathBuf,
        message: String,
        /// Line number (1-indexed) if available
        line: Option<usize>,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SymtallyError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
            line: None,
        }
    }

    /// Create a decode error with a line number.
    pub fn decode_at(path: impl Into<PathBuf>, message: impl Into<String>, line: usize) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Decode { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for symtally results.
pub type SymtallyResult<T> = Result<T, SymtallyError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> SymtallyResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> SymtallyResult<T> {
        self.map_err(|e| SymtallyError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error() {
        let err = SymtallyError::io(
            PathBuf::from("/test/events.jsonl"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(matches!(err, SymtallyError::Io { .. }));
        assert_eq!(err.path(), Some(&PathBuf::from("/test/events.jsonl")));
        assert!(err.to_string().contains("/test/events.jsonl"));
    }

    #[test]
    fn test_decode_error_with_line() {
        let err = SymtallyError::decode_at("/in/events.jsonl", "unexpected token", 12);
        if let SymtallyError::Decode { line, .. } = &err {
            assert_eq!(*line, Some(12));
        } else {
            panic!("Expected Decode error");
        }
    }

    #[test]
    fn test_invalid_argument_has_no_path() {
        let err = SymtallyError::invalid_argument("bad pattern");
        assert!(err.path().is_none());
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let symtally_result = result.with_path("/missing/events.jsonl");
        assert!(symtally_result.is_err());
    }
}
