//! Error types for packfmt.

use std::fmt;
use thiserror::Error;

/// Stable error codes for file system and validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    pub const FILE_NOT_FOUND: ErrorCode = ErrorCode("FS001");
    pub const FILE_READ_ERROR: ErrorCode = ErrorCode("FS002");
    pub const FILE_WRITE_ERROR: ErrorCode = ErrorCode("FS003");
    pub const VALIDATION_FAILED: ErrorCode = ErrorCode("VAL001");

    /// The code as it appears in diagnostics.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The main error type for the common layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system failure with the path involved.
    #[error("[{code}] {message}")]
    FileSystem {
        code: ErrorCode,
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new generic error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Error code, if this error carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::FileSystem { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error means the file does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileSystem { code, .. } => *code == ErrorCode::FILE_NOT_FOUND,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias using packfmt's Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_display_includes_code() {
        let err = Error::FileSystem {
            code: ErrorCode::FILE_NOT_FOUND,
            message: "file not found: a.rs".to_string(),
            path: Some("a.rs".to_string()),
            source: None,
        };
        assert_eq!(err.to_string(), "[FS001] file not found: a.rs");
        assert_eq!(err.code(), Some(ErrorCode::FILE_NOT_FOUND));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_not_found() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());
        assert!(err.code().is_none());
        assert!(!Error::config("bad").is_not_found());
    }
}
