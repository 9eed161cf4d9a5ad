//! CLI error handling.

use std::path::PathBuf;

use thiserror::Error;

use packfmt_common_config::ConfigError;
use packfmt_reconcile::ReconcileError;

use crate::Exit;

/// CLI error type with context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Validation { message: String, hint: Option<String> },

    /// `generate --check` found a stale artifact.
    #[error("{} is out of date", .path.display())]
    OutOfDate { path: PathBuf },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Network { .. } => Exit::NetworkError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::OutOfDate { .. } | Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::Validation { hint, .. } => hint.as_deref(),
            Self::OutOfDate { .. } => Some("run `packfmt generate` and commit the result"),
            _ => None,
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
            path: Some(path.into()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("Check .packfmt/config.yaml".to_string()),
        }
    }
}

impl From<packfmt_common_http::FetchError> for CliError {
    fn from(err: packfmt_common_http::FetchError) -> Self {
        Self::Network {
            message: format!("HTTP client error: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<ReconcileError> for CliError {
    fn from(err: ReconcileError) -> Self {
        let message = err.to_string();
        let path = match &err {
            ReconcileError::Io { path, .. } => Some(path.clone()),
            _ => None,
        };
        match err {
            ReconcileError::ManifestUnavailable { .. } => Self::Network {
                message,
                source: Some(Box::new(err)),
            },
            ReconcileError::Io { .. } => Self::Io {
                message,
                path,
                source: Some(Box::new(err)),
            },
            ReconcileError::DuplicateSpecifier { .. } => Self::Validation {
                message,
                hint: Some("each version may appear only once in the record".to_string()),
            },
            ReconcileError::ManifestSchema { .. } => Self::Validation {
                message,
                hint: Some("the upstream manifest format may have changed".to_string()),
            },
            ReconcileError::MalformedArtifact { .. } => Self::Validation {
                message,
                hint: Some("restore the begin and end marker lines in the artifact".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_errors_map_to_exit_codes() {
        let schema: CliError = ReconcileError::schema("x", "bad").into();
        assert!(matches!(schema.exit_code(), Exit::ValidationError));

        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let network: CliError = ReconcileError::unavailable("x", io).into();
        assert!(matches!(network.exit_code(), Exit::NetworkError));

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let io: CliError = ReconcileError::io("record", missing).into();
        assert!(matches!(io.exit_code(), Exit::IoError));
    }

    #[test]
    fn test_out_of_date_has_hint() {
        let err = CliError::OutOfDate {
            path: PathBuf::from("pack_formats.rs"),
        };
        assert_eq!(err.to_string(), "pack_formats.rs is out of date");
        assert!(err.hint().is_some());
        assert!(matches!(err.exit_code(), Exit::GeneralError));
    }
}
