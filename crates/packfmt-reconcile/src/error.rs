//! Fatal reconciliation errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostics::DuplicateSpecifier;

/// Errors that stop a run before the artifact is written.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The record names a version more than once.
    #[error("record has {} duplicate specifier(s): {}", .duplicates.len(), list(.duplicates))]
    DuplicateSpecifier { duplicates: Vec<DuplicateSpecifier> },

    /// The manifest could not be retrieved.
    #[error("manifest unavailable from {origin}: {message}")]
    ManifestUnavailable {
        origin: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The manifest payload does not have the expected shape.
    #[error("manifest from {origin} does not match the expected schema: {message}")]
    ManifestSchema { origin: String, message: String },

    /// The previous artifact is missing its structural markers.
    #[error("malformed artifact: {reason}")]
    MalformedArtifact { reason: String },

    /// Reading or writing the record or artifact failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: packfmt_common_core::Error,
    },
}

fn list(duplicates: &[DuplicateSpecifier]) -> String {
    duplicates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ReconcileError {
    pub fn unavailable(
        origin: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ManifestUnavailable {
            origin: origin.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn schema(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestSchema {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedArtifact {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: impl Into<packfmt_common_core::Error>) -> Self {
        Self::Io {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Short stable name of the error class, used in logs and reports.
    pub fn class(&self) -> &'static str {
        match self {
            Self::DuplicateSpecifier { .. } => "duplicate_specifier",
            Self::ManifestUnavailable { .. } => "manifest_unavailable",
            Self::ManifestSchema { .. } => "manifest_schema",
            Self::MalformedArtifact { .. } => "malformed_artifact",
            Self::Io { .. } => "io",
        }
    }
}

/// Result type alias for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
