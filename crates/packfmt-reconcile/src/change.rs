//! Artifact change detection.

use serde::Serialize;
use sha2::{Digest, Sha512};
use std::path::Path;

use crate::error::{ReconcileError, Result};

/// Hex SHA-512 of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Digest of the file at `path`, `None` if it does not exist.
pub fn digest_file(path: &Path) -> Result<Option<String>> {
    let bytes = packfmt_common_fs::read_optional(path).map_err(|e| ReconcileError::io(path, e))?;
    Ok(bytes.as_deref().map(digest))
}

/// Before and after digests around a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeOutcome {
    pub before: Option<String>,
    pub after: Option<String>,
    pub changed: bool,
}

impl ChangeOutcome {
    fn new(before: Option<String>, after: Option<String>) -> Self {
        let changed = before != after;
        Self { before, after, changed }
    }
}

/// Digest captured before a write, compared after it.
#[derive(Debug)]
pub struct ChangeSignal<'a> {
    path: &'a Path,
    before: Option<String>,
}

impl<'a> ChangeSignal<'a> {
    pub fn capture(path: &'a Path) -> Result<Self> {
        let before = digest_file(path)?;
        Ok(Self { path, before })
    }

    pub fn finish(self) -> Result<ChangeOutcome> {
        let after = digest_file(self.path)?;
        Ok(ChangeOutcome::new(self.before, after))
    }
}

/// Atomically write `contents` to `path` and report whether the bytes changed.
pub fn write_tracked(path: &Path, contents: &str) -> Result<ChangeOutcome> {
    let signal = ChangeSignal::capture(path)?;
    packfmt_common_fs::write_string_atomic(path, contents).map_err(|e| ReconcileError::io(path, e))?;
    let outcome = signal.finish()?;
    tracing::debug!(path = %path.display(), changed = outcome.changed, "artifact written");
    Ok(outcome)
}

/// What [`write_tracked`] would report, without writing.
pub fn predict(current: Option<&str>, next: &str) -> ChangeOutcome {
    ChangeOutcome::new(current.map(|c| digest(c.as_bytes())), Some(digest(next.as_bytes())))
}
