//! Generated table emission.
//!
//! The artifact keeps everything up to and including the begin marker line
//! and everything from the end marker line on; only the lines between the
//! markers are regenerated.

use crate::error::{ReconcileError, Result};
use crate::reconcile::ReconciledEntry;

pub const DEFAULT_BEGIN_MARKER: &str = "// @generated begin pack formats";
pub const DEFAULT_END_MARKER: &str = "// @generated end pack formats";

/// Lines delimiting the generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub begin: String,
    pub end: String,
}

impl Markers {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER)
    }
}

/// One table row, without the trailing newline.
pub fn render_entry(entry: &ReconciledEntry) -> String {
    // Debug on str yields an escaped Rust string literal
    format!(
        "\tPackVersion {{ name: {:?}, release_type: ReleaseType::{}, format: PackFormat::{} }},",
        entry.id, entry.release_class, entry.format
    )
}

/// All rows, newline terminated.
pub fn render_body(entries: &[ReconciledEntry]) -> String {
    let mut body = String::new();
    for entry in entries {
        body.push_str(&render_entry(entry));
        body.push('\n');
    }
    body
}

/// Splice a freshly rendered body into the previous artifact.
pub fn generate(entries: &[ReconciledEntry], previous: &str, markers: &Markers) -> Result<String> {
    let is = |line: &str, marker: &str| line.trim() == marker.trim();
    if markers.begin.trim() == markers.end.trim() {
        return Err(ReconcileError::malformed(format!(
            "begin and end markers are both `{}`",
            markers.begin.trim()
        )));
    }

    let lines: Vec<&str> = previous.split_inclusive('\n').collect();
    let begin = lines
        .iter()
        .position(|l| is(l, &markers.begin))
        .ok_or_else(|| ReconcileError::malformed(format!("begin marker `{}` not found", markers.begin)))?;
    let end = match lines[begin + 1..].iter().position(|l| is(l, &markers.end)) {
        Some(offset) => begin + 1 + offset,
        None if lines.iter().any(|l| is(l, &markers.end)) => {
            return Err(ReconcileError::malformed(format!(
                "end marker `{}` comes before begin marker on line {}",
                markers.end,
                begin + 1
            )));
        }
        None => {
            return Err(ReconcileError::malformed(format!("end marker `{}` not found", markers.end)));
        }
    };

    let mut out = String::with_capacity(previous.len());
    for line in &lines[..=begin] {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&render_body(entries));
    for line in &lines[end..] {
        out.push_str(line);
    }
    Ok(out)
}
