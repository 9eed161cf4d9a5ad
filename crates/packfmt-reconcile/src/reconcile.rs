//! Merge of the record with the manifest.
//!
//! Every manifest entry gets exactly one format. Entries the record names
//! take the recorded specifier. Entries newer than anything the record
//! names inherit `Maybe(n)` from the newest recorded pack format, and all
//! remaining gaps are `Unknown`.

use serde::Serialize;
use std::collections::HashSet;

use crate::diagnostics::UnusedSpecifier;
use crate::format::FormatAssignment;
use crate::manifest::{Manifest, ReleaseClass};
use crate::specifier::SpecifierMap;

/// One row of the generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledEntry {
    pub id: String,
    pub release_class: ReleaseClass,
    pub format: FormatAssignment,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// In manifest order, newest first.
    pub entries: Vec<ReconciledEntry>,
    /// Record entries with no manifest counterpart, in record order.
    pub unused: Vec<UnusedSpecifier>,
}

impl Reconciliation {
    /// Ids whose format ended up `Unknown`.
    pub fn unknown_ids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.format == FormatAssignment::Unknown)
            .map(|e| e.id.as_str())
    }
}

/// Format for unrecorded entries newer than every recorded one.
fn inferred_default(specifiers: &SpecifierMap, manifest: &Manifest) -> FormatAssignment {
    manifest
        .entries()
        .iter()
        .find_map(|entry| specifiers.get(&entry.id).and_then(|s| s.value()))
        .map_or(FormatAssignment::Unknown, FormatAssignment::Maybe)
}

pub fn reconcile(specifiers: SpecifierMap, manifest: &Manifest) -> Reconciliation {
    let mut default: Option<FormatAssignment> = None;
    let mut in_head = true;
    let mut matched: HashSet<&str> = HashSet::new();

    let entries = manifest
        .entries()
        .iter()
        .map(|entry| {
            let format = match specifiers.get(&entry.id) {
                Some(spec) => {
                    in_head = false;
                    matched.insert(entry.id.as_str());
                    spec.specifier
                }
                None if in_head => *default.get_or_insert_with(|| inferred_default(&specifiers, manifest)),
                None => FormatAssignment::Unknown,
            };
            ReconciledEntry {
                id: entry.id.clone(),
                release_class: entry.release_class,
                format,
            }
        })
        .collect();

    let mut unused: Vec<UnusedSpecifier> = specifiers
        .into_inner()
        .into_values()
        .filter(|spec| !matched.contains(spec.version_id.as_str()))
        .map(|spec| UnusedSpecifier {
            version_id: spec.version_id,
            source_line: spec.source_line,
            specifier: spec.specifier,
        })
        .collect();
    unused.sort_by_key(|u| u.source_line);

    for u in &unused {
        tracing::warn!(version = %u.version_id, line = u.source_line, "unused specifier");
    }

    Reconciliation { entries, unused }
}
