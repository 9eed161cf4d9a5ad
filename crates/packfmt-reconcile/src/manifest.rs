//! Upstream version manifest.
//!
//! The payload is decoded strictly: unknown fields, unknown release types,
//! malformed URLs and malformed timestamps are all schema errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{ReconcileError, Result};

/// Release channel of a manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseClass {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl ReleaseClass {
    pub const ALL: [ReleaseClass; 4] = [
        ReleaseClass::Release,
        ReleaseClass::Snapshot,
        ReleaseClass::OldBeta,
        ReleaseClass::OldAlpha,
    ];

    /// Variant name used in the generated table.
    pub fn variant(&self) -> &'static str {
        match self {
            ReleaseClass::Release => "Release",
            ReleaseClass::Snapshot => "Snapshot",
            ReleaseClass::OldBeta => "OldBeta",
            ReleaseClass::OldAlpha => "OldAlpha",
        }
    }
}

impl fmt::Display for ReleaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant())
    }
}

/// Wire shape of the manifest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestDocument {
    pub latest: Latest,
    pub versions: Vec<ManifestVersion>,
}

impl ManifestDocument {
    /// Strictly decode a payload; `origin` names it in errors.
    pub fn from_json(bytes: &[u8], origin: &str) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ReconcileError::schema(origin, e.to_string()))
    }

    /// Tab-indented JSON with a trailing newline, as saved manifests are stored.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| ReconcileError::schema("manifest", e.to_string()))?;

        let mut text = String::from_utf8_lossy(&buf).into_owned();
        text.push('\n');
        Ok(text)
    }
}

/// Newest release and snapshot ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

/// One entry of `versions`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ManifestVersion {
    pub id: String,
    #[serde(rename = "type")]
    pub release_class: ReleaseClass,
    pub url: Url,
    pub time: DateTime<Utc>,
    pub release_time: DateTime<Utc>,
}

/// A manifest entry as the reconciler sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub id: String,
    pub release_class: ReleaseClass,
    pub release_time: DateTime<Utc>,
}

impl From<ManifestVersion> for ManifestEntry {
    fn from(v: ManifestVersion) -> Self {
        Self {
            id: v.id,
            release_class: v.release_class,
            release_time: v.release_time,
        }
    }
}

/// Validated manifest, entries newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub latest: Latest,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build from already-decoded parts, sorting by release time.
    pub fn new(latest: Latest, entries: Vec<ManifestEntry>) -> Self {
        let mut entries = entries;
        // stable: ties keep manifest order
        entries.sort_by(|a, b| b.release_time.cmp(&a.release_time));

        let manifest = Self { latest, entries };
        manifest.check_latest();
        manifest
    }

    pub fn from_document(document: ManifestDocument) -> Self {
        let entries = document.versions.into_iter().map(ManifestEntry::from).collect();
        Self::new(document.latest, entries)
    }

    /// Decode and validate a manifest payload.
    pub fn from_json(bytes: &[u8], origin: &str) -> Result<Self> {
        ManifestDocument::from_json(bytes, origin).map(Self::from_document)
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    fn check_latest(&self) {
        for (channel, id) in [("release", &self.latest.release), ("snapshot", &self.latest.snapshot)] {
            if !self.contains(id) {
                tracing::warn!(channel, id = %id, "latest id is not listed in manifest versions");
            }
        }
    }
}
