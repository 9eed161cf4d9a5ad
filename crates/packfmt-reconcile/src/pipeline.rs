//! End-to-end run: record and manifest in, artifact and report out.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Instrument;

use packfmt_common_log::spans::{self, Timer};

use crate::change::{self, ChangeOutcome};
use crate::codegen::{self, Markers};
use crate::diagnostics::{InvalidLine, UnusedSpecifier};
use crate::error::{ReconcileError, Result};
use crate::fetch::ManifestSource;
use crate::manifest::Manifest;
use crate::reconcile::{self, ReconciledEntry, Reconciliation};
use crate::specifier::{ParsedRecord, SpecifierParser};
use crate::stats::Stats;

/// Whether a run writes the artifact or only reports what would change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Write,
    Check,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub record_path: PathBuf,
    pub artifact_path: PathBuf,
    pub markers: Markers,
    pub mode: WriteMode,
}

impl RunOptions {
    pub fn new(record_path: impl Into<PathBuf>, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            record_path: record_path.into(),
            artifact_path: artifact_path.into(),
            markers: Markers::default(),
            mode: WriteMode::Write,
        }
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Reconciliation without an artifact.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub invalid_lines: Vec<InvalidLine>,
    pub reconciliation: Reconciliation,
    pub stats: Stats,
}

/// Everything a run found and did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub artifact: PathBuf,
    pub mode: WriteMode,
    pub changed: bool,
    pub written: bool,
    pub digest_before: Option<String>,
    pub digest_after: Option<String>,
    pub invalid_lines: Vec<InvalidLine>,
    pub unused: Vec<UnusedSpecifier>,
    pub entries: Vec<ReconciledEntry>,
    pub stats: Stats,
}

impl RunReport {
    pub fn unknown_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.format == crate::format::FormatAssignment::Unknown)
            .map(|e| e.id.as_str())
            .collect()
    }
}

pub struct Pipeline<'a> {
    source: &'a dyn ManifestSource,
    parser: SpecifierParser,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn ManifestSource) -> Self {
        Self {
            source,
            parser: SpecifierParser::new(),
        }
    }

    async fn read_record(&self, path: &Path) -> Result<ParsedRecord> {
        let text = tokio::fs::read_to_string(path)
            .instrument(spans::file_span("read", &path.display().to_string()))
            .await
            .map_err(|e| ReconcileError::io(path, e))?;
        Ok(self.parser.parse(&text))
    }

    async fn fetch_manifest(&self) -> Result<Manifest> {
        let origin = self.source.describe();
        let timer = Timer::start("manifest fetch");
        let manifest = self.source.fetch().instrument(spans::fetch_span(&origin)).await?;
        timer.finish();
        tracing::info!(source = %origin, versions = manifest.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Parse the record and fetch the manifest concurrently, then merge.
    pub async fn reconcile(&self, record_path: &Path) -> Result<Outcome> {
        let (record, manifest) = tokio::try_join!(self.read_record(record_path), self.fetch_manifest())?;

        let invalid_lines = record.invalid.clone();
        let specifiers = record.into_specifiers()?;
        let stats = Stats::collect(&manifest, &specifiers);
        let reconciliation = reconcile::reconcile(specifiers, &manifest);

        Ok(Outcome {
            invalid_lines,
            reconciliation,
            stats,
        })
    }

    /// Full run: reconcile, regenerate the artifact and write or compare it.
    pub async fn run(&self, options: &RunOptions) -> Result<RunReport> {
        let artifact = &options.artifact_path;
        let span = spans::run_span(&artifact.display().to_string());

        async move {
            let outcome = self.reconcile(&options.record_path).await?;

            let previous =
                packfmt_common_fs::read_to_string(artifact).map_err(|e| ReconcileError::io(artifact, e))?;
            let next = packfmt_common_log::timed!(
                "generate",
                codegen::generate(&outcome.reconciliation.entries, &previous, &options.markers)
            )?;

            let (signal, written): (ChangeOutcome, bool) = match options.mode {
                WriteMode::Write => (change::write_tracked(artifact, &next)?, true),
                WriteMode::Check => (change::predict(Some(&previous), &next), false),
            };
            tracing::info!(
                changed = signal.changed,
                written,
                entries = outcome.reconciliation.entries.len(),
                "artifact generated"
            );
            outcome.stats.log();

            Ok(RunReport {
                artifact: artifact.clone(),
                mode: options.mode,
                changed: signal.changed,
                written,
                digest_before: signal.before,
                digest_after: signal.after,
                invalid_lines: outcome.invalid_lines,
                unused: outcome.reconciliation.unused,
                entries: outcome.reconciliation.entries,
                stats: outcome.stats,
            })
        }
        .instrument(span)
        .await
    }
}
