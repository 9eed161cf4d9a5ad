//! Fetch-manifest command implementation.

use clap::{Parser, ValueHint};
use serde::Serialize;
use std::path::PathBuf;

use packfmt_reconcile::{ManifestSource, ReconcileError};

use crate::cli::CommandContext;
use crate::error::CliError;

/// Fetch and validate the manifest, then save it for offline runs
#[derive(Debug, Parser)]
pub struct FetchManifestCommand {
    /// Where to save the manifest
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub out: PathBuf,
}

#[derive(Debug, Serialize)]
struct Saved<'a> {
    source: String,
    path: &'a PathBuf,
    versions: usize,
    latest_release: &'a str,
    latest_snapshot: &'a str,
}

impl FetchManifestCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let source = ctx.manifest_source()?;
        let document = source.fetch_document().await?;
        let text = document.to_pretty_json()?;

        packfmt_common_fs::write_string_atomic(&self.out, &text).map_err(|e| ReconcileError::io(&self.out, e))?;
        tracing::info!(path = %self.out.display(), versions = document.versions.len(), "manifest saved");

        let saved = Saved {
            source: source.describe(),
            path: &self.out,
            versions: document.versions.len(),
            latest_release: &document.latest.release,
            latest_snapshot: &document.latest.snapshot,
        };
        if ctx.printer.is_json() {
            return ctx.printer.json(&saved);
        }
        ctx.printer.line(format!(
            "saved {} versions (latest {}, snapshot {}) to {}",
            saved.versions,
            saved.latest_release,
            saved.latest_snapshot,
            saved.path.display()
        ));
        Ok(())
    }
}
