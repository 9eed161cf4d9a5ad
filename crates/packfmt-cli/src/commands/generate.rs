//! Generate command implementation.

use clap::Parser;
use std::path::PathBuf;

use packfmt_reconcile::{Pipeline, RunOptions, RunReport, WriteMode};

use crate::cli::CommandContext;
use crate::error::CliError;

/// Reconcile the record with the manifest and rewrite the artifact
#[derive(Debug, Parser)]
pub struct GenerateCommand {
    /// Only report whether the artifact would change; exit 1 if it would
    #[arg(long)]
    pub check: bool,

    /// Write the JSON run report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mode = if self.check { WriteMode::Check } else { WriteMode::Write };
        let options = RunOptions::new(&ctx.config.paths.record, &ctx.config.paths.artifact)
            .with_markers(ctx.markers())
            .with_mode(mode);

        let source = ctx.manifest_source()?;
        let report = Pipeline::new(&*source).run(&options).await?;

        self.print(ctx, &report)?;

        if let Some(path) = &self.report {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Other(anyhow::anyhow!("failed to encode run report: {e}")))?;
            std::fs::write(path, json)
                .map_err(|e| CliError::io(format!("failed to write run report {}", path.display()), e, path))?;
            tracing::debug!(path = %path.display(), "run report written");
        }

        if self.check && report.changed {
            return Err(CliError::OutOfDate {
                path: report.artifact.clone(),
            });
        }
        Ok(())
    }

    fn print(&self, ctx: &CommandContext, report: &RunReport) -> Result<(), CliError> {
        let printer = &ctx.printer;
        if printer.is_json() {
            return printer.json(report);
        }

        if !report.invalid_lines.is_empty() {
            printer.section("invalid lines", &report.invalid_lines);
        }
        if !report.unused.is_empty() {
            printer.section("unused specifiers", &report.unused);
        }
        printer.section("stats", report.stats.to_string().lines());

        let status = match (report.written, report.changed) {
            (true, true) => "updated",
            (true, false) => "unchanged",
            (false, true) => "out of date",
            (false, false) => "up to date",
        };
        printer.line(format!("{}: {status}", report.artifact.display()));
        Ok(())
    }
}
