//! Unknown command implementation.

use clap::Parser;

use packfmt_reconcile::Pipeline;

use crate::cli::CommandContext;
use crate::error::CliError;

/// List manifest versions that end up with an unknown pack format
#[derive(Debug, Parser)]
pub struct UnknownCommand {}

impl UnknownCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let source = ctx.manifest_source()?;
        let outcome = Pipeline::new(&*source)
            .reconcile(&ctx.config.paths.record)
            .await?;

        let unknown: Vec<&str> = outcome.reconciliation.unknown_ids().collect();
        let printer = &ctx.printer;

        if printer.is_json() {
            return printer.json(&unknown);
        }
        if unknown.is_empty() {
            printer.line("everything declared!");
        } else {
            printer.section("unknown versions", &unknown);
        }
        Ok(())
    }
}
