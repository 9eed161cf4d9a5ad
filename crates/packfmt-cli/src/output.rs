//! Console output for commands.
//!
//! Command results go to stdout; logging stays on stderr.

use serde::Serialize;
use std::fmt::Display;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes command output, optionally wrapped in CI log groups.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    /// Emit `::group::`/`::endgroup::` around sections.
    pub ci: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, ci: bool) -> Self {
        Self { format, ci }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print a titled section. Nothing is printed in JSON mode.
    pub fn section<I, T>(&self, title: &str, lines: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        if self.is_json() {
            return;
        }
        if self.ci {
            println!("::group::{title}");
        } else {
            println!("{title}:");
        }
        for line in lines {
            if self.ci {
                println!("{line}");
            } else {
                println!("   {line}");
            }
        }
        if self.ci {
            println!("::endgroup::");
        }
    }

    /// Print a plain line. Nothing is printed in JSON mode.
    pub fn line(&self, text: impl Display) {
        if !self.is_json() {
            println!("{text}");
        }
    }

    /// Print `value` as pretty JSON.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {e}")))?;
        println!("{text}");
        Ok(())
    }
}
