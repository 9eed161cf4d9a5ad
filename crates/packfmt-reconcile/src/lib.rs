//! Pack format reconciliation.
//!
//! Reads the hand-maintained record of pack format specifiers, fetches the
//! upstream version manifest, merges the two and regenerates the static
//! table between the markers of the generated artifact.
//!
//! ```no_run
//! use packfmt_reconcile::{FileManifestSource, Pipeline, RunOptions};
//!
//! # async fn run() -> packfmt_reconcile::Result<()> {
//! let source = FileManifestSource::new("version_manifest.json");
//! let report = Pipeline::new(&source)
//!     .run(&RunOptions::new("pack_formats_src", "src/pack_formats.rs"))
//!     .await?;
//! println!("changed: {}", report.changed);
//! # Ok(())
//! # }
//! ```

pub mod change;
pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod format;
pub mod manifest;
pub mod pipeline;
pub mod reconcile;
pub mod specifier;
pub mod stats;

pub use change::{digest, ChangeOutcome, ChangeSignal};
pub use codegen::{generate, Markers, DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER};
pub use diagnostics::{DuplicateSpecifier, InvalidLine, InvalidReason, UnusedSpecifier};
pub use error::{ReconcileError, Result};
pub use fetch::{FileManifestSource, HttpManifestSource, ManifestSource};
pub use format::{FormatAssignment, SpecifierKind};
pub use manifest::{Latest, Manifest, ManifestDocument, ManifestEntry, ReleaseClass};
pub use pipeline::{Outcome, Pipeline, RunOptions, RunReport, WriteMode};
pub use reconcile::{reconcile, ReconciledEntry, Reconciliation};
pub use specifier::{parse_record, ParsedRecord, SpecifierEntry, SpecifierMap, SpecifierParser};
pub use stats::Stats;
