//! Command implementations.

mod fetch_manifest;
mod generate;
mod unknown;

pub use fetch_manifest::FetchManifestCommand;
pub use generate::GenerateCommand;
pub use unknown::UnknownCommand;
