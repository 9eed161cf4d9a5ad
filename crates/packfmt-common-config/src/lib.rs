//! Configuration types for packfmt.
//!
//! This crate provides the configuration used by the `packfmt` tool,
//! read from `.packfmt/config.yaml` files.

pub mod types;
pub mod loader;
pub mod env;

pub use types::*;
pub use loader::*;
pub use env::*;
