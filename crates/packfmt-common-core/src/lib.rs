//! packfmt common core types.

pub mod error;

pub use error::{Error, ErrorCode, Result};
