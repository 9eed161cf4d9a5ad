//! GET-only HTTP access for JSON documents.
//!
//! Failures fall into two groups callers care about: the document could not
//! be obtained ([`FetchError::is_unavailable`]), or it arrived but did not
//! decode ([`FetchError::Decode`], which keeps the body for diagnostics).

pub mod client;
pub mod error;

pub use client::{ClientOptions, HttpClient};
pub use error::{FetchError, StatusClass};
