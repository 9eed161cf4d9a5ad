//! Fetch failures and HTTP status classification.

use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Coarse grouping of a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 429, possibly with a `Retry-After`.
    RateLimited,
    /// Any other 4xx.
    Client,
    /// 5xx.
    Server,
    /// 1xx or 3xx that reqwest did not resolve.
    Unexpected,
}

impl StatusClass {
    /// `None` for success statuses.
    pub fn of(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            None
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Some(Self::RateLimited)
        } else if status.is_client_error() {
            Some(Self::Client)
        } else if status.is_server_error() {
            Some(Self::Server)
        } else {
            Some(Self::Unexpected)
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RateLimited => "rate limited",
            Self::Client => "client error",
            Self::Server => "server error",
            Self::Unexpected => "unexpected status",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} timed out after {}s", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status} ({class})")]
    Status {
        url: String,
        status: u16,
        class: StatusClass,
        retry_after: Option<Duration>,
        body: String,
    },

    #[error("GET {url} returned a body that is not the expected JSON: {source}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub(crate) fn transport(url: &str, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// The document could not be obtained at all.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::Decode { .. })
    }

    /// Response body, when the server sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}
