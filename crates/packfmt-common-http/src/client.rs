//! Client construction and checked GETs.

use reqwest::{header, Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{FetchError, StatusClass};

/// Timeouts and identity for outgoing requests.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Falls back to `packfmt/<version>`.
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

impl ClientOptions {
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("packfmt/{}", env!("CARGO_PKG_VERSION")))
    }
}

/// GET client that only hands back successful bodies.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    request_timeout: Duration,
}

impl HttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let inner = ClientBuilder::new()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .user_agent(options.user_agent())
            .gzip(true)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            inner,
            request_timeout: options.request_timeout,
        })
    }

    /// GET `url` and return the body of a 2xx response.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, "GET");
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, self.request_timeout, e))?;
        let response = check_status(url, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, self.request_timeout, e))?;
        tracing::debug!(url, bytes = bytes.len(), "GET complete");
        Ok(bytes.to_vec())
    }

    /// GET `url` and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let bytes = self.get_bytes(url).await?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
            source,
        })
    }
}

async fn check_status(url: &str, response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    let Some(class) = StatusClass::of(status) else {
        return Ok(response);
    };

    let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(url, status = status.as_u16(), %class, "GET rejected");

    Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        class,
        retry_after,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        let options = ClientOptions::default();
        assert!(options.user_agent().starts_with("packfmt/"));
        assert_eq!(options.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_user_agent_override() {
        let options = ClientOptions {
            user_agent: Some("mirror-bot".to_string()),
            ..ClientOptions::default()
        };
        assert_eq!(options.user_agent(), "mirror-bot");
        assert!(HttpClient::new(&options).is_ok());
    }
}
