//! Where the manifest comes from.

use async_trait::async_trait;
use std::path::PathBuf;

use packfmt_common_http::{FetchError, HttpClient};

use crate::error::{ReconcileError, Result};
use crate::manifest::{Manifest, ManifestDocument};

/// A source of the upstream version manifest.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Human-readable origin, used in logs and errors.
    fn describe(&self) -> String;

    /// Retrieve the manifest exactly as decoded, in upstream order.
    async fn fetch_document(&self) -> Result<ManifestDocument>;

    /// Retrieve and validate the manifest.
    async fn fetch(&self) -> Result<Manifest> {
        Ok(Manifest::from_document(self.fetch_document().await?))
    }
}

/// Fetches the manifest over HTTP GET.
pub struct HttpManifestSource {
    client: HttpClient,
    url: String,
}

impl HttpManifestSource {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_document(&self) -> Result<ManifestDocument> {
        let document: ManifestDocument = self.client.get_json(&self.url).await.map_err(|e| match e {
            FetchError::Decode { source, .. } => ReconcileError::schema(&self.url, source.to_string()),
            other => ReconcileError::unavailable(&self.url, other),
        })?;

        tracing::debug!(url = %self.url, versions = document.versions.len(), "manifest received");
        Ok(document)
    }
}

/// Reads a saved manifest from disk.
pub struct FileManifestSource {
    path: PathBuf,
}

impl FileManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManifestSource for FileManifestSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_document(&self) -> Result<ManifestDocument> {
        let origin = self.describe();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| ReconcileError::unavailable(origin.clone(), e))?;
        tracing::debug!(path = %origin, bytes = bytes.len(), "manifest read from disk");
        ManifestDocument::from_json(&bytes, &origin)
    }
}
