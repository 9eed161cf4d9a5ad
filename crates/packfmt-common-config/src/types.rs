//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the upstream version manifest is published.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackfmtConfig {
    /// Input record and generated artifact locations.
    pub paths: PathsConfig,
    /// Upstream manifest source.
    pub manifest: ManifestConfig,
    /// Generated artifact layout.
    pub artifact: ArtifactConfig,
    /// HTTP client settings.
    pub http: HttpSettings,
}

impl PackfmtConfig {
    /// Resolve relative paths against a project directory.
    pub fn resolve_paths(mut self, project_dir: &Path) -> Self {
        self.paths.record = resolve(project_dir, &self.paths.record);
        self.paths.artifact = resolve(project_dir, &self.paths.artifact);
        if let Some(file) = self.manifest.file.take() {
            self.manifest.file = Some(resolve(project_dir, &file));
        }
        self
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// File locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Hand-maintained specifier record.
    pub record: PathBuf,
    /// Generated source artifact.
    pub artifact: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            record: PathBuf::from("lib/src/meta/pack_formats_src"),
            artifact: PathBuf::from("lib/src/meta/pack_formats.rs"),
        }
    }
}

/// Manifest source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Manifest URL, fetched with a plain GET.
    pub url: String,
    /// Saved manifest to read instead of fetching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MANIFEST_URL.to_string(),
            file: None,
        }
    }
}

/// Marker lines delimiting the generated body of the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub begin_marker: String,
    pub end_marker: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            begin_marker: "// @generated begin pack formats".to_string(),
            end_marker: "// @generated end pack formats".to_string(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// User agent override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl HttpSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths_joins_relative() {
        let mut config = PackfmtConfig::default();
        config.manifest.file = Some(PathBuf::from("manifest.json"));
        let config = config.resolve_paths(Path::new("/project"));

        assert_eq!(config.paths.record, PathBuf::from("/project/lib/src/meta/pack_formats_src"));
        assert_eq!(config.paths.artifact, PathBuf::from("/project/lib/src/meta/pack_formats.rs"));
        assert_eq!(config.manifest.file, Some(PathBuf::from("/project/manifest.json")));
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let mut config = PackfmtConfig::default();
        config.paths.record = PathBuf::from("/elsewhere/formats");
        let config = config.resolve_paths(Path::new("/project"));
        assert_eq!(config.paths.record, PathBuf::from("/elsewhere/formats"));
    }

    #[test]
    fn test_timeouts_as_durations() {
        let http = HttpSettings::default();
        assert_eq!(http.connect_timeout(), Duration::from_secs(10));
        assert_eq!(http.request_timeout(), Duration::from_secs(30));
    }
}
