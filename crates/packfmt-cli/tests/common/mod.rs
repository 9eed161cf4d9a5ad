//! Common test utilities for CLI testing.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use packfmt_test_utils::fixtures;
use tempfile::{tempdir, TempDir};

/// Project directory holding a record, a saved manifest and an artifact.
pub struct TestContext {
    pub temp_dir: TempDir,
    pub record: PathBuf,
    pub manifest: PathBuf,
    pub artifact: PathBuf,
}

impl TestContext {
    pub fn new(record: &str, manifest: serde_json::Value) -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let record_path = temp_dir.path().join("pack_formats_src");
        let manifest_path = temp_dir.path().join("version_manifest.json");
        let artifact_path = temp_dir.path().join("pack_formats.rs");

        std::fs::write(&record_path, record).expect("Failed to write record");
        std::fs::write(&manifest_path, manifest.to_string()).expect("Failed to write manifest");
        std::fs::write(&artifact_path, fixtures::artifact_template()).expect("Failed to write artifact");

        Self {
            temp_dir,
            record: record_path,
            manifest: manifest_path,
            artifact: artifact_path,
        }
    }

    /// Get path to temp directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn artifact_text(&self) -> String {
        std::fs::read_to_string(&self.artifact).expect("Failed to read artifact")
    }

    /// Command pointed at this context's files, isolated from ambient config.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("packfmt").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("PACKFMT_CONFIG")
            .env_remove("PACKFMT_MANIFEST_URL")
            .env_remove("PACKFMT_MANIFEST_FILE")
            .env_remove("RUST_LOG")
            .env("PACKFMT_LOG_LEVEL", "warn")
            .env("NO_COLOR", "1")
            .arg("--record")
            .arg(&self.record)
            .arg("--artifact")
            .arg(&self.artifact)
            .arg("--manifest-file")
            .arg(&self.manifest);
        cmd
    }
}
