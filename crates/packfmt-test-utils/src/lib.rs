//! Test utilities for packfmt crates.

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Writes `content` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

/// Upstream manifest fixtures.
pub mod fixtures {
    use serde_json::{json, Value};

    /// Default begin marker used by generated artifacts.
    pub const BEGIN_MARKER: &str = "// @generated begin pack formats";
    /// Default end marker used by generated artifacts.
    pub const END_MARKER: &str = "// @generated end pack formats";

    /// One manifest `versions` entry.
    pub fn version(id: &str, kind: &str, release_time: &str) -> Value {
        json!({
            "id": id,
            "type": kind,
            "url": format!("https://piston-meta.mojang.com/v1/packages/{id}.json"),
            "time": release_time,
            "releaseTime": release_time,
        })
    }

    /// A full manifest document; `latest` points at the first release and
    /// the first snapshot found in `versions`, falling back to the first id.
    pub fn manifest(versions: Vec<Value>) -> Value {
        let first_of = |kind: &str| {
            versions
                .iter()
                .find(|v| v["type"] == kind)
                .or_else(|| versions.first())
                .and_then(|v| v["id"].as_str())
                .unwrap_or_default()
                .to_string()
        };

        json!({
            "latest": { "release": first_of("release"), "snapshot": first_of("snapshot") },
            "versions": versions,
        })
    }

    /// Manifest of releases named `ids`, newest first, one day apart.
    pub fn release_manifest(ids: &[&str]) -> Value {
        let count = ids.len();
        let versions = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let day = count - i;
                version(id, "release", &format!("2023-01-{day:02}T10:00:00+00:00"))
            })
            .collect();
        manifest(versions)
    }

    /// Artifact with a one-line prologue, an empty body and a closing
    /// epilogue.
    pub fn artifact_template() -> String {
        format!(
            "use super::pack_version_specifier::{{ PackFormat, PackVersion, ReleaseType }};\n\
             \n\
             pub const PACK_FORMATS: &[PackVersion] = &[\n\
             {BEGIN_MARKER}\n\
             {END_MARKER}\n\
             ];\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = temp_dir();
        let path = write_file(&dir, "a/b/c.txt", "x");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "x");
    }

    #[test]
    fn test_assert_macros() {
        let ok: Result<u8, String> = Ok(3);
        assert_eq!(assert_ok!(ok), 3);
        let err: Result<u8, String> = Err("bad".to_string());
        assert_eq!(assert_err!(err), "bad");
    }

    #[test]
    fn test_release_manifest_is_newest_first() {
        let manifest = fixtures::release_manifest(&["1.2", "1.1", "1.0"]);
        let versions = manifest["versions"].as_array().unwrap();
        assert_eq!(versions.len(), 3);
        assert_eq!(manifest["latest"]["release"], "1.2");
        assert!(versions[0]["releaseTime"].as_str() > versions[2]["releaseTime"].as_str());
    }

    #[test]
    fn test_artifact_template_has_markers() {
        let text = fixtures::artifact_template();
        assert!(text.contains(fixtures::BEGIN_MARKER));
        assert!(text.contains(fixtures::END_MARKER));
        assert!(text.ends_with("];\n"));
    }

    proptest! {
        #[test]
        fn write_file_round_trips_content(content in "[a-zA-Z0-9 \n]{0,64}") {
            let dir = temp_dir();
            let path = write_file(&dir, "record", &content);
            prop_assert_eq!(std::fs::read_to_string(path).unwrap(), content);
        }
    }
}
