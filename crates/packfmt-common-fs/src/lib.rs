//! File system utilities for packfmt.
//!
//! Reads are single-shot and writes go through a temporary sibling file
//! followed by a rename, so a failed write never leaves a truncated
//! target behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use packfmt_common_core::{Error, ErrorCode, Result};

fn read_error(path: &Path, e: io::Error) -> Error {
    let code = match e.kind() {
        io::ErrorKind::NotFound => ErrorCode::FILE_NOT_FOUND,
        _ => ErrorCode::FILE_READ_ERROR,
    };
    let message = match e.kind() {
        io::ErrorKind::NotFound => format!("file not found: {}", path.display()),
        io::ErrorKind::PermissionDenied => format!("permission denied: {}", path.display()),
        _ => format!("failed to read file: {}", path.display()),
    };
    Error::FileSystem {
        code,
        message,
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    }
}

fn write_error(path: &Path, message: String, e: io::Error) -> Error {
    Error::FileSystem {
        code: ErrorCode::FILE_WRITE_ERROR,
        message,
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    }
}

/// Read a UTF-8 text file.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    tracing::trace!(path = %path.display(), "reading file");
    fs::read_to_string(path).map_err(|e| read_error(path, e))
}

/// Read a file to bytes.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| read_error(path, e))
}

/// Read a file to bytes, returning `None` if it does not exist.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    match read_bytes(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent).map_err(|e| {
        write_error(
            parent,
            format!("failed to create parent directory: {}", parent.display()),
            e,
        )
    })?;

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => temp_path.push(".tmp"),
    }

    {
        let mut file = File::create(&temp_path).map_err(|e| {
            write_error(
                &temp_path,
                format!("failed to create temporary file: {}", temp_path.display()),
                e,
            )
        })?;

        let written = file.write_all(contents).and_then(|_| file.sync_all());
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(
                &temp_path,
                format!("failed to write temporary file: {}", temp_path.display()),
                e,
            ));
        }
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_error(
            path,
            format!("failed to rename temporary file to target: {}", path.display()),
            e,
        )
    })?;

    tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = read_to_string(dir.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::FILE_NOT_FOUND));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_read_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        assert!(read_optional(&path).unwrap().is_none());

        fs::write(&path, "hello").unwrap();
        assert_eq!(read_optional(&path).unwrap().unwrap(), b"hello");
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.rs");

        write_string_atomic(&path, "first").unwrap();
        write_string_atomic(&path, "second").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("nested").join(".out.rs.tmp").exists());
    }
}
