//! Environment variable handling.

use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    pub const PACKFMT_CONFIG: &str = "PACKFMT_CONFIG";
    pub const PACKFMT_MANIFEST_URL: &str = "PACKFMT_MANIFEST_URL";
    pub const PACKFMT_MANIFEST_FILE: &str = "PACKFMT_MANIFEST_FILE";
}

/// Environment configuration.
pub struct Environment {
    _guard: (), // Prevent construction outside module
}

impl Environment {
    /// Load `.env` then `.env.local` from the project directory.
    ///
    /// Missing files are fine; malformed ones are reported.
    pub fn init(project_dir: &Path) -> Result<Self, EnvError> {
        for name in [".env", ".env.local"] {
            match dotenvy::from_path(project_dir.join(name)) {
                Ok(()) => {}
                Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }
}
