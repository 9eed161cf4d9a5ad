//! Configuration file loading and parsing.

use crate::types::PackfmtConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory, relative to the project root, holding `config.yaml`.
pub const CONFIG_DIR: &str = ".packfmt";
/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", .line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the default config file.
    pub fn config_path(&self) -> PathBuf {
        self.base_path.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from `.packfmt/config.yaml`, defaults if absent.
    pub fn load(&self) -> Result<PackfmtConfig, ConfigError> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(PackfmtConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_file(&self, path: &Path) -> Result<PackfmtConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: PackfmtConfig = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
            .map_err(|e| ConfigError::ValidationError {
                message: e.to_string(),
            })?;

        let mut result = String::with_capacity(content.len());
        let mut last = 0;

        for cap in re.captures_iter(content) {
            let Some(full_match) = cap.get(0) else { continue };
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result.push_str(&content[last..full_match.start()]);
            result.push_str(&value);
            last = full_match.end();
        }

        result.push_str(&content[last..]);
        Ok(result)
    }

    /// Validate configuration values.
    pub fn validate(&self, config: &PackfmtConfig) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::ValidationError {
            message: message.to_string(),
        };

        let begin = config.artifact.begin_marker.trim();
        let end = config.artifact.end_marker.trim();
        if begin.is_empty() || end.is_empty() {
            return Err(invalid("artifact markers must not be empty"));
        }
        if begin == end {
            return Err(invalid("artifact.begin_marker and artifact.end_marker must differ"));
        }

        if config.manifest.file.is_none() {
            url::Url::parse(&config.manifest.url).map_err(|e| ConfigError::ValidationError {
                message: format!("manifest.url is not a valid URL: {e}"),
            })?;
        }

        if config.http.connect_timeout_secs == 0 || config.http.request_timeout_secs == 0 {
            return Err(invalid("http timeouts must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, yaml: &str) {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILE), yaml).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config, PackfmtConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
paths:
  record: data/formats
  artifact: src/generated.rs
manifest:
  file: manifest.json
artifact:
  begin_marker: "// BEGIN"
  end_marker: "// END"
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.paths.record, PathBuf::from("data/formats"));
        assert_eq!(config.paths.artifact, PathBuf::from("src/generated.rs"));
        assert_eq!(config.manifest.file, Some(PathBuf::from("manifest.json")));
        assert_eq!(config.artifact.begin_marker, "// BEGIN");
        assert_eq!(config.artifact.end_marker, "// END");
    }

    #[test]
    fn test_load_file_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let missing = dir.path().join("nope.yaml");
        match loader.load_file(&missing).unwrap_err() {
            ConfigError::NotFound { path } => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${PACKFMT_NONEXISTENT:-default}").unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${PACKFMT_MISSING_VAR}");
        match result.unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "PACKFMT_MISSING_VAR"),
            _ => panic!("Expected EnvVarNotFound error"),
        }
    }

    #[test]
    fn test_env_var_expansion_in_config() {
        std::env::set_var("PACKFMT_TEST_ARTIFACT", "out/formats.rs");

        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
paths:
  artifact: ${PACKFMT_TEST_ARTIFACT}
http:
  request_timeout_secs: ${PACKFMT_TEST_TIMEOUT:-7}
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.paths.artifact, PathBuf::from("out/formats.rs"));
        assert_eq!(config.http.request_timeout_secs, 7);

        std::env::remove_var("PACKFMT_TEST_ARTIFACT");
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new(".");

        let mut config = PackfmtConfig::default();
        config.artifact.end_marker = config.artifact.begin_marker.clone();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("must differ")),
            _ => panic!("Expected ValidationError"),
        }

        let mut config = PackfmtConfig::default();
        config.artifact.begin_marker = "   ".to_string();
        assert!(loader.validate(&config).is_err());

        let mut config = PackfmtConfig::default();
        config.manifest.url = "not a url".to_string();
        match loader.validate(&config).unwrap_err() {
            ConfigError::ValidationError { message } => assert!(message.contains("manifest.url")),
            _ => panic!("Expected ValidationError"),
        }

        // a local manifest file makes the URL irrelevant
        config.manifest.file = Some(PathBuf::from("manifest.json"));
        assert!(loader.validate(&config).is_ok());

        let mut config = PackfmtConfig::default();
        config.http.request_timeout_secs = 0;
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
paths:
  record: formats
  artifact: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            _ => panic!("Expected ParseError with line number"),
        }
    }
}
