//! Configuration (TOML)
//!
//! Every section and key has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::{AccountIdentifier, InvalidStorageSize, StorageSize};
use crate::session::{DEFAULT_READ_ENDPOINT, DEFAULT_WRITE_ENDPOINT, Endpoint};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid endpoint url")]
    Endpoint(#[from] url::ParseError),

    #[error(transparent)]
    Size(#[from] InvalidStorageSize),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage account identifier the blog lives in.
    pub identifier: String,
    /// Size requested when the account is created.
    pub default_size: String,
    pub read_endpoint: String,
    pub write_endpoint: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            identifier: "driveblog".to_string(),
            default_size: "10MB".to_string(),
            read_endpoint: DEFAULT_READ_ENDPOINT.to_string(),
            write_endpoint: DEFAULT_WRITE_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub concurrency: ConcurrencyMode,
}

/// How the index write treats a concurrent change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Overwrite blindly; a concurrent update from another session is lost.
    #[default]
    LastWriteWins,
    /// Re-read the revision before writing and refuse with `Conflict` if it moved.
    Revisioned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout; unset leaves the transport default.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl BlogConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path`, or log why not and use the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load_from_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using default config");
            Self::default()
        })
    }

    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        Ok(Endpoint::parse(
            &self.storage.read_endpoint,
            &self.storage.write_endpoint,
        )?)
    }

    pub fn storage_size(&self) -> Result<StorageSize, ConfigError> {
        Ok(self.storage.default_size.parse()?)
    }

    pub fn identifier(&self) -> AccountIdentifier {
        AccountIdentifier::new(self.storage.identifier.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint()?;
        self.storage_size()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        let config = BlogConfig::from_toml_str("").unwrap();
        assert_eq!(config, BlogConfig::default());
        assert_eq!(config.catalog.concurrency, ConcurrencyMode::LastWriteWins);
        assert_eq!(config.http.timeout(), None);
        assert_eq!(config.identifier().as_str(), "driveblog");
    }

    #[test]
    fn sections_override_defaults() {
        let config = BlogConfig::from_toml_str(
            r#"
            [storage]
            identifier = "notes"
            default_size = "1GB"
            read_endpoint = "http://127.0.0.1:9000/"

            [catalog]
            concurrency = "revisioned"

            [http]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.identifier, "notes");
        assert_eq!(config.storage_size().unwrap().bytes(), 1 << 30);
        assert_eq!(config.endpoint().unwrap().read.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(
            config.storage.write_endpoint,
            StorageConfig::default().write_endpoint
        );
        assert_eq!(config.catalog.concurrency, ConcurrencyMode::Revisioned);
        assert_eq!(config.http.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            BlogConfig::from_toml_str("[storage]\ndefault_size = \"huge\""),
            Err(ConfigError::Size(_))
        ));
        assert!(matches!(
            BlogConfig::from_toml_str("[storage]\nread_endpoint = \"not a url\""),
            Err(ConfigError::Endpoint(_))
        ));
        assert!(matches!(
            BlogConfig::from_toml_str("[catalog]\nconcurrency = \"merge\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file_and_falls_back_when_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[catalog]\nconcurrency = \"revisioned\"").unwrap();

        let config = BlogConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.catalog.concurrency, ConcurrencyMode::Revisioned);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            BlogConfig::load_from_file(&missing),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(BlogConfig::load_or_default(&missing), BlogConfig::default());
    }
}
