//! Configuration file support
//!
//! `~/.tabletop/config.toml` (or an explicit path) with two sections:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:9090"
//! cors_permissive = false
//!
//! [database]
//! url = "postgres://localhost/tabletop"
//! max_connections = 5
//! ```
//!
//! A missing file means defaults. CLI flags and environment variables are
//! applied on top by the binary.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Default listen address
pub const DEFAULT_BIND: ([u8; 4], u16) = ([127, 0, 0, 1], 9090);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or [database] url in the config file")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletopConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(DEFAULT_BIND),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl TabletopConfig {
    /// Get config file path: ~/.tabletop/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tabletop/config.toml")
    }

    /// Load from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Overlay values that came from flags or the environment.
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        bind: Option<SocketAddr>,
        cors_permissive: bool,
    ) -> Self {
        if database_url.is_some() {
            self.database.url = database_url;
        }
        if let Some(bind) = bind {
            self.server.bind = bind;
        }
        self.server.cors_permissive |= cors_permissive;
        self
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TabletopConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, TabletopConfig::default());
        assert_eq!(config.server.bind.port(), 9090);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[database]\nurl = \"postgres://localhost/games\"\n").unwrap();

        let config = TabletopConfig::load_from(&path).unwrap();
        assert_eq!(config.database_url().unwrap(), "postgres://localhost/games");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server, ServerSection::default());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = 1").unwrap();

        let err = TabletopConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_win() {
        let config = TabletopConfig::default().with_overrides(
            Some("postgres://override/db".into()),
            Some("0.0.0.0:8080".parse().unwrap()),
            true,
        );
        assert_eq!(config.database_url().unwrap(), "postgres://override/db");
        assert_eq!(config.server.bind.port(), 8080);
        assert!(config.server.cors_permissive);
    }

    #[test]
    fn absent_overrides_keep_file_values() {
        let mut config = TabletopConfig::default();
        config.database.url = Some("postgres://file/db".into());

        let config = config.with_overrides(None, None, false);
        assert_eq!(config.database_url().unwrap(), "postgres://file/db");
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = TabletopConfig::default().database_url().unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }
}
