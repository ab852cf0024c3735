//! Configuration handling for the terminal client

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Backend address used when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4000";

/// Environment variable overriding the configured backend address
pub const SERVER_URL_ENV: &str = "EVIDENCE_SERVER_URL";

/// User configuration for the terminal client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Backend address
    pub server_url: Option<String>,
    /// Directory the spreadsheet template is downloaded into
    pub template_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "evidence-center", "evidence-center")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config dir
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load `path` if it exists, otherwise the defaults
    fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Backend address: command line, then environment, then config file
    pub fn resolve_server_url(&self, cli: Option<String>) -> String {
        Self::pick_server_url(cli, env::var(SERVER_URL_ENV).ok(), self.server_url.clone())
    }

    fn pick_server_url(
        cli: Option<String>,
        env: Option<String>,
        file: Option<String>,
    ) -> String {
        cli.or(env)
            .or(file)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    pub fn template_dir(&self) -> PathBuf {
        self.template_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.server_url.is_none());
        assert!(config.template_dir.is_none());
        assert_eq!(config.template_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"server_url": "http://evidence:4000", "theme": "dark"}"#;
        let parsed: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.server_url.as_deref(), Some("http://evidence:4000"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"template_dir": "/srv/templates"}}"#).unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.template_dir(), PathBuf::from("/srv/templates"));
        assert!(config.server_url.is_none());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ClientConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_or_default(&dir.path().join("config.json")).unwrap();
        assert!(config.server_url.is_none());
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"server_url": "http://evidence:4000"}"#).unwrap();
        let config = ClientConfig::load_or_default(&path).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://evidence:4000"));
    }

    mod server_url {
        use super::*;

        fn some(s: &str) -> Option<String> {
            Some(s.to_string())
        }

        #[test]
        fn test_cli_wins() {
            let url = ClientConfig::pick_server_url(some("http://cli"), some("http://env"), some("http://file"));
            assert_eq!(url, "http://cli");
        }

        #[test]
        fn test_env_before_file() {
            let url = ClientConfig::pick_server_url(None, some("http://env"), some("http://file"));
            assert_eq!(url, "http://env");
        }

        #[test]
        fn test_file_used_last() {
            let url = ClientConfig::pick_server_url(None, None, some("http://file"));
            assert_eq!(url, "http://file");
        }

        #[test]
        fn test_default_when_unset() {
            assert_eq!(
                ClientConfig::pick_server_url(None, None, None),
                DEFAULT_SERVER_URL
            );
        }

        #[test]
        fn test_blank_value_falls_back_to_default() {
            assert_eq!(
                ClientConfig::pick_server_url(some("  "), None, None),
                DEFAULT_SERVER_URL
            );
        }
    }
}
