// src/core/config_manager.rs
//! Layered configuration: defaults, optional YAML file, environment, CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils::normalize_api_base;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_WEB_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILE: &str = "/tmp/cv_extract.log";
const DEFAULT_CONFIG_FILE: &str = "cv_extract.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub web: WebConfig,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_base: String,
    /// No timeout unless one is configured.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub port: u16,
}

/// One environment section of the YAML file; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSection {
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub port: Option<u16>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                api_base: DEFAULT_API_BASE.to_string(),
                timeout_seconds: None,
            },
            web: WebConfig {
                port: DEFAULT_WEB_PORT,
            },
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ConfigManager {
    /// Load all configuration layers from the process environment
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_file_path() {
            let section = Self::load_file(&path, &Self::environment())?;
            config.apply_file(section);
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn environment() -> String {
        std::env::var("CV_EXTRACT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn config_file_path() -> Option<PathBuf> {
        match std::env::var("CV_EXTRACT_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Read the section of the YAML file that matches `environment`
    pub fn load_file(path: &Path, environment: &str) -> Result<FileSection> {
        info!(
            "Loading configuration file {} for environment: {}",
            path.display(),
            environment
        );

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse_file(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_file(content: &str, environment: &str) -> Result<FileSection> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    pub fn apply_file(&mut self, section: FileSection) {
        if let Some(api_base) = section.api_base {
            self.service.api_base = normalize_api_base(&api_base);
        }
        if section.timeout_seconds.is_some() {
            self.service.timeout_seconds = section.timeout_seconds;
        }
        if let Some(port) = section.port {
            self.web.port = port;
        }
        if let Some(log_file) = section.log_file {
            self.log_file = log_file;
        }
    }

    /// Apply `CV_EXTRACT_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup("CV_EXTRACT_API_URL") {
            self.service.api_base = normalize_api_base(&api_base);
        }

        if let Some(timeout) = lookup("CV_EXTRACT_TIMEOUT_SECS") {
            let secs = timeout
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("CV_EXTRACT_TIMEOUT_SECS must be a number of seconds"))?;
            self.service.timeout_seconds = Some(secs);
        }

        if let Some(port) = lookup("CV_EXTRACT_PORT") {
            self.web.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("CV_EXTRACT_PORT must be a valid port number"))?;
        }

        if let Some(log_file) = lookup("CV_EXTRACT_LOG_FILE") {
            self.log_file = PathBuf::from(log_file);
        }

        Ok(())
    }

    /// Command-line flags win over everything else
    pub fn with_overrides(mut self, api_base: Option<&str>, timeout_seconds: Option<u64>) -> Self {
        if let Some(api_base) = api_base {
            self.service.api_base = normalize_api_base(api_base);
        }
        if timeout_seconds.is_some() {
            self.service.timeout_seconds = timeout_seconds;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::default();
        assert_eq!(config.service.api_base, "http://127.0.0.1:8000");
        assert_eq!(config.service.timeout_seconds, None);
        assert_eq!(config.web.port, 8080);
    }

    #[test]
    fn test_parse_file_selects_environment() {
        let yaml = r#"
local:
  api_base: http://localhost:9000/
production:
  api_base: https://cv.example.com
  timeout_seconds: 120
  port: 80
"#;
        let local = ConfigManager::parse_file(yaml, "local").unwrap();
        assert_eq!(local.api_base.as_deref(), Some("http://localhost:9000/"));
        assert_eq!(local.port, None);

        let production = ConfigManager::parse_file(yaml, "production").unwrap();
        assert_eq!(production.timeout_seconds, Some(120));

        let mut config = ConfigManager::default();
        config.apply_file(production);
        assert_eq!(config.service.api_base, "https://cv.example.com");
        assert_eq!(config.service.timeout_seconds, Some(120));
        assert_eq!(config.web.port, 80);
    }

    #[test]
    fn test_load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv_extract.yaml");
        std::fs::write(&path, "local:\n  port: 9999\n").unwrap();

        let section = ConfigManager::load_file(&path, "local").unwrap();
        assert_eq!(section.port, Some(9999));
        assert!(ConfigManager::load_file(&dir.path().join("missing.yaml"), "local").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CV_EXTRACT_API_URL", "http://backend:8000/"),
            ("CV_EXTRACT_TIMEOUT_SECS", "30"),
            ("CV_EXTRACT_PORT", "3000"),
        ]);
        let mut config = ConfigManager::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.service.api_base, "http://backend:8000");
        assert_eq!(config.service.timeout_seconds, Some(30));
        assert_eq!(config.web.port, 3000);
    }

    #[test]
    fn test_env_rejects_bad_port() {
        let mut config = ConfigManager::default();
        let result = config.apply_env(|key| (key == "CV_EXTRACT_PORT").then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let config = ConfigManager::default().with_overrides(Some("http://other:1/"), Some(5));
        assert_eq!(config.service.api_base, "http://other:1");
        assert_eq!(config.service.timeout_seconds, Some(5));

        let config = ConfigManager::default().with_overrides(None, None);
        assert_eq!(config.service.api_base, DEFAULT_API_BASE);
    }
}
