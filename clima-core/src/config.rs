use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const API_URL_ENV: &str = "CLIMA_API_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_url = "https://clima.example.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the weather backend.
    pub api_url: Option<String>,

    /// Optional request timeout; unset means the transport default.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Resolve the base URL: environment, then config file, then default.
    pub fn api_url(&self) -> String {
        self.api_url_with_env(std::env::var(API_URL_ENV).ok())
    }

    /// Same as [`Config::api_url`] with the environment value passed in.
    pub fn api_url_with_env(&self, env: Option<String>) -> String {
        env.filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate and store a new base URL.
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        let parsed = reqwest::Url::parse(trimmed)
            .with_context(|| format!("Invalid API URL '{trimmed}'"))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Unsupported URL scheme '{}'. Use http:// or https://.",
                parsed.scheme()
            ));
        }

        self.api_url = Some(trimmed.trim_end_matches('/').to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima-cana", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url_with_env(None), DEFAULT_API_URL);
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn file_value_beats_default() {
        let cfg = Config { api_url: Some("https://clima.example.com".into()), ..Config::default() };
        assert_eq!(cfg.api_url_with_env(None), "https://clima.example.com");
    }

    #[test]
    fn env_beats_file_value() {
        let cfg = Config { api_url: Some("https://clima.example.com".into()), ..Config::default() };
        let url = cfg.api_url_with_env(Some("http://10.0.0.5:8000".into()));
        assert_eq!(url, "http://10.0.0.5:8000");
    }

    #[test]
    fn blank_env_is_ignored() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url_with_env(Some("  ".into())), DEFAULT_API_URL);
    }

    #[test]
    fn set_api_url_strips_trailing_slash() {
        let mut cfg = Config::default();
        cfg.set_api_url(" https://clima.example.com/ ").unwrap();
        assert_eq!(cfg.api_url.as_deref(), Some("https://clima.example.com"));
    }

    #[test]
    fn set_api_url_rejects_garbage() {
        let mut cfg = Config::default();
        assert!(cfg.set_api_url("not a url").is_err());

        let err = cfg.set_api_url("ftp://clima.example.com").unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme"));
        assert!(cfg.api_url.is_none());
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config { api_url: Some("http://backend:8000".into()), timeout_secs: Some(10) };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
