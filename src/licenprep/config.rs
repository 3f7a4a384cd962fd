use crate::error::{LicenPrepError, Result};
use crate::store::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const HOME_ENV: &str = "LICENPREP_HOME";
pub const API_URL_ENV: &str = "LICENPREP_API_URL";

/// Configuration for licenprep, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the question generation service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Namespace the persisted state is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Upper bound for a generation request, in seconds. Unset means wait.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            storage_key: default_storage_key(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LicenPrepError::Io)?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(LicenPrepError::Serialization)?;
        Ok(config)
    }

    /// Write the config to `<config_dir>/config.json`, creating the
    /// directory if needed. A base URL that is not http(s) is refused.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        validate_api_base_url(&self.api_base_url)?;
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        debug!(dir = %config_dir.display(), api = %self.api_base_url, "config saved");
        Ok(())
    }

    /// Apply overrides from the environment (`LICENPREP_API_URL`).
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with an
    /// explicit variable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.set_api_base_url(&url);
        }
        self
    }

    /// Set the base URL (trailing slashes are dropped)
    pub fn set_api_base_url(&mut self, url: &str) {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// The generation service is reached over plain HTTP(S) only.
pub fn validate_api_base_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or_default();
    if rest.is_empty() {
        return Err(LicenPrepError::Validation(format!(
            "Generation service URL must start with http:// or https://: {:?}",
            url
        )));
    }
    Ok(())
}

/// Where state and config live: `$LICENPREP_HOME` if set, otherwise the
/// platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "licenprep", "licenprep")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| LicenPrepError::Store("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.storage_key, "licenprep-storage");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("not").join("yet");
        let mut config = AppConfig::default();
        config.set_api_base_url("http://generator.internal:9000/");
        config.request_timeout_secs = Some(45);
        config.save(&nested).unwrap();

        let loaded = AppConfig::load(&nested).unwrap();
        assert_eq!(loaded.api_base_url, "http://generator.internal:9000");
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_save_refuses_non_http_url() {
        let dir = TempDir::new().unwrap();
        for url in ["ftp://generator", "generator:8000", "http://"] {
            let mut config = AppConfig::default();
            config.set_api_base_url(url);
            let err = config.save(dir.path()).unwrap_err();
            assert!(matches!(err, LicenPrepError::Validation(_)), "{}", url);
        }
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"request_timeout_secs": 10}"#).unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_env_override() {
        let config = AppConfig::default().with_overrides_from(|key| {
            (key == API_URL_ENV).then(|| "http://127.0.0.1:5000/".to_string())
        });
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");

        let untouched = AppConfig::default().with_overrides_from(|_| Some("  ".to_string()));
        assert_eq!(untouched.api_base_url, "http://localhost:8000");
    }
}
