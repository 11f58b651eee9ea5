use super::quote::{AssetCategory, SymbolRequest};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const API_URL_ENV: &str = "MARKETBOARD_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            retries: 2,
            retry_delay_ms: 250,
        }
    }
}

/// What to do with a batch when some of its symbols produce no quote.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Drop missing symbols and keep the rest in order.
    #[default]
    DropMissing,
    /// Any missing symbol fails the whole live batch.
    AllOrNothing,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub indices: Vec<SymbolRequest>,
    pub stocks: Vec<SymbolRequest>,
    pub batch_policy: BatchPolicy,
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            backend: BackendConfig::default(),
            indices: vec![
                SymbolRequest::new("^GSPC", AssetCategory::Index),
                SymbolRequest::new("^NDX", AssetCategory::Index),
            ],
            stocks: ["AAPL", "GOOGL", "MSFT", "TSLA"]
                .iter()
                .map(|s| SymbolRequest::new(s, AssetCategory::Stock))
                .collect(),
            batch_policy: BatchPolicy::default(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default().with_env_override(std::env::var(API_URL_ENV).ok()));
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "marketboard", "marketboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config.with_env_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Replaces the backend URL when an override is present and non-empty.
    /// The environment is read once here; the client never consults it.
    pub fn with_env_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            debug!(base_url = %url, "Backend URL overridden from environment");
            self.backend.base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
backend:
  base_url: "http://example.com/api"
  timeout_secs: 3
indices:
  - symbol: "^GSPC"
    category: IDX
stocks:
  - symbol: "NVDA"
    category: STK
  - symbol: "BTC"
    category: CRY
batch_policy: all_or_nothing
"#;

        let config = AppConfig::from_yaml(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.backend.base_url, "http://example.com/api");
        assert_eq!(config.backend.timeout_secs, 3);
        // Unspecified backend fields fall back to defaults
        assert_eq!(config.backend.retries, 2);
        assert_eq!(config.indices.len(), 1);
        assert_eq!(config.indices[0].symbol, "^GSPC");
        assert_eq!(config.indices[0].category, AssetCategory::Index);
        assert_eq!(config.stocks.len(), 2);
        assert_eq!(config.stocks[1].category, AssetCategory::Crypto);
        assert_eq!(config.batch_policy, BatchPolicy::AllOrNothing);
        assert_eq!(config.history_days, DEFAULT_HISTORY_DAYS);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        let symbols: Vec<_> = config.stocks.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOGL", "MSFT", "TSLA"]);
        assert_eq!(config.batch_policy, BatchPolicy::DropMissing);
    }

    #[test]
    fn test_default_yaml_matches_defaults() {
        let config = AppConfig::from_yaml(include_str!("../../docs/example_config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_override() {
        let config = AppConfig::default().with_env_override(Some("http://backend:9000".into()));
        assert_eq!(config.backend.base_url, "http://backend:9000");

        let config = AppConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);

        let config = AppConfig::default().with_env_override(None);
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }

    // The only test in this binary that touches the override variable.
    #[test]
    fn test_load_from_path_applies_env_override() {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        fs::write(
            config_file.path(),
            "backend:\n  base_url: http://example.com\nhistory_days: 7\n",
        )
        .expect("Failed to write config file");

        unsafe { std::env::remove_var(API_URL_ENV) };
        let config = AppConfig::load_from_path(config_file.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://example.com");

        unsafe { std::env::set_var(API_URL_ENV, "http://override:9000") };
        let config = AppConfig::load_from_path(config_file.path());
        unsafe { std::env::remove_var(API_URL_ENV) };

        let config = config.unwrap();
        assert_eq!(config.backend.base_url, "http://override:9000");
        assert_eq!(config.history_days, 7);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(AppConfig::from_yaml("batch_policy: sometimes").is_err());
    }
}
