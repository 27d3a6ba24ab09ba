//! Configuration management for carrier-dashboard
//!
//! Config stored at: ~/.config/carrier-dashboard/config.json

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use carrier_domain::service::{DEFAULT_EMAIL_DOMAIN, DEFAULT_ITEMS_PER_PAGE};
use carrier_types::{ConfigError, OutputFormat, Result};

/// Environment variable overriding the backend URL
pub const ENV_BACKEND_URL: &str = "CARRIER_BACKEND_URL";
/// Environment variable overriding the backend service key
pub const ENV_BACKEND_KEY: &str = "CARRIER_BACKEND_KEY";

/// Where the carrier dataset comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// CSV file on disk
    #[default]
    File,
    /// CSV file fetched over HTTP
    Http,
    /// Backend table with server-side filtering
    Backend,
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSourceKind::File => write!(f, "file"),
            DataSourceKind::Http => write!(f, "http"),
            DataSourceKind::Backend => write!(f, "backend"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Dataset loading strategy
    #[serde(default)]
    pub data_source: DataSourceKind,

    /// CSV path for the `file` source
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// CSV URL for the `http` source
    #[serde(default)]
    pub dataset_url: Option<String>,

    /// Backend base URL (e.g. https://project.supabase.co)
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Backend service key
    #[serde(default)]
    pub backend_key: Option<String>,

    /// Table holding carrier rows for the `backend` source
    #[serde(default = "default_carriers_table")]
    pub carriers_table: String,

    /// Table holding user profiles
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Domain for synthesized login emails
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Timeout applied to every network request
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Rows per page in the results table
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/filtered_carrier_data.csv")
}

fn default_carriers_table() -> String {
    "carriers".to_string()
}

fn default_profiles_table() -> String {
    "profiles".to_string()
}

fn default_email_domain() -> String {
    DEFAULT_EMAIL_DOMAIN.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DataSourceKind::default(),
            dataset_path: default_dataset_path(),
            dataset_url: None,
            backend_url: None,
            backend_key: None,
            carriers_table: default_carriers_table(),
            profiles_table: default_profiles_table(),
            email_domain: default_email_domain(),
            request_timeout_secs: default_timeout_secs(),
            items_per_page: default_items_per_page(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("carrier-dashboard");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from a specific file, or create default if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)).into())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `CARRIER_BACKEND_URL` / `CARRIER_BACKEND_KEY` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any name lookup; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());
        if let Some(url) = value(ENV_BACKEND_URL) {
            self.backend_url = Some(url);
        }
        if let Some(key) = value(ENV_BACKEND_KEY) {
            self.backend_key = Some(key);
        }
    }

    /// Request timeout as a duration (at least one second)
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Backend URL, or an error naming the missing setting
    pub fn backend_url(&self) -> Result<&str> {
        self.backend_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("backend_url").into())
    }

    /// Backend service key, or an error naming the missing setting
    pub fn backend_key(&self) -> Result<&str> {
        self.backend_key
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("backend_key").into())
    }

    /// Dataset URL, or an error naming the missing setting
    pub fn dataset_url(&self) -> Result<&str> {
        self.dataset_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing("dataset_url").into())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Carrier Dashboard Configuration")?;
        writeln!(f, "===============================")?;
        writeln!(f)?;
        writeln!(f, "Data source:     {}", self.data_source)?;
        writeln!(f, "Dataset path:    {}", self.dataset_path.display())?;
        writeln!(
            f,
            "Dataset URL:     {}",
            self.dataset_url.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            f,
            "Backend URL:     {}",
            self.backend_url.as_deref().unwrap_or("(not set)")
        )?;
        writeln!(
            f,
            "Backend key:     {}",
            if self.backend_key.is_some() { "(set)" } else { "(not set)" }
        )?;
        writeln!(f, "Carriers table:  {}", self.carriers_table)?;
        writeln!(f, "Profiles table:  {}", self.profiles_table)?;
        writeln!(f, "Email domain:    {}", self.email_domain)?;
        writeln!(f, "Timeout:         {}s", self.request_timeout_secs)?;
        writeln!(f, "Rows per page:   {}", self.items_per_page)?;
        writeln!(f, "Output format:   {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.items_per_page, 50);
        assert_eq!(config.email_domain, "carrier-data.com");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_source: DataSourceKind::Backend,
            backend_url: Some("https://example.supabase.co".to_string()),
            request_timeout_secs: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_source":"http","dataset_url":"https://x/c.csv"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_source, DataSourceKind::Http);
        assert_eq!(config.dataset_url().unwrap(), "https://x/c.csv");
        assert_eq!(config.profiles_table, "profiles");
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            carrier_types::Error::Config(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|name| match name {
            ENV_BACKEND_URL => Some("https://env.example".to_string()),
            ENV_BACKEND_KEY => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.backend_url().unwrap(), "https://env.example");
        assert!(config.backend_key().is_err());
    }

    #[test]
    fn test_display_hides_key() {
        let config = Config {
            backend_key: Some("super-secret".to_string()),
            ..Config::default()
        };
        let shown = config.to_string();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("Backend key:     (set)"));
    }

    #[test]
    fn test_timeout_floor() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
