//! Configuration Management
//!
//! Handles persistent configuration storage for satctl, and resolves the
//! connection settings a client is built from.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const ENV_URL: &str = "SATELLITE_URL";
pub const ENV_USERNAME: &str = "SATELLITE_USERNAME";
pub const ENV_PASSWORD: &str = "SATELLITE_PASSWORD";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User configuration
///
/// The password is never written to disk; it is read from `SATELLITE_PASSWORD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Satellite server URL, e.g. `https://satellite.example.com`
    #[serde(default)]
    pub url: Option<String>,
    /// Username for HTTP basic authentication
    #[serde(default)]
    pub username: Option<String>,
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings for one server connection
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: bool,
    pub timeout: Duration,
}

impl ConnectionSettings {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
            insecure: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }
}

/// Values given on the command line, highest precedence
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub insecure: bool,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("satctl").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective server URL (CLI > env > config)
    pub fn effective_url(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| env_non_empty(ENV_URL))
            .or_else(|| self.url.clone())
    }

    /// Get effective username (CLI > env > config)
    pub fn effective_username(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| env_non_empty(ENV_USERNAME))
            .or_else(|| self.username.clone())
    }

    /// Resolve everything a client needs to connect
    pub fn connection_settings(&self, overrides: &Overrides) -> Result<ConnectionSettings> {
        let raw_url = self.effective_url(overrides.url.as_deref()).with_context(|| {
            format!("No Satellite URL configured. Set {ENV_URL} or use --url")
        })?;
        let url = Url::parse(&raw_url).with_context(|| format!("Invalid Satellite URL: {raw_url}"))?;

        Ok(ConnectionSettings {
            url,
            username: self.effective_username(overrides.username.as_deref()),
            password: env_non_empty(ENV_PASSWORD),
            insecure: overrides.insecure || self.insecure,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }

    /// Apply the changes requested by `satctl configure`.
    /// Nothing is modified when the URL is invalid.
    pub fn apply(&mut self, changes: &ConfigChanges) -> Result<()> {
        if let Some(url) = &changes.url {
            Url::parse(url).with_context(|| format!("Invalid Satellite URL: {url}"))?;
            self.url = Some(url.clone());
        }
        if let Some(username) = &changes.username {
            self.username = Some(username.clone());
        }
        if let Some(insecure) = changes.insecure {
            self.insecure = insecure;
        }
        Ok(())
    }
}

/// Settings changed by `satctl configure`; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ConfigChanges {
    pub url: Option<String>,
    pub username: Option<String>,
    pub insecure: Option<bool>,
}

impl ConfigChanges {
    /// Turn the `--insecure` / `--secure` flag pair into a change
    pub fn tls_flags(insecure: bool, secure: bool) -> Result<Option<bool>> {
        match (insecure, secure) {
            (true, true) => bail!("--insecure and --secure cannot be used together"),
            (true, false) => Ok(Some(true)),
            (false, true) => Ok(Some(false)),
            (false, false) => Ok(None),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_url_wins() {
        let config = Config {
            url: Some("https://from-config.example.com".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.effective_url(Some("https://from-cli.example.com")).as_deref(),
            Some("https://from-cli.example.com")
        );
    }

    #[test]
    fn settings_from_cli_overrides() {
        let config = Config {
            timeout_secs: Some(5),
            ..Config::default()
        };
        let overrides = Overrides {
            url: Some("https://satellite.example.com".to_string()),
            username: Some("admin".to_string()),
            insecure: true,
        };
        let settings = config.connection_settings(&overrides).unwrap();
        assert_eq!(settings.url.as_str(), "https://satellite.example.com/");
        assert_eq!(settings.username.as_deref(), Some("admin"));
        assert!(settings.insecure);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_url_is_rejected() {
        let overrides = Overrides {
            url: Some("not a url".to_string()),
            ..Overrides::default()
        };
        assert!(Config::default().connection_settings(&overrides).is_err());
    }

    #[test]
    fn config_file_format() {
        let config: Config =
            serde_json::from_str(r#"{"url": "https://sat.example.com", "insecure": true}"#).unwrap();
        assert_eq!(config.url.as_deref(), Some("https://sat.example.com"));
        assert!(config.insecure);
        assert_eq!(config.username, None);
    }

    #[test]
    fn secure_turns_insecure_back_off() {
        let mut config = Config {
            insecure: true,
            ..Config::default()
        };
        let changes = ConfigChanges {
            insecure: ConfigChanges::tls_flags(false, true).unwrap(),
            ..ConfigChanges::default()
        };
        config.apply(&changes).unwrap();
        assert!(!config.insecure);
    }

    #[test]
    fn unset_flags_keep_stored_values() {
        let mut config = Config {
            url: Some("https://sat.example.com".to_string()),
            insecure: true,
            ..Config::default()
        };
        let changes = ConfigChanges {
            username: Some("admin".to_string()),
            insecure: ConfigChanges::tls_flags(false, false).unwrap(),
            ..ConfigChanges::default()
        };
        config.apply(&changes).unwrap();
        assert!(config.insecure);
        assert_eq!(config.url.as_deref(), Some("https://sat.example.com"));
        assert_eq!(config.username.as_deref(), Some("admin"));
    }

    #[test]
    fn conflicting_tls_flags_are_rejected() {
        assert!(ConfigChanges::tls_flags(true, true).is_err());
        assert_eq!(ConfigChanges::tls_flags(true, false).unwrap(), Some(true));
    }

    #[test]
    fn invalid_url_leaves_config_untouched() {
        let mut config = Config::default();
        let changes = ConfigChanges {
            url: Some("not a url".to_string()),
            insecure: Some(true),
            ..ConfigChanges::default()
        };
        assert!(config.apply(&changes).is_err());
        assert_eq!(config, Config::default());
    }
}
