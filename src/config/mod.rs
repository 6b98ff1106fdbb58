// file: src/config/mod.rs
// version: 2.0.0
// guid: a1b2c3d4-e5f6-7a8b-9c0d-1e2f3a4b5c6d

//! Runtime configuration for Herokron
//!
//! Settings are assembled from command line flags and `HEROKRON_*` environment
//! variables; the persisted store itself lives in [`crate::database`].

pub mod paths;

pub use paths::default_database_path;

use crate::Result;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Heroku Platform API base URL
pub const DEFAULT_API_URL: &str = "https://api.heroku.com";

/// Host that Discord webhook execution URLs are built on
pub const DEFAULT_DISCORD_URL: &str = "https://discord.com";

/// Process type scaled by `--on`/`--off` when none is given
pub const DEFAULT_PROCESS_TYPE: &str = "worker";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the JSON store
    pub database_path: PathBuf,
    /// Heroku Platform API base URL
    pub api_url: Url,
    /// Discord base URL for webhook notifications
    pub discord_url: Url,
    /// Formation process type to scale
    pub process_type: String,
    /// Timeout applied to every outbound request
    pub timeout: Duration,
    /// User agent sent with every outbound request
    pub user_agent: String,
    /// Whether state changes are reported to the webhook
    pub notify: bool,
}

impl Settings {
    /// Create settings with defaults for everything but the store path
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            discord_url: Url::parse(DEFAULT_DISCORD_URL).expect("default Discord URL is valid"),
            process_type: DEFAULT_PROCESS_TYPE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("herokron/{}", crate::VERSION),
            notify: true,
        }
    }

    /// Override the API base URL
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = parse_base_url("API", api_url)?;
        Ok(self)
    }

    /// Override the Discord base URL that webhooks are posted to
    pub fn with_discord_url(mut self, discord_url: &str) -> Result<Self> {
        self.discord_url = parse_base_url("Discord", discord_url)?;
        Ok(self)
    }

    /// Override the process type
    pub fn with_process_type(mut self, process_type: impl Into<String>) -> Result<Self> {
        let process_type = process_type.into();
        if process_type.trim().is_empty() {
            return Err(crate::error::HerokronError::config(
                "Process type cannot be empty",
            ));
        }
        self.process_type = process_type;
        Ok(self)
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(crate::error::HerokronError::config(
                "Timeout must be at least one second",
            ));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Enable or disable webhook notifications
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }
}

fn parse_base_url(label: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        crate::error::HerokronError::config(format!("Invalid {} URL {}: {}", label, raw, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(crate::error::HerokronError::config(format!(
            "Unsupported {} URL scheme: {}",
            label, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new("/tmp/db.json");
        assert_eq!(settings.api_url.as_str(), "https://api.heroku.com/");
        assert_eq!(settings.discord_url.as_str(), "https://discord.com/");
        assert_eq!(settings.process_type, "worker");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("herokron/"));
        assert!(settings.notify);
    }

    #[test]
    fn test_with_api_url() {
        let settings = Settings::new("/tmp/db.json")
            .with_api_url("http://127.0.0.1:8080")
            .unwrap();
        assert_eq!(settings.api_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_with_discord_url() {
        // Arrange
        let settings = Settings::new("/tmp/db.json");

        // Act
        let settings = settings.with_discord_url("http://127.0.0.1:4000").unwrap();

        // Assert
        assert_eq!(settings.discord_url.as_str(), "http://127.0.0.1:4000/");
        assert!(Settings::new("/tmp/db.json")
            .with_discord_url("file:///tmp/hook")
            .is_err());
    }

    #[test]
    fn test_rejects_bad_api_url() {
        assert!(Settings::new("/tmp/db.json").with_api_url("not a url").is_err());
        assert!(Settings::new("/tmp/db.json")
            .with_api_url("ftp://api.heroku.com")
            .is_err());
    }

    #[test]
    fn test_rejects_empty_process_type_and_zero_timeout() {
        assert!(Settings::new("/tmp/db.json").with_process_type("  ").is_err());
        assert!(Settings::new("/tmp/db.json").with_timeout_secs(0).is_err());
    }
}
