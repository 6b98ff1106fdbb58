// file: src/notifier/mod.rs
// version: 2.0.0
// guid: j0k1l2m3-n4o5-6789-0123-def456789012

//! Discord webhook notifications for app state changes

use crate::config::Settings;
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Name shown as the webhook author
pub const WEBHOOK_USERNAME: &str = "Herokron";

/// Sends state change reports to a Discord webhook
pub struct StateNotifier {
    /// HTTP client for sending reports
    client: Client,

    /// Webhook URL to send reports to (optional)
    webhook_url: Option<String>,

    /// Embed sidebar color
    color: u32,
}

/// Top-level webhook execution payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub username: String,
    pub embeds: Vec<Embed>,
}

/// A single rich embed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    /// RFC 3339 timestamp shown in the embed footer
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl StateNotifier {
    /// Create a new notifier
    pub fn new(webhook_url: Option<String>, color: u32, settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            webhook_url,
            color,
        })
    }

    /// Whether a webhook is configured at all
    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Report that `app` is now online or offline
    pub async fn notify_state_change(&self, app: &str, online: bool) -> Result<()> {
        let message = self.build_message(app, online);
        self.send(&message).await
    }

    /// Build the embed describing a state change
    pub fn build_message(&self, app: &str, online: bool) -> WebhookMessage {
        let state = if online { "online" } else { "offline" };

        WebhookMessage {
            username: WEBHOOK_USERNAME.to_string(),
            embeds: vec![Embed {
                title: format!("{} is {}", app, state),
                description: format!("`{}` is now {}.", app, state),
                color: self.color,
                timestamp: chrono::Utc::now().to_rfc3339(),
                footer: EmbedFooter {
                    text: format!("Herokron v{}", crate::VERSION),
                },
            }],
        }
    }

    async fn send(&self, message: &WebhookMessage) -> Result<()> {
        let Some(webhook_url) = &self.webhook_url else {
            debug!("No webhook URL configured, skipping notification");
            return Ok(());
        };

        info!("Sending webhook notification: {}", message.embeds[0].title);

        let response = self.client.post(webhook_url).json(message).send().await?;

        let status = response.status();
        if status.is_success() {
            debug!("Webhook notification delivered ({})", status);
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Webhook rejected notification: {} {}", status, body);
            Err(crate::error::HerokronError::webhook(format!(
                "webhook returned {}",
                status
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(webhook_url: Option<&str>) -> StateNotifier {
        StateNotifier::new(
            webhook_url.map(str::to_string),
            0x7673C0,
            &Settings::new("/tmp/db.json"),
        )
        .unwrap()
    }

    #[test]
    fn test_build_online_message() {
        // Arrange
        let notifier = notifier(None);

        // Act
        let message = notifier.build_message("my-app", true);

        // Assert
        assert_eq!(message.username, "Herokron");
        assert_eq!(message.embeds.len(), 1);

        let embed = &message.embeds[0];
        assert_eq!(embed.title, "my-app is online");
        assert_eq!(embed.description, "`my-app` is now online.");
        assert_eq!(embed.color, 0x7673C0);
        assert!(chrono::DateTime::parse_from_rfc3339(&embed.timestamp).is_ok());
    }

    #[test]
    fn test_build_offline_message() {
        let message = notifier(None).build_message("my-app", false);
        assert_eq!(message.embeds[0].description, "`my-app` is now offline.");
    }

    #[tokio::test]
    async fn test_notify_without_webhook_is_noop() {
        // Arrange
        let notifier = notifier(None);

        // Act & Assert
        assert!(!notifier.is_enabled());
        assert!(notifier.notify_state_change("my-app", true).await.is_ok());
    }
}
