// file: src/database/webhook.rs
// version: 1.0.0
// guid: 8ae3536a-2db8-49af-a7b2-733dcffcf67c

//! Discord webhook URL parsing

use super::document::WebhookConfig;
use crate::Result;
use regex::Regex;
use std::sync::OnceLock;

static WEBHOOK_REGEX: OnceLock<Regex> = OnceLock::new();

fn webhook_regex() -> &'static Regex {
    WEBHOOK_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?((canary|ptb)\.)?discord(?:app)?\.com/api/webhooks/(?P<id>[0-9]+)/(?P<token>[A-Za-z0-9\.\-_]+)/?$",
        )
        .expect("webhook pattern is valid")
    })
}

/// Extract the webhook id and token from a Discord webhook URL
///
/// Accepts the `canary.` and `ptb.` hosts, the legacy `discordapp.com`
/// domain, a missing scheme and a trailing slash.
pub fn parse_webhook_url(url: &str) -> Result<WebhookConfig> {
    let captures = webhook_regex().captures(url.trim()).ok_or_else(|| {
        crate::error::HerokronError::invalid_webhook(format!(
            "{} doesn't match the Discord webhook format",
            url
        ))
    })?;

    Ok(WebhookConfig {
        id: captures.name("id").map(|m| m.as_str().to_string()),
        token: captures.name("token").map(|m| m.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_url() {
        let config = parse_webhook_url("https://discord.com/api/webhooks/123456/abc.DEF-ghi_jkl").unwrap();
        assert_eq!(config.id.as_deref(), Some("123456"));
        assert_eq!(config.token.as_deref(), Some("abc.DEF-ghi_jkl"));
    }

    #[test]
    fn test_parse_url_variants() {
        for url in [
            "discord.com/api/webhooks/1/token",
            "http://discordapp.com/api/webhooks/1/token",
            "https://canary.discord.com/api/webhooks/1/token/",
            "https://ptb.discordapp.com/api/webhooks/1/token",
        ] {
            let config = parse_webhook_url(url).unwrap();
            assert_eq!(config.id.as_deref(), Some("1"), "{}", url);
            assert_eq!(config.token.as_deref(), Some("token"), "{}", url);
        }
    }

    #[test]
    fn test_rejects_non_discord_urls() {
        for url in [
            "https://example.com/api/webhooks/1/token",
            "https://discord.com/api/webhooks/abc/token",
            "https://discord.com/api/webhooks/1/",
            "https://discord.com/api/webhooks/1/tok/en",
            "",
        ] {
            assert!(parse_webhook_url(url).is_err(), "{}", url);
        }
    }
}
