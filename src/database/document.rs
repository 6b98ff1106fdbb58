// file: src/database/document.rs
// version: 1.0.0
// guid: 098045f1-da9e-405f-a5ea-5a30110b1929

//! On-disk layout of the store

use crate::config::DEFAULT_DISCORD_URL;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heroku lavender, from https://brand.heroku.com
pub const DEFAULT_COLOR: u32 = 0x7673C0;

/// Largest value an embed color may take (`#FFFFFF`)
pub const MAX_COLOR: u32 = 0xFFFFFF;

/// Every Heroku API key is exactly this many characters long
pub const API_KEY_LENGTH: usize = 36;

/// The whole persisted store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// One entry per Heroku account, in insertion order
    pub keys: Vec<KeyEntry>,
    /// Embed color for webhook messages
    pub color: u32,
    /// Discord webhook credentials; serialized as `{}` when unset
    pub webhook: WebhookConfig,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            color: DEFAULT_COLOR,
            webhook: WebhookConfig::default(),
        }
    }
}

impl StoreDocument {
    /// Parse a document, returning `None` for anything that should be reset
    pub fn parse(content: &str) -> Option<Self> {
        let document: Self = serde_json::from_str(content).ok()?;
        document.is_valid().then_some(document)
    }

    /// Structural checks beyond what deserialization already enforces
    pub fn is_valid(&self) -> bool {
        self.color <= MAX_COLOR
            && self
                .keys
                .iter()
                .all(|entry| entry.key.chars().count() == API_KEY_LENGTH)
    }
}

/// One API key and the apps it manages
///
/// Stored as a single-entry map, `{"<key>": ["app", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct KeyEntry {
    pub key: String,
    pub apps: Vec<String>,
}

impl KeyEntry {
    pub fn new(key: impl Into<String>, apps: Vec<String>) -> Self {
        Self {
            key: key.into(),
            apps,
        }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeyEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, Vec<String>>) -> std::result::Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "key entry must hold exactly one API key, found {}",
                map.len()
            ));
        }

        let (key, apps) = map
            .into_iter()
            .next()
            .ok_or_else(|| "empty key entry".to_string())?;
        Ok(Self { key, apps })
    }
}

impl From<KeyEntry> for BTreeMap<String, Vec<String>> {
    fn from(entry: KeyEntry) -> Self {
        BTreeMap::from([(entry.key, entry.apps)])
    }
}

/// Discord webhook credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl WebhookConfig {
    /// Execution URL, present only when both parts are stored
    pub fn url(&self) -> Option<String> {
        self.url_on(DEFAULT_DISCORD_URL)
    }

    /// Execution URL under another Discord base URL
    pub fn url_on(&self, base: &str) -> Option<String> {
        match (&self.id, &self.token) {
            (Some(id), Some(token)) => Some(format!(
                "{}/api/webhooks/{}/{}",
                base.trim_end_matches('/'),
                id,
                token
            )),
            _ => None,
        }
    }
}

/// Reject keys that cannot possibly be Heroku API keys
pub fn validate_api_key(key: &str) -> Result<()> {
    let len = key.chars().count();
    if len != API_KEY_LENGTH {
        return Err(crate::error::HerokronError::invalid_api_key(format!(
            "expected {} characters, got {}",
            API_KEY_LENGTH, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "01234567-89ab-cdef-0123-456789abcdef";

    #[test]
    fn test_default_document_shape() {
        let json = serde_json::to_value(StoreDocument::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"keys": [], "color": 7762880, "webhook": {}})
        );
    }

    #[test]
    fn test_parse_valid_document() {
        let content = format!(
            r#"{{"keys": [{{"{}": ["app-a", "app-b"]}}], "color": 255, "webhook": {{"id": "1", "token": "t"}}}}"#,
            KEY
        );
        let document = StoreDocument::parse(&content).unwrap();
        assert_eq!(document.keys, vec![KeyEntry::new(KEY, vec!["app-a".into(), "app-b".into()])]);
        assert_eq!(document.color, 255);
        assert_eq!(
            document.webhook.url().as_deref(),
            Some("https://discord.com/api/webhooks/1/t")
        );
    }

    #[test]
    fn test_parse_rejects_outdated_documents() {
        // missing field
        assert!(StoreDocument::parse(r#"{"keys": [], "color": 1}"#).is_none());
        // wrong types
        assert!(StoreDocument::parse(r#"{"keys": {}, "color": 1, "webhook": {}}"#).is_none());
        assert!(StoreDocument::parse(r#"{"keys": [], "color": "red", "webhook": {}}"#).is_none());
        assert!(StoreDocument::parse(r#"{"keys": [], "color": 1, "webhook": "x"}"#).is_none());
        // short key
        assert!(
            StoreDocument::parse(r#"{"keys": [{"short": []}], "color": 1, "webhook": {}}"#)
                .is_none()
        );
        // color out of range
        assert!(StoreDocument::parse(r#"{"keys": [], "color": 16777216, "webhook": {}}"#).is_none());
        // not JSON at all
        assert!(StoreDocument::parse("not json").is_none());
    }

    #[test]
    fn test_key_entry_must_hold_one_key() {
        let content = format!(
            r#"{{"keys": [{{"{}": [], "{}": []}}], "color": 1, "webhook": {{}}}}"#,
            KEY,
            KEY.replace('0', "f")
        );
        assert!(StoreDocument::parse(&content).is_none());
    }

    #[test]
    fn test_webhook_url_requires_both_parts() {
        // Arrange
        let partial = WebhookConfig {
            id: Some("123".into()),
            token: None,
        };

        // Act & Assert
        assert!(partial.url().is_none());
        assert!(partial.url_on("http://localhost:8080").is_none());
        assert!(WebhookConfig::default().url().is_none());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key(KEY).is_ok());
        assert!(validate_api_key("too-short").is_err());
        assert!(validate_api_key(&format!("{}0", KEY)).is_err());
    }
}
