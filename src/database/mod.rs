// file: src/database/mod.rs
// version: 1.0.0
// guid: 00562b21-972b-4d0b-afdf-416c1f5af920

//! Local JSON store for API keys, the webhook and the embed color
//!
//! The store is loaded on every invocation and rewritten in full after each
//! mutation. Documents left behind by older releases, or otherwise malformed,
//! are replaced with an empty store rather than half-read.

pub mod color;
pub mod document;
pub mod webhook;

pub use color::parse_color;
pub use document::{validate_api_key, KeyEntry, StoreDocument, WebhookConfig, DEFAULT_COLOR};
pub use webhook::parse_webhook_url;

use crate::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Handle to the persisted store
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    document: StoreDocument,
}

impl Database {
    /// Open the store at `path`, creating or resetting it as needed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                crate::error::HerokronError::database(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let document = match fs::read(&path) {
            Ok(bytes) => match std::str::from_utf8(&bytes)
                .ok()
                .and_then(StoreDocument::parse)
            {
                Some(document) => {
                    debug!("Loaded store from {}", path.display());
                    return Ok(Self { path, document });
                }
                None => {
                    warn!(
                        "Store at {} is outdated or malformed, resetting it",
                        path.display()
                    );
                    StoreDocument::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Creating new store at {}", path.display());
                StoreDocument::default()
            }
            Err(e) => return Err(e.into()),
        };

        let database = Self { path, document };
        database.dump()?;
        Ok(database)
    }

    /// Location of the store on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full document, as printed by `--database`
    pub fn document(&self) -> &StoreDocument {
        &self.document
    }

    /// Write the store to disk
    pub fn dump(&self) -> Result<()> {
        let json = serde_json::to_string(&self.document)?;
        fs::write(&self.path, json).map_err(|e| {
            crate::error::HerokronError::database(format!(
                "Failed to write store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Wrote store to {}", self.path.display());
        Ok(())
    }

    /// All stored API keys, in insertion order
    pub fn keys(&self) -> Vec<&str> {
        self.document.keys.iter().map(|e| e.key.as_str()).collect()
    }

    /// Every app across every key
    pub fn apps(&self) -> Vec<&str> {
        self.document
            .keys
            .iter()
            .flat_map(|e| e.apps.iter().map(String::as_str))
            .collect()
    }

    pub fn color(&self) -> u32 {
        self.document.color
    }

    /// Discord execution URL, when a webhook is configured
    pub fn webhook_url(&self) -> Option<String> {
        self.document.webhook.url()
    }

    /// Execution URL of the configured webhook on another Discord host
    pub fn webhook_url_on(&self, base: &str) -> Option<String> {
        self.document.webhook.url_on(base)
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// First key whose app list contains `app`
    pub fn get_key(&self, app: &str) -> Option<&str> {
        self.document
            .keys
            .iter()
            .find(|e| e.apps.iter().any(|a| a == app))
            .map(|e| e.key.as_str())
    }

    /// Apps stored for `key`
    pub fn get_apps(&self, key: &str) -> Option<&[String]> {
        self.position(key)
            .map(|i| self.document.keys[i].apps.as_slice())
    }

    /// Store a new key with its apps; returns `false` if the key was already present
    pub fn add_key(&mut self, key: &str, apps: Vec<String>) -> Result<bool> {
        validate_api_key(key)?;
        if self.key_exists(key) {
            debug!("API key already stored, leaving it untouched");
            return Ok(false);
        }

        self.document.keys.push(KeyEntry::new(key, apps));
        self.dump()?;
        Ok(true)
    }

    /// Delete a key; returns whether anything was removed
    pub fn remove_key(&mut self, key: &str) -> Result<bool> {
        match self.position(key) {
            Some(index) => {
                self.document.keys.remove(index);
                self.dump()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the app list of an existing key
    pub fn set_apps(&mut self, key: &str, apps: Vec<String>) -> Result<()> {
        let index = self.position(key).ok_or_else(|| {
            crate::error::HerokronError::database("API key is not stored")
        })?;

        self.document.keys[index].apps = apps;
        self.dump()
    }

    /// Store the webhook from a Discord webhook URL
    pub fn set_webhook(&mut self, url: &str) -> Result<()> {
        self.document.webhook = parse_webhook_url(url)?;
        self.dump()
    }

    /// Forget the configured webhook
    pub fn clear_webhook(&mut self) -> Result<()> {
        self.document.webhook = WebhookConfig::default();
        self.dump()
    }

    /// Store the embed color; returns the parsed value
    pub fn set_color(&mut self, color: &str) -> Result<u32> {
        let value = parse_color(color)?;
        self.document.color = value;
        self.dump()?;
        Ok(value)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.document.keys.iter().position(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const KEY_A: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
    const KEY_B: &str = "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb";

    fn open_temp() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("nested").join("db.json")).unwrap();
        (dir, db)
    }

    #[test]
    fn test_open_creates_default_store() {
        let (_dir, db) = open_temp();
        assert!(db.path().is_file());
        assert_eq!(db.document(), &StoreDocument::default());
        assert_eq!(db.color(), DEFAULT_COLOR);
        assert!(db.webhook_url().is_none());
    }

    #[test]
    fn test_open_resets_malformed_store() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, r#"{"keys": {"old": "layout"}}"#).unwrap();

        // Act
        let db = Database::open(&path).unwrap();

        // Assert
        assert_eq!(db.document(), &StoreDocument::default());
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["color"], 7762880);
    }

    #[test]
    fn test_open_resets_store_that_is_not_utf8() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        // Act
        let db = Database::open(&path).unwrap();

        // Assert
        assert_eq!(db.document(), &StoreDocument::default());
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["keys"], serde_json::json!([]));
    }

    #[test]
    fn test_keys_and_apps_persist_across_opens() {
        let (dir, mut db) = open_temp();
        assert!(db.add_key(KEY_A, vec!["app-1".into(), "app-2".into()]).unwrap());
        assert!(db.add_key(KEY_B, vec!["app-3".into()]).unwrap());

        let reopened = Database::open(dir.path().join("nested").join("db.json")).unwrap();
        assert_eq!(reopened.keys(), vec![KEY_A, KEY_B]);
        assert_eq!(reopened.apps(), vec!["app-1", "app-2", "app-3"]);
        assert_eq!(reopened.get_key("app-3"), Some(KEY_B));
        assert_eq!(reopened.get_key("missing"), None);
        assert_eq!(
            reopened.get_apps(KEY_A),
            Some(&["app-1".to_string(), "app-2".to_string()][..])
        );
    }

    #[test]
    fn test_add_existing_key_is_noop() {
        let (_dir, mut db) = open_temp();
        db.add_key(KEY_A, vec!["app-1".into()]).unwrap();
        assert!(!db.add_key(KEY_A, vec!["other".into()]).unwrap());
        assert_eq!(db.apps(), vec!["app-1"]);
    }

    #[test]
    fn test_add_key_rejects_malformed_key() {
        let (_dir, mut db) = open_temp();
        assert!(db.add_key("nope", vec![]).is_err());
        assert!(db.keys().is_empty());
    }

    #[test]
    fn test_remove_key() {
        let (_dir, mut db) = open_temp();
        db.add_key(KEY_A, vec![]).unwrap();
        db.add_key(KEY_B, vec![]).unwrap();

        assert!(db.remove_key(KEY_A).unwrap());
        assert!(!db.remove_key(KEY_A).unwrap());
        assert_eq!(db.keys(), vec![KEY_B]);
    }

    #[test]
    fn test_set_apps() {
        let (_dir, mut db) = open_temp();
        db.add_key(KEY_A, vec!["old".into()]).unwrap();
        db.set_apps(KEY_A, vec!["new".into()]).unwrap();
        assert_eq!(db.apps(), vec!["new"]);
        assert!(db.set_apps(KEY_B, vec![]).is_err());
    }

    #[test]
    fn test_webhook_round_trip() {
        // Arrange
        let (dir, mut db) = open_temp();

        // Act
        db.set_webhook("https://discord.com/api/webhooks/42/secret-token")
            .unwrap();
        let reopened = Database::open(dir.path().join("nested").join("db.json")).unwrap();

        // Assert
        assert_eq!(
            reopened.webhook_url().as_deref(),
            Some("https://discord.com/api/webhooks/42/secret-token")
        );
        assert_eq!(
            reopened.webhook_url_on("http://127.0.0.1:4000/").as_deref(),
            Some("http://127.0.0.1:4000/api/webhooks/42/secret-token")
        );
    }

    #[test]
    fn test_invalid_webhook_leaves_store_unchanged() {
        let (_dir, mut db) = open_temp();
        db.set_webhook("https://discord.com/api/webhooks/42/secret")
            .unwrap();
        assert!(db.set_webhook("https://example.com/hook").is_err());
        assert_eq!(
            db.webhook_url().as_deref(),
            Some("https://discord.com/api/webhooks/42/secret")
        );

        db.clear_webhook().unwrap();
        assert!(db.webhook_url().is_none());
    }

    #[test]
    fn test_color_round_trip() {
        let (dir, mut db) = open_temp();
        assert_eq!(db.set_color("#FFFFFF").unwrap(), 16777215);
        assert!(db.set_color("16777216").is_err());

        let reopened = Database::open(dir.path().join("nested").join("db.json")).unwrap();
        assert_eq!(reopened.color(), 16777215);
    }
}
