// file: src/control.rs
// version: 1.0.0
// guid: 99b53819-c265-412e-b39b-4684ae27e731

//! Turning apps on and off, and the account bookkeeping behind it
//!
//! Every app operation resolves the API key that owns the app from the store
//! (or uses an explicit key), talks to the Heroku Platform API, and reports
//! actual state changes to the configured webhook.

use crate::config::Settings;
use crate::database::{validate_api_key, Database};
use crate::heroku::HerokuClient;
use crate::notifier::StateNotifier;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Result of `--on` / `--off`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchOutcome {
    pub app: String,
    pub online: bool,
    /// Whether the formation had to be scaled to reach the requested state
    pub updated: bool,
}

/// Result of `--status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStatus {
    pub app: String,
    pub online: bool,
}

/// Drives the Heroku API on behalf of the stored accounts
pub struct Controller {
    database: Database,
    settings: Settings,
}

impl Controller {
    pub fn new(database: Database, settings: Settings) -> Self {
        Self { database, settings }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    /// Scale the app's process type up to one dyno if it is offline
    pub async fn on(&mut self, app: &str, key: Option<&str>) -> Result<SwitchOutcome> {
        self.switch(app, key, true).await
    }

    /// Scale the app's process type down to zero if it is online
    pub async fn off(&mut self, app: &str, key: Option<&str>) -> Result<SwitchOutcome> {
        self.switch(app, key, false).await
    }

    /// Report whether the app's process type is running
    pub async fn status(&mut self, app: &str, key: Option<&str>) -> Result<AppStatus> {
        let client = self.client_for(app, key).await?;
        let formation = client.formation(app, &self.settings.process_type).await?;

        Ok(AppStatus {
            app: app.to_string(),
            online: formation.is_online(),
        })
    }

    /// Validate a key against the API and store it with its apps
    pub async fn add_key(&mut self, key: &str) -> Result<Vec<String>> {
        validate_api_key(key)?;

        if let Some(apps) = self.database.get_apps(key) {
            debug!("API key already stored");
            return Ok(apps.to_vec());
        }

        let apps = HerokuClient::new(key, &self.settings)?.app_names().await?;
        info!("Adding API key with {} app(s)", apps.len());
        self.database.add_key(key, apps.clone())?;
        Ok(apps)
    }

    /// Refresh the stored app list of one key
    pub async fn sync_key(&mut self, key: &str) -> Result<Vec<String>> {
        if !self.database.key_exists(key) {
            return Err(crate::error::HerokronError::database("API key is not stored"));
        }

        let apps = HerokuClient::new(key, &self.settings)?.app_names().await?;
        self.database.set_apps(key, apps.clone())?;
        Ok(apps)
    }

    /// Refresh the app lists of every stored key
    pub async fn sync_database(&mut self) -> Result<()> {
        let keys: Vec<String> = self.database.keys().into_iter().map(str::to_string).collect();
        for key in &keys {
            self.sync_key(key).await?;
        }
        info!("Synced {} API key(s)", keys.len());
        Ok(())
    }

    async fn switch(&mut self, app: &str, key: Option<&str>, online: bool) -> Result<SwitchOutcome> {
        let client = self.client_for(app, key).await?;
        let process_type = self.settings.process_type.as_str();

        let current = client.formation(app, process_type).await?;
        if current.is_online() == online {
            debug!("{} already {}", app, state_name(online));
            return Ok(SwitchOutcome {
                app: app.to_string(),
                online,
                updated: false,
            });
        }

        let scaled = client.scale(app, process_type, u32::from(online)).await?;
        info!(
            "Scaled {} {} from {} to {}",
            app, process_type, current.quantity, scaled.quantity
        );

        let outcome = SwitchOutcome {
            app: app.to_string(),
            online: scaled.is_online(),
            updated: true,
        };
        self.notify(app, outcome.online).await;
        Ok(outcome)
    }

    async fn client_for(&mut self, app: &str, key: Option<&str>) -> Result<HerokuClient> {
        let key = self.resolve_key(app, key).await?;
        HerokuClient::new(key, &self.settings)
    }

    /// Explicit key, else the stored owner, else the stored owner after a sync
    async fn resolve_key(&mut self, app: &str, explicit: Option<&str>) -> Result<String> {
        if let Some(key) = explicit {
            validate_api_key(key)?;
            return Ok(key.to_string());
        }

        if let Some(key) = self.database.get_key(app) {
            return Ok(key.to_string());
        }

        if self.database.keys().is_empty() {
            return Err(crate::error::HerokronError::unknown_app(app));
        }

        info!("{} not found in store, syncing app lists", app);
        self.sync_database().await?;

        self.database
            .get_key(app)
            .map(str::to_string)
            .ok_or_else(|| crate::error::HerokronError::unknown_app(app))
    }

    /// Webhook failures never undo a successful state change
    async fn notify(&self, app: &str, online: bool) {
        if !self.settings.notify {
            debug!("Notifications disabled for this run");
            return;
        }

        let notifier = match StateNotifier::new(
            self.database
                .webhook_url_on(self.settings.discord_url.as_str()),
            self.database.color(),
            &self.settings,
        ) {
            Ok(notifier) => notifier,
            Err(e) => {
                warn!("Could not set up webhook notifier: {}", e);
                return;
            }
        };

        if !notifier.is_enabled() {
            return;
        }

        if let Err(e) = notifier.notify_state_change(app, online).await {
            warn!("Failed to notify webhook about {}: {}", app, e);
        }
    }
}

fn state_name(online: bool) -> &'static str {
    if online {
        "online"
    } else {
        "offline"
    }
}
