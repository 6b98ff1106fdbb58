// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI
//!
//! Each command returns the JSON value the binary prints on stdout: store
//! commands return the whole store, app commands return their outcome.

use super::args::Action;
use crate::{
    config::Settings, control::Controller, database::Database,
    logging::logger::with_async_operation_span, Result,
};
use serde_json::Value;
use tracing::info;

/// Run one action against the store at `settings.database_path`
pub async fn execute(action: Action, settings: Settings, key: Option<String>) -> Result<Value> {
    let database = Database::open(&settings.database_path)?;
    let mut controller = Controller::new(database, settings);
    let key = key.as_deref();

    match action {
        Action::AddKey(api_key) => add_key_command(&mut controller, &api_key).await,
        Action::RemoveKey(api_key) => remove_key_command(&mut controller, &api_key),
        Action::SetWebhook(url) => set_webhook_command(&mut controller, &url),
        Action::RemoveWebhook => remove_webhook_command(&mut controller),
        Action::SetColor(color) => set_color_command(&mut controller, &color),
        Action::SyncDatabase => sync_database_command(&mut controller).await,
        Action::On(app) => on_command(&mut controller, &app, key).await,
        Action::Off(app) => off_command(&mut controller, &app, key).await,
        Action::Status(app) => status_command(&mut controller, &app, key).await,
        Action::Database => database_command(&controller),
    }
}

/// Store a key and the apps it manages
pub async fn add_key_command(controller: &mut Controller, key: &str) -> Result<Value> {
    let apps = controller.add_key(key).await?;
    info!("API key manages: {}", apps.join(", "));
    database_command(controller)
}

/// Forget a key
pub fn remove_key_command(controller: &mut Controller, key: &str) -> Result<Value> {
    if !controller.database_mut().remove_key(key)? {
        info!("API key was not stored, nothing removed");
    }
    database_command(controller)
}

/// Set the Discord webhook
pub fn set_webhook_command(controller: &mut Controller, url: &str) -> Result<Value> {
    controller.database_mut().set_webhook(url)?;
    database_command(controller)
}

/// Clear the Discord webhook
pub fn remove_webhook_command(controller: &mut Controller) -> Result<Value> {
    controller.database_mut().clear_webhook()?;
    database_command(controller)
}

/// Set the embed color
pub fn set_color_command(controller: &mut Controller, color: &str) -> Result<Value> {
    let value = controller.database_mut().set_color(color)?;
    info!("Embed color set to #{:06X}", value);
    database_command(controller)
}

/// Refresh every key's app list
pub async fn sync_database_command(controller: &mut Controller) -> Result<Value> {
    controller.sync_database().await?;
    database_command(controller)
}

/// Turn an app on
pub async fn on_command(controller: &mut Controller, app: &str, key: Option<&str>) -> Result<Value> {
    let outcome = with_async_operation_span("on", app, move || controller.on(app, key)).await?;
    Ok(serde_json::to_value(outcome)?)
}

/// Turn an app off
pub async fn off_command(controller: &mut Controller, app: &str, key: Option<&str>) -> Result<Value> {
    let outcome = with_async_operation_span("off", app, move || controller.off(app, key)).await?;
    Ok(serde_json::to_value(outcome)?)
}

/// Query an app's state
pub async fn status_command(
    controller: &mut Controller,
    app: &str,
    key: Option<&str>,
) -> Result<Value> {
    let status = with_async_operation_span("status", app, move || controller.status(app, key)).await?;
    Ok(serde_json::to_value(status)?)
}

/// The whole store document
pub fn database_command(controller: &Controller) -> Result<Value> {
    Ok(serde_json::to_value(controller.database().document())?)
}
