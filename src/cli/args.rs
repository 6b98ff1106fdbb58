// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use crate::config::{
    default_database_path, Settings, DEFAULT_API_URL, DEFAULT_DISCORD_URL, DEFAULT_PROCESS_TYPE,
    DEFAULT_TIMEOUT_SECS,
};
use crate::Result;
use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Single-dash spellings accepted for compatibility with existing scheduler entries
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-on", "--on"),
    ("-off", "--off"),
    ("-status", "--status"),
    ("-database", "--database"),
];

#[derive(Parser, Debug)]
#[command(name = "herokron")]
#[command(about = "Turn Heroku apps on and off, with optional Discord notifications")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(false)
        .args([
            "add_key",
            "remove_key",
            "set_webhook",
            "remove_webhook",
            "set_color",
            "sync_database",
            "on",
            "off",
            "status",
            "database",
        ])
))]
pub struct Cli {
    /// Store a Heroku API key along with the apps it can manage
    #[arg(long, value_name = "KEY")]
    pub add_key: Option<String>,

    /// Forget a stored Heroku API key
    #[arg(long, value_name = "KEY")]
    pub remove_key: Option<String>,

    /// Set the Discord webhook that receives state changes
    #[arg(long, value_name = "URL")]
    pub set_webhook: Option<String>,

    /// Stop sending state changes to a webhook
    #[arg(long)]
    pub remove_webhook: bool,

    /// Set the embed color, as #RRGGBB or a base 10 integer
    #[arg(long, value_name = "COLOR")]
    pub set_color: Option<String>,

    /// Refresh the app list of every stored key
    #[arg(long)]
    pub sync_database: bool,

    /// Turn an app on
    #[arg(long, value_name = "APP")]
    pub on: Option<String>,

    /// Turn an app off
    #[arg(long, value_name = "APP")]
    pub off: Option<String>,

    /// Show whether an app is on
    #[arg(long, value_name = "APP")]
    pub status: Option<String>,

    /// Print the local store
    #[arg(long)]
    pub database: bool,

    /// API key to use instead of the stored owner of the app
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Don't send a webhook notification for this run
    #[arg(long)]
    pub no_notify: bool,

    /// Formation process type to scale
    #[arg(long, env = "HEROKRON_PROCESS_TYPE", default_value = DEFAULT_PROCESS_TYPE)]
    pub process_type: String,

    /// Location of the store (defaults to the platform data directory)
    #[arg(long, env = "HEROKRON_DATABASE", value_name = "PATH")]
    pub database_path: Option<PathBuf>,

    /// Heroku Platform API base URL
    #[arg(long, env = "HEROKRON_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,

    /// Discord base URL that webhook notifications are posted to
    #[arg(long, env = "HEROKRON_DISCORD_URL", default_value = DEFAULT_DISCORD_URL, hide = true)]
    pub discord_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HEROKRON_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// The one thing an invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddKey(String),
    RemoveKey(String),
    SetWebhook(String),
    RemoveWebhook,
    SetColor(String),
    SyncDatabase,
    On(String),
    Off(String),
    Status(String),
    Database,
}

impl Action {
    /// Flag name, for messages that must not echo keys or URLs
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddKey(_) => "--add-key",
            Action::RemoveKey(_) => "--remove-key",
            Action::SetWebhook(_) => "--set-webhook",
            Action::RemoveWebhook => "--remove-webhook",
            Action::SetColor(_) => "--set-color",
            Action::SyncDatabase => "--sync-database",
            Action::On(_) => "--on",
            Action::Off(_) => "--off",
            Action::Status(_) => "--status",
            Action::Database => "--database",
        }
    }
}

impl Cli {
    /// Parse from the process arguments, accepting legacy single-dash flags
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// The selected action
    pub fn action(&self) -> Result<Action> {
        let action = if let Some(key) = &self.add_key {
            Action::AddKey(key.clone())
        } else if let Some(key) = &self.remove_key {
            Action::RemoveKey(key.clone())
        } else if let Some(url) = &self.set_webhook {
            Action::SetWebhook(url.clone())
        } else if self.remove_webhook {
            Action::RemoveWebhook
        } else if let Some(color) = &self.set_color {
            Action::SetColor(color.clone())
        } else if self.sync_database {
            Action::SyncDatabase
        } else if let Some(app) = &self.on {
            Action::On(app.clone())
        } else if let Some(app) = &self.off {
            Action::Off(app.clone())
        } else if let Some(app) = &self.status {
            Action::Status(app.clone())
        } else if self.database {
            Action::Database
        } else {
            return Err(crate::error::HerokronError::config("No action given"));
        };

        Ok(action)
    }

    /// Build runtime settings from the flags and environment
    pub fn settings(&self) -> Result<Settings> {
        let database_path = match &self.database_path {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };

        Ok(Settings::new(database_path)
            .with_api_url(&self.api_url)?
            .with_discord_url(&self.discord_url)?
            .with_process_type(self.process_type.as_str())?
            .with_timeout_secs(self.timeout)?
            .with_notify(!self.no_notify))
    }
}

/// Rewrite `-on`, `-off`, `-status` and `-database` to their `--` forms
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let replacement = arg.to_str().and_then(|s| {
                LEGACY_FLAGS
                    .iter()
                    .find(|(legacy, _)| *legacy == s)
                    .map(|(_, modern)| *modern)
            });
            match replacement {
                Some(modern) => OsString::from(modern),
                None => arg,
            }
        })
        .collect()
}
