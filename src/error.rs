// file: src/error.rs
// version: 3.0.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, HerokronError>;

/// Where users can look up their Heroku API keys.
pub const API_KEY_HELP_URL: &str = "https://dashboard.heroku.com/account";

/// Error types for Herokron
#[derive(Error, Debug)]
pub enum HerokronError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid Heroku API key: {}. View your API key(s) at: {}", .0, API_KEY_HELP_URL)]
    InvalidApiKey(String),

    #[error("Invalid webhook: {0}")]
    InvalidWebhook(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown app: {0} is not managed by any stored API key")]
    UnknownApp(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Heroku API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Webhook error: {0}")]
    Webhook(String),
}

impl HerokronError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a new invalid API key error
    pub fn invalid_api_key(msg: impl Into<String>) -> Self {
        Self::InvalidApiKey(msg.into())
    }

    /// Create a new invalid webhook error
    pub fn invalid_webhook(msg: impl Into<String>) -> Self {
        Self::InvalidWebhook(msg.into())
    }

    /// Create a new invalid color error
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    /// Create a new unknown app error
    pub fn unknown_app(app: impl Into<String>) -> Self {
        Self::UnknownApp(app.into())
    }

    /// Create a new not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new webhook delivery error
    pub fn webhook(msg: impl Into<String>) -> Self {
        Self::Webhook(msg.into())
    }
}
