// file: src/heroku/types.rs
// version: 1.0.0
// guid: c2f37397-f4d3-434b-9909-cf0d89c87542

//! Heroku Platform API payloads

use serde::{Deserialize, Serialize};

/// An app, as returned by `GET /apps`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

/// One process type of an app's formation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(rename = "type")]
    pub process_type: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
}

impl Formation {
    /// A formation is online while at least one dyno is scaled up
    pub fn is_online(&self) -> bool {
        self.quantity > 0
    }
}

/// Body of `PATCH /apps/{app}/formation/{type}`
#[derive(Debug, Clone, Serialize)]
pub struct FormationUpdate {
    pub quantity: u32,
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub id: String,
    pub message: String,
}
