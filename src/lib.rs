// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # Herokron
//!
//! Turn Heroku apps on and off by scaling a formation process type, query
//! whether they are running, and report state changes to a Discord webhook.
//!
//! API keys, the webhook and the embed color live in a small JSON store in
//! the platform data directory (see [`config::default_database_path`]).

pub mod cli;
pub mod config;
pub mod control;
pub mod database;
pub mod error;
pub mod heroku;
pub mod logging;
pub mod notifier;

pub use control::{AppStatus, Controller, SwitchOutcome};
pub use database::Database;
pub use error::{HerokronError, Result};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
