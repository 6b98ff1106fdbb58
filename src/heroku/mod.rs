// file: src/heroku/mod.rs
// version: 1.0.0
// guid: 71995cdf-c11a-4439-b440-fc468e5fa4a4

//! Heroku Platform API access

pub mod client;
pub mod types;

pub use client::HerokuClient;
pub use types::{App, Formation};
