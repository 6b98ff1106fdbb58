// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! Herokron - Main entry point

use anyhow::Context;
use herokron::{
    cli::{execute, Cli},
    logging::logger,
};
use tokio::signal;
use tracing::{debug, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_normalized();

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet)?;

    let action = cli.action()?;
    let settings = cli.settings().context("Failed to resolve settings")?;
    debug!(
        "Using store {} and API {}",
        settings.database_path.display(),
        settings.api_url
    );

    let name = action.name();
    let command_future = async {
        execute(action, settings, cli.key.clone())
            .await
            .with_context(|| format!("{} failed", name))
    };

    // A scheduler may kill us mid-request; exit the way shells expect
    let output = tokio::select! {
        result = command_future => result?,
        _ = signal::ctrl_c() => {
            warn!("Interrupted, exiting before the command completed");
            std::process::exit(130);
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
