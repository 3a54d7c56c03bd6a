//! Seminar CLI entry point.

use anyhow::Result;
use clap::Parser;
use seminar::cli::{commands, Cli, Commands};
use seminar::config::Settings;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging; -v overrides the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("seminar={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Ensure data directory exists
    std::fs::create_dir_all(settings.data_dir())?;

    // Execute command
    let config_path = cli.config.as_deref().map(Path::new);

    match &cli.command {
        Commands::Present { topic, flags } => {
            commands::run_present(topic, *flags, settings).await?;
        }

        Commands::Listen { flags } => {
            commands::run_listen(*flags, settings).await?;
        }

        Commands::Cache { action } => {
            commands::run_cache(action, settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
