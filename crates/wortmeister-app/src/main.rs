use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use wortmeister_core::{FileStorage, KeyValueStorage, LearnerStore};
use wortmeister_types::Level;

pub mod audio;
pub mod cli;
pub mod commands;
pub mod controller;
pub mod events;
pub mod profile;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = profile::load_config(cli.data_dir.as_deref())?;
    tracing::debug!("Data directory: {}", config.storage.data_dir.display());

    let storage: Arc<dyn KeyValueStorage> =
        Arc::new(FileStorage::new(&config.storage.data_dir));
    let store = LearnerStore::load(storage).context("Failed to load saved words")?;

    let level = cli.level.unwrap_or(config.level);
    let state = Arc::new(AppState::new(config));

    match cli.command {
        Some(command) => commands::run(command, &state, store, level).await,
        None => run_interactive(state, store, level).await,
    }
}

async fn run_interactive(
    state: Arc<AppState>,
    store: LearnerStore,
    level: Level,
) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(store, level);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Task exited with error during shutdown: {:#}", e),
            Err(e) => tracing::error!("Task panicked during shutdown: {}", e),
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WORTMEISTER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if std::env::var_os("WORTMEISTER_LOG_JSON").is_some() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
