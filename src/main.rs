mod cli;
mod config;
mod content;
mod db;
mod models;
mod progress;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::{RecordStore, SqliteBackend};
use progress::ProgressTracker;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    if let Some(Commands::Init) = cli.command {
        return handlers::handle_init(&config);
    }

    let store = open_store(&config, cli.ephemeral)?;
    let mut tracker = ProgressTracker::new(store);

    match cli.command {
        Some(Commands::Init) => unreachable!(),
        Some(Commands::Today { date }) => {
            handlers::handle_today(&tracker, &config, date.as_deref())?;
        }
        Some(Commands::Answer { choice, date }) => {
            handlers::handle_answer(&mut tracker, &config, &choice, date.as_deref())?;
        }
        Some(Commands::Streak) => {
            handlers::handle_streak(&tracker)?;
        }
        Some(Commands::Stats) => {
            handlers::handle_stats(&tracker)?;
        }
        Some(Commands::History { limit }) => {
            handlers::handle_history(&tracker, limit)?;
        }
        Some(Commands::Status { date }) => {
            handlers::handle_status(&tracker, &date)?;
        }
        Some(Commands::Dates) => {
            handlers::handle_dates(&config)?;
        }
        Some(Commands::Export { out }) => {
            handlers::handle_export(&config, out)?;
        }

        // No subcommand → launch TUI
        None => {
            let collection = handlers::load_collection(&config)
                .map_err(|e| log::warn!("Dashboard starts without questions: {:#}", e))
                .ok();
            tui::app::run(tracker, config, collection)?;
        }
    }

    Ok(())
}

/// Open the record store, or an unavailable one when storage is switched off.
fn open_store(config: &AppConfig, ephemeral: bool) -> Result<RecordStore> {
    if ephemeral || !config.storage.enabled {
        log::info!("Persistent storage disabled for this run");
        return Ok(RecordStore::unavailable(config.storage.key.clone()));
    }

    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // WAL lets the dashboard and a CLI call read while the other writes
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn)?;

    let backend = SqliteBackend::new(conn).with_quota(config.storage.quota_bytes);
    let store = RecordStore::new(backend, config.storage.key.clone());
    log::debug!("Answer history stored under '{}'", store.key());
    Ok(store)
}
