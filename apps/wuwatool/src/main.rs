//! WuWa Tool entry point.

mod app;
mod cli;
mod config;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wuwatool_settings::PreferenceStore;

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppState;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries listings and notices.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(bridge) = cli.bridge {
        config.bridge = bridge;
    }
    tracing::debug!(bridge = %config.bridge, storage = %config.storage_root, "configuration loaded");

    let prefs = match &cli.prefs {
        Some(path) => PreferenceStore::load(path)?,
        None => PreferenceStore::load_default()?,
    };

    let mut state = AppState::new(config, prefs);

    let rt = tokio::runtime::Runtime::new()?;
    let ok = rt.block_on(app::run(&mut state, cli.command))?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
