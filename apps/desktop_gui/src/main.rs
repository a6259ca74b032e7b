use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::HttpAnalysisClient;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::{load_settings, DEFAULT_CONFIG_PATH};
use crate::controller::events::UiEvent;
use crate::ui::{app::APP_TITLE, AnalyzerApp};

#[derive(Parser, Debug)]
#[command(name = "stock_analyzer", about = "Desktop client for the F&O stock analysis service")]
struct Cli {
    /// TOML settings file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    tracing::info!(
        api_base_url = %settings.api_base_url,
        config = %cli.config.display(),
        "starting stock analyzer"
    );

    let client = HttpAnalysisClient::new(&settings.api_base_url)
        .context("failed to set up analysis service client")?;
    tracing::debug!(endpoint = %client.endpoint(), "analysis endpoint resolved");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    let api_base_url = settings.api_base_url.clone();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(cmd_tx, ui_rx, api_base_url)))),
    )
    .map_err(|err| anyhow!("desktop app exited with error: {err}"))
}
