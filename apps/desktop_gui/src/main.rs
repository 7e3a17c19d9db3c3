use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{load_settings, load_settings_from};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::ScreeningApp;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the Screening Service; overrides screening.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file to use instead of ./screening.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    }
    .with_server_url(args.server_url);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(settings.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Voice Screening")
            .with_inner_size([560.0, 520.0])
            .with_min_inner_size([420.0, 360.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Voice Screening",
        options,
        Box::new(|_cc| Ok(Box::new(ScreeningApp::new(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
