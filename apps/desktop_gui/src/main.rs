use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use backend_bridge::commands::BackendCommand;
use clap::Parser;
use composer_core::config::{load_settings, AppPaths};
use controller::events::UiEvent;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::ComposerApp;

#[derive(Parser, Debug)]
#[command(about = "Chat composer with attachment previews")]
struct Args {
    /// Directory holding settings.json; defaults to the platform data dir.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Alternate composer.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(dir) = args.data_dir {
        settings.data_dir = Some(dir);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let paths = AppPaths::resolve(&settings).context("failed to resolve app data directory")?;
    tracing::info!(data_root = %paths.data_root.display(), "starting chat composer");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.thumbnail_max_dimension);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chat Composer")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Chat Composer",
        options,
        Box::new(move |_cc| Ok(Box::new(ComposerApp::new(cmd_tx, ui_rx, &settings, &paths)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop shell exited with error: {err}"))
}
