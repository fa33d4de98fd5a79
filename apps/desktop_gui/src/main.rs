mod config;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use shared::domain::CountMode;
use tracing_subscriber::EnvFilter;

use crate::ui::{theme::PersistedDesktopSettings, theme::SETTINGS_STORAGE_KEY, CountingGuiApp};

#[derive(Parser, Debug)]
#[command(about = "Desktop window for range, text, and list counting")]
struct Args {
    /// Settings file; defaults to ./counting.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Counting mode selected at startup (basic, occurrences, custom).
    #[arg(long)]
    mode: Option<CountMode>,
    /// Largest range the window will generate.
    #[arg(long)]
    max_range_len: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(max_range_len) = args.max_range_len {
        settings.max_range_len = max_range_len;
    }
    tracing::info!(
        mode = %args.mode.unwrap_or(settings.default_mode),
        max_range_len = settings.max_range_len,
        "starting counting window"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&settings.window_title)
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let app_name = settings.window_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDesktopSettings>(&text).ok())
            });
            Ok(Box::new(CountingGuiApp::new(
                &settings,
                args.mode,
                persisted_settings,
            )))
        }),
    )
    .map_err(|err| anyhow!("counting window failed: {err}"))
}
