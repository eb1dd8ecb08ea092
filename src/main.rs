#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod app;
mod config;
mod domain;
mod infra;
mod logging;
mod platform;
mod ui;
mod usecase;


use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::App;
use crate::config::{default_config_path, default_webview_data_dir, load_config, DashboardConfig};

fn main() -> Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    logging::init(&config.logging.level);

    if let Some(err) = config_error {
        warn!(error = %format!("{err:#}"), "falling back to default configuration");
    } else if let Ok(path) = default_config_path() {
        info!(path = %path.display(), exists = path.exists(), "configuration resolved");
    }

    let webview_data_dir =
        default_webview_data_dir().context("failed to prepare WebView2 data directory")?;

    info!(title = %config.window.title, "starting sales dashboard");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title(config.window.title.clone()),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(config)
        .launch(App);

    Ok(())
}
