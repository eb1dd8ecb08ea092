use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[window]
title = "Tablero de Ventas"

[logging]
level = "info"

[chart]
width = 720
height = 380

[author]
legajo = "55.555"
nombre = "Juan Pérez"
comision = "C1"
"#;

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
    pub chart: ChartConfig,
    pub author: AuthorConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tablero de Ventas".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 380,
        }
    }
}

/// Shown in the main area until a file is loaded.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuthorConfig {
    pub legajo: String,
    pub nombre: String,
    pub comision: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            legajo: "55.555".to_string(),
            nombre: "Juan Pérez".to_string(),
            comision: "C1".to_string(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "sales-dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn parse_config(contents: &str) -> Result<DashboardConfig> {
    toml::from_str(contents).context("failed to parse dashboard config")
}

/// Reads `config_path` when it exists, otherwise the embedded default.
pub fn load_config_from(config_path: &Path) -> Result<DashboardConfig> {
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        return parse_config(&contents);
    }

    parse_config(DEFAULT_CONFIG)
}

pub fn load_config() -> Result<DashboardConfig> {
    load_config_from(&default_config_path()?)
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
