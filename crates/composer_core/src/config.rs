use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;

use crate::thumbnail::DEFAULT_THUMBNAIL_MAX_DIMENSION;

pub const DEFAULT_CONFIG_FILE: &str = "composer.toml";
const APP_DIR_NAME: &str = "chat_composer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub thumbnail_max_dimension: u32,
    pub resize_debounce_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            thumbnail_max_dimension: DEFAULT_THUMBNAIL_MAX_DIMENSION,
            resize_debounce_ms: 250,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Defaults, then `composer.toml` (or `config_path`), then `APP__*`
/// environment variables. Unparseable values are ignored.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let value_text = |key: &str| -> Option<String> {
        file_cfg.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };

    if let Some(v) = value_text("data_dir") {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = value_text("thumbnail_max_dimension").and_then(|v| v.parse().ok()) {
        settings.thumbnail_max_dimension = v;
    }
    if let Some(v) = value_text("resize_debounce_ms").and_then(|v| v.parse().ok()) {
        settings.resize_debounce_ms = v;
    }
    if let Some(v) = value_text("log_filter") {
        settings.log_filter = v;
    }
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__DATA_DIR").filter(|v| !v.trim().is_empty()) {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("APP__THUMBNAIL_MAX_DIMENSION").and_then(|v| v.parse().ok()) {
        settings.thumbnail_max_dimension = v;
    }
    if let Some(v) = lookup("APP__RESIZE_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
        settings.resize_debounce_ms = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER").filter(|v| !v.trim().is_empty()) {
        settings.log_filter = v;
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub settings_path: PathBuf,
}

impl AppPaths {
    pub fn resolve(settings: &Settings) -> anyhow::Result<Self> {
        let root = match &settings.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .context("unable to resolve local app data dir")?
                .join(APP_DIR_NAME),
        };

        Ok(Self {
            settings_path: root.join("settings.json"),
            data_root: root,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
