use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub data_path: PathBuf,
    pub favicon_path: PathBuf,
    pub sidebar_image_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5006".into(),
            data_path: "./data/billionaires.csv".into(),
            favicon_path: "./assets/money.svg".into(),
            sidebar_image_path: "./assets/sidebar.svg".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string("server.toml").ok();
    settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml` entries, then environment variables.
pub(crate) fn settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("data_path") {
                settings.data_path = v.into();
            }
            if let Some(v) = file_cfg.get("favicon_path") {
                settings.favicon_path = v.into();
            }
            if let Some(v) = file_cfg.get("sidebar_image_path") {
                settings.sidebar_image_path = v.into();
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("DATA_PATH") {
        settings.data_path = v.into();
    }
    if let Some(v) = env("APP__DATA_PATH") {
        settings.data_path = v.into();
    }

    if let Some(v) = env("APP__FAVICON_PATH") {
        settings.favicon_path = v.into();
    }
    if let Some(v) = env("APP__SIDEBAR_IMAGE_PATH") {
        settings.sidebar_image_path = v.into();
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
