use std::{collections::HashMap, fs, path::Path};

use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const SETTINGS_FILE_NAME: &str = "booking.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid api base url '{value}': {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("api base url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

impl Settings {
    /// Applies a command-line override, which wins over file and environment.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|v| !v.trim().is_empty()) {
            self.api_base_url = api_url;
        }
        self
    }

    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let value = self.api_base_url.trim();
        let url = Url::parse(value).map_err(|source| SettingsError::InvalidApiUrl {
            value: value.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(SettingsError::UnsupportedScheme(value.to_string())),
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE_NAME), |name| std::env::var(name).ok())
}

/// Layers defaults, the settings file and the environment, in that order.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url") {
                    settings.api_base_url = v.clone();
                }
            }
            Err(err) => warn!("ignoring malformed settings file '{}': {err}", path.display()),
        }
    }

    if let Some(v) = env("BOOKING_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
