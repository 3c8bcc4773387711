use std::{fs, path::Path, time::Duration};

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

pub const SETTINGS_FILE: &str = "nyaya.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Replaces the base url after validating it.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

/// Defaults, then `nyaya.toml` in the working directory, then the process environment.
pub fn load_settings() -> Result<ClientSettings, ConfigError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        match toml::from_str::<toml::Table>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
                    settings.api_base_url = v.to_string();
                }
                if let Some(v) = file_cfg.get("request_timeout_secs") {
                    let parsed = match v {
                        toml::Value::Integer(secs) => u64::try_from(*secs).ok(),
                        toml::Value::String(secs) => secs.trim().parse().ok(),
                        _ => None,
                    };
                    if let Some(secs) = parsed.filter(|secs| *secs > 0) {
                        settings.request_timeout_secs = secs;
                    }
                }
            }
            Err(err) => {
                warn!(path = %settings_file.display(), "ignoring unreadable settings file: {err}");
            }
        }
    }

    if let Some(v) = non_empty(env("NYAYA_API_BASE_URL")) {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty(env("APP__API_BASE_URL")) {
        settings.api_base_url = v;
    }

    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        if let Some(parsed) = v.trim().parse::<u64>().ok().filter(|secs| *secs > 0) {
            settings.request_timeout_secs = parsed;
        }
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates an http(s) base url and strips trailing slashes so paths can be appended.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
