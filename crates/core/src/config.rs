//! Client settings
//!
//! Settings are layered: serde defaults first, then an optional TOML or YAML
//! file, then `CLINIC__*` environment variables (for example
//! `CLINIC__API__BASE_URL`).

use crate::error::CoreResult;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Top-level client settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicSettings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub layout: LayoutSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Request timeout in seconds (ignored on wasm32)
    pub timeout_secs: Option<u64>,
    /// User agent sent with requests
    pub user_agent: Option<String>,
}

/// Session lifecycle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// How long before access-token expiry the refresh timer fires
    pub refresh_lead_secs: u64,
}

/// Layout asset manager settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Delay between asset load and widget initialization
    pub init_delay_ms: u64,
    /// Poll interval while waiting for the widget runtime
    pub readiness_poll_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            refresh_lead_secs: 60,
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            init_delay_ms: 100,
            readiness_poll_ms: 100,
        }
    }
}

impl ClinicSettings {
    /// Load settings from an optional file plus `CLINIC__*` environment variables
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("CLINIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

impl ApiSettings {
    /// Request timeout, if one is configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl SessionSettings {
    #[must_use]
    pub const fn refresh_lead(&self) -> Duration {
        Duration::from_secs(self.refresh_lead_secs)
    }
}

impl LayoutSettings {
    #[must_use]
    pub const fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    #[must_use]
    pub const fn readiness_poll(&self) -> Duration {
        Duration::from_millis(self.readiness_poll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = ClinicSettings::default();
        assert_eq!(settings.api.base_url, DEFAULT_API_BASE_URL);
        assert!(settings.api.timeout().is_none());
        assert_eq!(settings.session.refresh_lead(), Duration::from_secs(60));
        assert_eq!(settings.layout.init_delay(), Duration::from_millis(100));
        assert_eq!(settings.layout.readiness_poll(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://clinic.example/api\"\ntimeout_secs = 15\n\n[session]\nrefresh_lead_secs = 30\n"
        )
        .unwrap();

        let settings = ClinicSettings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api.base_url, "https://clinic.example/api");
        assert_eq!(settings.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(settings.session.refresh_lead_secs, 30);
        // Untouched sections keep their defaults
        assert_eq!(settings.layout, LayoutSettings::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let settings = ClinicSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_API_BASE_URL);
    }
}
