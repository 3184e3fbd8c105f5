//! Configuration management
//!
//! Settings live in `settings.json` inside the config directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:8080", "timeoutSecs": 30 },
//!   "demoMode": false,
//!   "toastDurationMs": 3000
//! }
//! ```
//! Keys this crate doesn't know about are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Overrides `api.baseUrl`
pub const BASE_URL_ENV: &str = "USERADMIN_BASE_URL";
/// Overrides `demoMode` (for CI/testing)
pub const DEMO_MODE_ENV: &str = "USERADMIN_DEMO_MODE";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    demo_mode: bool,
    #[serde(default)]
    toast_duration_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Values taken from the environment instead of settings.json
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub demo_mode: Option<bool>,
}

impl EnvOverrides {
    /// Read `USERADMIN_BASE_URL` and `USERADMIN_DEMO_MODE`
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
            demo_mode: std::env::var(DEMO_MODE_ENV).ok().and_then(|v| parse_flag(&v)),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub demo_mode: bool,
    pub toast_duration: Duration,
    overrides: EnvOverrides,
    // Raw settings: preserved on save, and the stored demo flag
    raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            demo_mode: false,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_DURATION_MS),
            overrides: EnvOverrides::default(),
            raw_settings: SettingsFile::default(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load config from the config directory
    ///
    /// A missing or unreadable settings file yields defaults. Environment
    /// variables win over the file.
    pub fn load(config_dir: &Path) -> Result<Self> {
        Self::load_with(config_dir, EnvOverrides::from_env())
    }

    /// Load config, applying the given overrides instead of reading the environment
    pub fn load_with(config_dir: &Path, overrides: EnvOverrides) -> Result<Self> {
        let settings_path = config_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %settings_path.display(), error = %e, "ignoring malformed settings");
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| raw.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let demo_mode = overrides.demo_mode.unwrap_or(raw.demo_mode);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            demo_mode,
            toast_duration: Duration::from_millis(
                raw.toast_duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
            ),
            overrides,
            raw_settings: raw,
        })
    }

    /// Save config to the config directory
    ///
    /// Re-reads the file first so fields edited by hand in the meantime are
    /// not lost. A base URL that still equals its environment override is
    /// not written; the file keeps its own value.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let settings_path = config_dir.join(SETTINGS_FILE);

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self.raw_settings.clone()
        };

        if self.overrides.base_url.as_deref() != Some(self.base_url.as_str()) {
            settings.api.base_url = Some(self.base_url.clone());
        }
        settings.api.timeout_secs = Some(self.timeout.as_secs());
        settings.demo_mode = self.raw_settings.demo_mode;
        settings.toast_duration_ms = Some(self.toast_duration.as_millis() as u64);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Demo flag as stored in settings.json, ignoring the environment
    pub fn stored_demo_mode(&self) -> bool {
        self.raw_settings.demo_mode
    }

    /// The environment's demo flag when it disagrees with the stored one
    pub fn demo_mode_masked_by(&self) -> Option<bool> {
        self.overrides
            .demo_mode
            .filter(|env| *env != self.raw_settings.demo_mode)
    }

    /// Turn demo mode on in the stored settings
    ///
    /// `demo_mode` only follows when no environment override is set.
    pub fn enable_demo_mode(&mut self) {
        self.set_stored_demo_mode(true);
    }

    pub fn disable_demo_mode(&mut self) {
        self.set_stored_demo_mode(false);
    }

    fn set_stored_demo_mode(&mut self, enabled: bool) {
        self.raw_settings.demo_mode = enabled;
        self.demo_mode = self.overrides.demo_mode.unwrap_or(enabled);
    }
}
