//! Demo service - manage demo mode
//!
//! Demo mode swaps the users API for a local store seeded with sample users,
//! so the admin flows can be tried without a running backend.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::adapters::demo::DemoUsersApi;
use crate::config::{Config, EnvOverrides};

/// File holding the demo store, inside the config directory
pub const DEMO_STORE_FILE: &str = "demo-users.json";

/// Demo service for managing demo mode
pub struct DemoService {
    config_dir: PathBuf,
    overrides: EnvOverrides,
}

impl DemoService {
    pub fn new(config_dir: &Path) -> Self {
        Self::with_overrides(config_dir, EnvOverrides::from_env())
    }

    pub fn with_overrides(config_dir: &Path, overrides: EnvOverrides) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            overrides,
        }
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_with(&self.config_dir, self.overrides.clone())
    }

    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(DEMO_STORE_FILE)
    }

    /// Check if demo mode is currently in effect (environment included)
    pub fn is_enabled(&self) -> Result<bool> {
        Ok(self.load_config()?.demo_mode)
    }

    /// `USERADMIN_DEMO_MODE` value that overrides the stored setting, if any
    pub fn masked_by_env(&self) -> Result<Option<bool>> {
        Ok(self.load_config()?.demo_mode_masked_by())
    }

    /// Enable demo mode with a freshly seeded store
    pub fn enable(&self) -> Result<()> {
        let store = self.store_path();
        if store.exists() {
            std::fs::remove_file(&store)?;
        }

        let mut config = self.load_config().unwrap_or_default();
        config.enable_demo_mode();
        config.save(&self.config_dir)?;

        DemoUsersApi::open(&store)?;
        tracing::info!(path = %store.display(), "demo mode enabled");
        Ok(())
    }

    /// Disable demo mode, optionally deleting the demo store
    pub fn disable(&self, clean: bool) -> Result<()> {
        let mut config = self.load_config().unwrap_or_default();
        config.disable_demo_mode();
        config.save(&self.config_dir)?;

        if clean {
            let store = self.store_path();
            if store.exists() {
                std::fs::remove_file(&store)?;
            }
        }

        tracing::info!(clean, "demo mode disabled");
        Ok(())
    }
}
