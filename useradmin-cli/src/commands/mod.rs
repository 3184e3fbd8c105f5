//! CLI command implementations

pub mod add;
pub mod demo;
pub mod edit;
pub mod list;
pub mod remove;

use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use useradmin_core::ports::Confirmer;
use useradmin_core::services::UserListController;
use useradmin_core::{CoreResult, Error, UserAdminContext};

use crate::output;

/// Interactive yes/no prompt on the terminal
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        // A prompt that can't be shown counts as "no"
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Get the config directory from environment or default
pub fn get_config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("USERADMIN_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".useradmin"))
        .context("Could not find home directory")
}

/// Build the context, creating the config directory if needed
pub fn get_context(confirmer: Arc<dyn Confirmer>) -> Result<UserAdminContext> {
    let config_dir = get_config_dir()?;

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

    UserAdminContext::new(&config_dir, confirmer).context("Failed to initialize useradmin context")
}

/// Print the toast left by the last operation and exit non-zero on failure
///
/// Field errors are printed one per line. Other failures print the error
/// only when no toast was raised for them. A change the server accepted but
/// could not be re-listed afterwards is a success with a warning.
pub fn conclude<T>(controller: &mut UserListController, result: CoreResult<T>) -> T {
    let toast = controller.toaster_mut().take();
    if let Some(toast) = &toast {
        output::toast(toast);
    }
    match result {
        Ok(value) => {
            if controller.is_stale() {
                output::warning("The change was saved, but the user list could not be reloaded. Run 'ua list' to check.");
            }
            value
        }
        Err(Error::Validation(errors)) => {
            output::field_errors(&errors);
            exit(1);
        }
        Err(e) => {
            if toast.is_none() {
                output::error(&e.to_string());
            }
            exit(1);
        }
    }
}
