//! useradmin core - client-side state for the user administration page
//!
//! This crate keeps a local copy of the users collection in step with the
//! users REST API, following hexagonal architecture:
//!
//! - **domain**: User, validation gate, add/edit modal state machine
//! - **ports**: Trait definitions for external collaborators (UsersApi, Confirmer)
//! - **services**: List controller, view projection, toast slot, UI events
//! - **adapters**: Concrete implementations (reqwest HTTP client, demo store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::DemoUsersApi;
use adapters::http::HttpUsersApi;
use config::Config;
use ports::{Confirmer, UsersApi};
use services::{DemoService, Toaster, UserListController};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{FieldErrors, FormField, FormValues, Modal, ModalMode, ModalState, User, UserId, UserPayload};
pub use services::{TableView, ToastKind, UiEvent};

/// Main context for user administration
///
/// Built once per session from the config directory; holds the resolved
/// configuration and the controller wired to the configured backend.
pub struct UserAdminContext {
    pub config: Config,
    pub controller: UserListController,
}

impl UserAdminContext {
    /// Create a context using `confirmer` for delete prompts
    pub fn new(config_dir: &Path, confirmer: Arc<dyn Confirmer>) -> Result<Self> {
        let config = Config::load(config_dir)?;

        let api: Arc<dyn UsersApi> = if config.demo_mode {
            let store = DemoService::new(config_dir).store_path();
            tracing::debug!(path = %store.display(), "using demo users store");
            Arc::new(DemoUsersApi::open(&store)?)
        } else {
            tracing::debug!(base_url = %config.base_url, "using users API");
            Arc::new(HttpUsersApi::new(&config.base_url, config.timeout)?)
        };

        let controller =
            UserListController::with_toaster(api, confirmer, Toaster::new(config.toast_duration));

        Ok(Self { config, controller })
    }
}
