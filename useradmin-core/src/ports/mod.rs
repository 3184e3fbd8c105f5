//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The controller
//! depends only on these traits, not on concrete implementations.

mod confirm;
mod users_api;

pub use confirm::{Confirmer, FixedAnswer};
pub use users_api::UsersApi;
