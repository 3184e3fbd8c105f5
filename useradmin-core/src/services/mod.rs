//! Service layer - the user list page's behavior
//!
//! The controller coordinates the ports with the pure pieces: view
//! projection, toast slot and event dispatch.

mod controller;
mod demo;
mod events;
pub mod toast;
pub mod view;

pub use controller::{UserListController, CREATED, DELETED, DELETE_PROMPT, UPDATED};
pub use demo::{DemoService, DEMO_STORE_FILE};
pub use events::UiEvent;
pub use toast::{Toast, ToastKind, Toaster};
pub use view::{escape_html, filter_users, render, RowAction, RowDescriptor, TableView};
