//! Core domain entities
//!
//! Pure data structures and the rules that apply to them - no I/O.

mod modal;
pub mod result;
mod user;
pub mod validation;

pub use modal::{Modal, ModalMode, ModalState};
pub use user::{User, UserId, UserPayload, PHONE_PLACEHOLDER};
pub use validation::{validate, FieldErrors, FormField, FormValues, ValidatedUser};
