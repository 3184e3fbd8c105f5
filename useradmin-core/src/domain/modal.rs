//! Add/edit modal state machine
//!
//! ```text
//! Closed --add--> Open(Create)
//! Closed --edit(id), id cached--> Open(Edit(id))
//! Open(*) --close | backdrop | submitted--> Closed
//! ```

use serde::Serialize;

use super::user::{User, UserId};
use super::validation::{FieldErrors, FormValues};

/// Which record the open form targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "id")]
pub enum ModalMode {
    Create,
    Edit(UserId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "mode")]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalMode),
}

/// The modal plus the form it hosts
///
/// Form values and field errors only exist while the modal is open; closing
/// discards both.
#[derive(Debug, Clone, Default)]
pub struct Modal {
    state: ModalState,
    form: FormValues,
    errors: FieldErrors,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn mode(&self) -> Option<&ModalMode> {
        match &self.state {
            ModalState::Open(mode) => Some(mode),
            ModalState::Closed => None,
        }
    }

    /// Open an empty form in create mode
    pub fn open_create(&mut self) {
        self.form = FormValues::default();
        self.errors = FieldErrors::default();
        self.state = ModalState::Open(ModalMode::Create);
    }

    /// Open the form pre-populated from `user`
    pub fn open_edit(&mut self, user: &User) {
        self.form = FormValues {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        };
        self.errors = FieldErrors::default();
        self.state = ModalState::Open(ModalMode::Edit(user.id.clone()));
    }

    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.form = FormValues::default();
        self.errors = FieldErrors::default();
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    /// Overwrite the visible fields; the hidden id stays bound to the mode
    pub fn fill(&mut self, values: FormValues) {
        let id = self.form.id.clone();
        self.form = FormValues { id, ..values };
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = FieldErrors::default();
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            Some(ModalMode::Edit(_)) => "Edit User",
            _ => "Add New User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            Some(ModalMode::Edit(_)) => "Update User",
            _ => "Save User",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FormField;

    #[test]
    fn test_initial_state_is_closed() {
        let modal = Modal::new();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_open_create_clears_form() {
        let mut modal = Modal::new();
        modal.open_edit(&User::new("3", "Carol", "c@x.com"));
        modal.close();
        modal.open_create();

        assert_eq!(modal.state(), &ModalState::Open(ModalMode::Create));
        assert_eq!(modal.form(), &FormValues::default());
        assert_eq!(modal.title(), "Add New User");
        assert_eq!(modal.submit_label(), "Save User");
    }

    #[test]
    fn test_open_edit_prepopulates() {
        let mut modal = Modal::new();
        let user = User::new("3", "Carol", "c@x.com").with_phone("555");
        modal.open_edit(&user);

        assert_eq!(
            modal.state(),
            &ModalState::Open(ModalMode::Edit(UserId::new("3")))
        );
        assert_eq!(modal.form().id, "3");
        assert_eq!(modal.form().name, "Carol");
        assert_eq!(modal.form().phone, "555");
        assert_eq!(modal.title(), "Edit User");
        assert_eq!(modal.submit_label(), "Update User");
    }

    #[test]
    fn test_fill_keeps_hidden_id() {
        let mut modal = Modal::new();
        modal.open_edit(&User::new("3", "Carol", "c@x.com"));
        modal.fill(FormValues {
            id: "999".to_string(),
            name: "Caroline".to_string(),
            email: "c@x.com".to_string(),
            phone: String::new(),
        });

        assert_eq!(modal.form().id, "3");
        assert_eq!(modal.form().name, "Caroline");
    }

    #[test]
    fn test_close_clears_errors() {
        let mut modal = Modal::new();
        modal.open_create();
        let mut errors = FieldErrors::default();
        errors.insert(FormField::Email, "Invalid email format");
        modal.set_errors(errors);
        assert!(!modal.errors().is_empty());

        modal.close();
        assert!(modal.errors().is_empty());
        assert_eq!(modal.state(), &ModalState::Closed);
    }
}
