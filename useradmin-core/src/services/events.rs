//! UI events for the user list page
//!
//! Every interaction reaches the controller as one of these values. Row
//! buttons are resolved from their `data-action`/`data-id` attributes by a
//! single delegated handler instead of carrying their own callbacks.

use crate::domain::result::Result;
use crate::domain::{FormValues, UserId};

use super::view::RowAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add" button
    AddClicked,
    /// Row "Edit" button
    EditClicked(UserId),
    /// Row "Delete" button
    DeleteClicked(UserId),
    /// Close icon or cancel button
    CloseClicked,
    /// Click on the backdrop outside the modal surface
    BackdropClicked,
    /// Search box content changed
    SearchInput(String),
    /// Form submitted with the visible field values
    Submitted(FormValues),
}

impl UiEvent {
    /// Resolve a click on a row button from its data attributes
    pub fn from_row_action(action: &str, id: &str) -> Result<Self> {
        let action: RowAction = action.parse()?;
        let id = UserId::new(id);
        Ok(match action {
            RowAction::Edit => UiEvent::EditClicked(id),
            RowAction::Delete => UiEvent::DeleteClicked(id),
        })
    }
}
