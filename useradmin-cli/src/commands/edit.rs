//! Edit command - update a user through the edit form

use std::sync::Arc;

use anyhow::Result;
use useradmin_core::ports::FixedAnswer;
use useradmin_core::UserId;

use super::{conclude, get_context};

pub async fn run(
    id: &str,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let mut ctx = get_context(Arc::new(FixedAnswer(false)))?;
    let controller = &mut ctx.controller;

    // The form is pre-populated from the cache, so fetch first
    let result = controller.refresh().await;
    conclude(controller, result);

    let user_id = UserId::new(id);
    if !controller.open_edit(&user_id) {
        anyhow::bail!("User '{}' not found", id);
    }

    let mut values = controller.modal().form().clone();
    if let Some(name) = name {
        values.name = name;
    }
    if let Some(email) = email {
        values.email = email;
    }
    if let Some(phone) = phone {
        values.phone = phone;
    }
    controller.fill_form(values);

    let result = controller.submit().await;
    conclude(controller, result);
    Ok(())
}
