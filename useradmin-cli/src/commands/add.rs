//! Add command - create a user through the add form

use std::sync::Arc;

use anyhow::Result;
use useradmin_core::ports::FixedAnswer;
use useradmin_core::FormValues;

use super::{conclude, get_context};

pub async fn run(name: String, email: String, phone: Option<String>) -> Result<()> {
    let mut ctx = get_context(Arc::new(FixedAnswer(false)))?;
    let controller = &mut ctx.controller;

    controller.open_create();
    controller.fill_form(FormValues {
        id: String::new(),
        name,
        email,
        phone: phone.unwrap_or_default(),
    });

    let result = controller.submit().await;
    conclude(controller, result);
    Ok(())
}
