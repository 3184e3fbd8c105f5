//! List command - show the user table

use std::sync::Arc;

use anyhow::Result;
use useradmin_core::ports::FixedAnswer;

use super::{conclude, get_context};
use crate::output;

pub async fn run(search: Option<String>, json: bool, html: bool) -> Result<()> {
    let mut ctx = get_context(Arc::new(FixedAnswer(false)))?;
    let controller = &mut ctx.controller;

    let result = controller.refresh().await;
    conclude(controller, result);

    let view = controller.set_filter(search.unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(view.rows())?);
        return Ok(());
    }

    if html {
        print!("{}", view.to_html());
        return Ok(());
    }

    output::user_table(&view);
    Ok(())
}
