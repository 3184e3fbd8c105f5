//! Remove command - delete a user after confirmation

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use useradmin_core::ports::{Confirmer, FixedAnswer};
use useradmin_core::UserId;

use super::{conclude, get_context, TerminalConfirmer};

pub async fn run(id: &str, force: bool) -> Result<()> {
    if !force && atty::isnt(atty::Stream::Stdin) {
        anyhow::bail!("Refusing to prompt on non-interactive input. Use --force to delete without confirmation.");
    }

    let confirmer: Arc<dyn Confirmer> = if force {
        Arc::new(FixedAnswer(true))
    } else {
        Arc::new(TerminalConfirmer)
    };
    let mut ctx = get_context(confirmer)?;
    let controller = &mut ctx.controller;

    let result = controller.refresh().await;
    conclude(controller, result);

    let user_id = UserId::new(id);
    let Some(user) = controller.find(&user_id) else {
        anyhow::bail!("User '{}' not found", id);
    };

    if !force {
        println!(
            "\n{}",
            format!("This will delete '{}' <{}>.", user.name, user.email).yellow()
        );
    }

    let result = controller.request_delete(&user_id).await;
    if !conclude(controller, result) {
        println!("{}", "Cancelled".dimmed());
    }
    Ok(())
}
