//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use useradmin_core::config::DEMO_MODE_ENV;
use useradmin_core::services::DemoService;

use super::get_config_dir;
use crate::output;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off {
        /// Also delete the demo users
        #[arg(long)]
        clean: bool,
    },
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let config_dir = get_config_dir()?;
    std::fs::create_dir_all(&config_dir)?;
    let demo_service = DemoService::new(&config_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            output::success("Demo mode enabled");
            println!("Sample users have been created. Run 'ua list' to see them.");
        }
        Some(DemoCommands::Off { clean }) => {
            demo_service.disable(clean)?;
            output::warning("Demo mode disabled");
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    if let Some(env) = demo_service.masked_by_env()? {
        let state = if env { "ON" } else { "OFF" };
        output::warning(&format!(
            "{} is set; demo mode stays {} until it is unset",
            DEMO_MODE_ENV, state
        ));
    }
    Ok(())
}
