//! useradmin CLI - manage users from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{add, demo, edit, list, remove};

/// useradmin - manage the users of a user-management API
#[derive(Parser)]
#[command(name = "ua", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users
    List {
        /// Only show users whose name or email contains this text
        #[arg(long, short)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Output the table body as HTML
        #[arg(long)]
        html: bool,
    },

    /// Create a user
    Add {
        /// Display name (at least 2 characters)
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Update a user; omitted fields keep their current value
    Edit {
        /// User ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Phone number (pass an empty string to clear it)
        #[arg(long)]
        phone: Option<String>,
    },

    /// Delete a user
    Remove {
        /// User ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

/// Logs go to stderr; `RUST_LOG` controls verbosity (default: warnings)
fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { search, json, html } => list::run(search, json, html).await,
        Commands::Add { name, email, phone } => add::run(name, email, phone).await,
        Commands::Edit { id, name, email, phone } => edit::run(&id, name, email, phone).await,
        Commands::Remove { id, force } => remove::run(&id, force).await,
        Commands::Demo { command } => demo::run(command),
    }
}
