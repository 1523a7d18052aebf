//! Cosmo CLI Entry Point
//!
//! Two subcommand groups:
//! - `containers` - container lifecycle (list, create, delete, show)
//! - `items` - item lifecycle (create, get, update, delete, list)
//!
//! Global flags: `--json` for machine-readable envelopes, `--yes` to skip
//! confirmation prompts. Data goes to stdout; logs go to stderr. Every
//! classified error exits with status 1.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cosmo::commands::{containers, items, CommandOutcome};
use cosmo::error::Result;
use cosmo::output::OutputAdapter;

/// Cosmo - container and item lifecycle CLI for Azure Cosmos DB
#[derive(Parser)]
#[command(name = "cosmo")]
#[command(about = "Container and item lifecycle CLI for Azure Cosmos DB")]
#[command(version)]
struct Cli {
    /// Emit machine-readable JSON envelopes instead of text output
    #[arg(long, global = true)]
    json: bool,

    /// Skip confirmation prompts for destructive operations
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage containers in the configured database
    Containers {
        #[command(subcommand)]
        command: containers::ContainersCommand,
    },

    /// Manage items within a container
    Items {
        #[command(subcommand)]
        command: items::ItemsCommand,
    },
}

fn main() {
    // Optional .env support; missing files are fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = OutputAdapter::new(cli.json);

    let Some(command) = cli.command else {
        // No subcommand: show help and exit cleanly
        let _ = Cli::command().print_help();
        return;
    };

    let (label, result): (&str, Result<CommandOutcome>) = match command {
        Commands::Containers { command } => {
            (command.label(), containers::run(command, &output, cli.yes))
        }
        Commands::Items { command } => (command.label(), items::run(command, &output, cli.yes)),
    };

    match result {
        Ok(CommandOutcome::Completed) => {}
        Ok(CommandOutcome::Aborted) => {
            eprintln!("Aborted by user.");
            std::process::exit(1);
        }
        Err(err) => {
            output.failure(label, &err);
            std::process::exit(1);
        }
    }
}
