//! Theme Sync CLI
//!
//! Applies theme payloads to WordPress theme directories and exposes the
//! view and field compilers for inspection.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use config::Config;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} Theme Sync CLI", "theme-sync".green().bold());
            println!();
            println!("Run {} for available commands.", "theme-sync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config_path: Option<&std::path::Path>) -> Result<()> {
    match cmd {
        Commands::Sync(args) => {
            let config = Config::load(config_path)?;
            commands::run_sync(&config, args)
        }
        Commands::View { element, domain } => commands::run_view(&element, &domain),
        Commands::Fields { group } => commands::run_fields(&group),
    }
}
