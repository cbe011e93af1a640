//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Theme Sync - Generate and update WordPress theme files from builder payloads
#[derive(Parser, Debug)]
#[command(name = "theme-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./theme-sync.toml when present)
    #[arg(short, long, global = true, env = "THEME_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply a theme payload to its theme directory
    ///
    /// Examples:
    ///   theme-sync sync payload.json                  # Full sync
    ///   theme-sync sync payload.json --action part    # Parts only
    ///   theme-sync sync payload.json --dry-run        # Preview
    Sync(SyncArgs),

    /// Compile an element tree (JSON) into a PHP view
    View {
        /// JSON file holding one element or an array of elements
        element: PathBuf,

        /// Text domain for translated strings
        #[arg(short, long, default_value = "")]
        domain: String,
    },

    /// Compile a field group (JSON) into an `acf_add_local_field_group` call
    Fields {
        /// JSON file holding the field group
        group: PathBuf,
    },
}

/// Arguments of the sync command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    /// JSON payload describing the theme
    pub payload: PathBuf,

    /// What changed: all, post-type, taxonomy, block, block-group, part,
    /// template, menu-page, options-page, scss-partial, js-module, field-set
    /// or ping
    #[arg(short, long, env = "THEME_SYNC_ACTION")]
    pub action: Option<String>,

    /// Directory holding the installed themes
    #[arg(short, long, env = "THEME_SYNC_THEMES_DIR")]
    pub themes_dir: Option<PathBuf>,

    /// Directory of support files copied into includes/tw/
    #[arg(short, long, env = "THEME_SYNC_SUPPORT_DIR")]
    pub support_dir: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["theme-sync"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_sync_with_options() {
        let cli = Cli::parse_from([
            "theme-sync",
            "sync",
            "payload.json",
            "--action",
            "block",
            "--themes-dir",
            "/srv/themes",
            "--dry-run",
        ]);
        match cli.command {
            Some(Commands::Sync(args)) => {
                assert_eq!(args.payload, PathBuf::from("payload.json"));
                assert_eq!(args.action.as_deref(), Some("block"));
                assert_eq!(args.themes_dir, Some(PathBuf::from("/srv/themes")));
                assert!(args.dry_run);
                assert!(!args.json);
            }
            other => panic!("Expected sync command, got {other:?}"),
        }
    }

    #[test]
    fn parse_view_domain() {
        let cli = Cli::parse_from(["theme-sync", "-v", "view", "hero.json", "-d", "acme"]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::View {
                element: PathBuf::from("hero.json"),
                domain: "acme".to_string(),
            })
        );
    }
}
