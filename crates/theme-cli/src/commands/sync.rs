//! Sync command implementation
//!
//! Reads a payload, locates (or names) the theme directory under the
//! themes directory and applies the payload to it.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use theme_core::{SupportFile, SyncAction, SyncEngine, SyncOptions, SyncReport, ThemePayload, locate_theme_dir};
use theme_fs::LocalFileStore;

use crate::cli::SyncArgs;
use crate::config::Config;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Flags win over the configuration file. The command fails when the
/// report records any error so scripts can rely on the exit code.
pub fn run_sync(config: &Config, args: SyncArgs) -> Result<()> {
    let json = fs::read_to_string(&args.payload)?;
    let payload = ThemePayload::from_json(&json)?;

    let action: SyncAction = args
        .action
        .as_deref()
        .unwrap_or(&config.default_action)
        .parse()?;
    let themes_dir = args
        .themes_dir
        .clone()
        .unwrap_or_else(|| config.themes_dir.clone());
    let support_dir = args.support_dir.clone().or_else(|| config.support_dir.clone());

    let theme_dir = locate_theme_dir(&themes_dir, &payload)?;
    let support = match support_dir {
        Some(dir) => load_support_files(&dir)?,
        None => Vec::new(),
    };

    if !args.json {
        println!(
            "{} Syncing {} into {} ({})",
            "=>".blue().bold(),
            payload.name.cyan(),
            theme_dir.display(),
            action
        );
    }
    tracing::debug!(support = support.len(), dry_run = args.dry_run, "Starting sync");

    let mut engine = SyncEngine::new(LocalFileStore::new(&theme_dir))
        .with_options(SyncOptions {
            dry_run: args.dry_run,
        })
        .with_support_files(support);
    let report = engine.sync(&payload, action)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        let count = report.errors().count();
        Err(CliError::user(format!("Sync finished with {count} error(s)")))
    }
}

/// Every `*.php` file directly inside `dir`, sorted by name.
fn load_support_files(dir: &Path) -> Result<Vec<SupportFile>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| CliError::user(format!("Cannot read support directory {}: {e}", dir.display())))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "php"))
        .collect();
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        files.push(SupportFile::new(name, fs::read_to_string(&path)?));
    }
    Ok(files)
}

fn print_report(report: &SyncReport) {
    for message in &report.messages {
        if message.starts_with("Error:") {
            println!("   {}", message.red());
        } else if message.starts_with("Deleted:") || message.starts_with("[dry-run]") {
            println!("   {}", message.yellow());
        } else if message.starts_with("Built:") {
            println!("   {}", message.green());
        } else {
            println!("   {}", message.dimmed());
        }
    }

    let commit = report
        .commit
        .map_or_else(|| "none".to_string(), |c| c.to_string());
    if report.is_success() {
        println!("{} Theme at commit {}", "OK".green().bold(), commit);
    } else {
        println!("{} Theme at commit {}", "FAILED".red().bold(), commit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn support_files_are_php_only_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("class-part.php"), "<?php // part").unwrap();
        fs::write(temp.path().join("class-block.php"), "<?php // block").unwrap();
        fs::write(temp.path().join("README.md"), "# notes").unwrap();
        fs::create_dir(temp.path().join("nested.php")).unwrap();

        let files = load_support_files(temp.path()).unwrap();

        assert_eq!(
            files,
            vec![
                SupportFile::new("class-block.php", "<?php // block"),
                SupportFile::new("class-part.php", "<?php // part"),
            ]
        );
    }

    #[test]
    fn missing_support_directory_is_a_user_error() {
        let temp = TempDir::new().unwrap();
        let err = load_support_files(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
