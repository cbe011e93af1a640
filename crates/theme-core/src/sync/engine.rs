//! SyncEngine implementation
//!
//! One call to [`SyncEngine::sync`] processes one payload end to end: read
//! the stored header, ask the commit gate how to proceed, rebuild the
//! entities in scope and write the aggregates and the header back.

use std::time::Instant;

use theme_fs::{FileStore, NormalizedPath, ThemePath};
use tracing::info;

use super::aggregates::Aggregates;
use super::files::ThemeFiles;
use super::report::SyncReport;
use crate::Result;
use crate::action::SyncAction;
use crate::entities::{EntityKind, SupportFile, SyncContext};
use crate::gate::{CommitGate, Decision};
use crate::payload::ThemePayload;
use crate::stylesheet::Stylesheet;

/// Options for sync operations
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, simulate changes without modifying the theme.
    /// Messages are prefixed with "[dry-run] Would ..."
    pub dry_run: bool,
}

/// Engine synchronizing one theme directory with payloads.
pub struct SyncEngine<S: FileStore> {
    store: S,
    options: SyncOptions,
    support: Vec<SupportFile>,
}

impl<S: FileStore> SyncEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: SyncOptions::default(),
            support: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Support files every full sync copies into `includes/tw/`.
    pub fn with_support_files(mut self, support: Vec<SupportFile>) -> Self {
        self.support = support;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The header as currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `style.css` exists but cannot be read.
    pub fn stored_state(&self) -> Result<Stylesheet> {
        let path = NormalizedPath::new(ThemePath::Stylesheet.as_str());
        let text = self.store.read(&path)?.unwrap_or_default();
        Ok(Stylesheet::parse(&text))
    }

    /// Apply `payload` for `action`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the stored aggregates cannot be read. Write
    /// and delete failures are reported as messages.
    pub fn sync(&mut self, payload: &ThemePayload, action: SyncAction) -> Result<SyncReport> {
        let started = Instant::now();
        let stored = self.stored_state()?;
        info!(theme = payload.id, commit = payload.commit, %action, "Starting sync");

        if action == SyncAction::Ping {
            return Ok(SyncReport::new(stored.theme_id(), stored.commit()));
        }

        let full = match CommitGate::decide(payload.commit, stored.commit(), action) {
            Decision::Full => true,
            Decision::Incremental(_) => false,
            Decision::Skip => {
                let previous = stored
                    .commit()
                    .map_or_else(|| "none".to_string(), |commit| commit.to_string());
                let message = format!(
                    "Error: Commit {} does not follow the stored commit ({previous}), a full sync is required",
                    payload.commit
                );
                return Ok(SyncReport::new(stored.theme_id(), stored.commit()).with_messages([message]));
            }
        };
        let kinds = EntityKind::scope(action);

        let dry_run = self.options.dry_run;
        let files = ThemeFiles::new(&mut self.store, dry_run);
        let mut aggregates = Aggregates::load(&files)?;
        if full {
            aggregates.clear();
        }

        let mut ctx = SyncContext {
            payload,
            support: &self.support,
            files,
            aggregates,
        };
        for kind in kinds {
            if full {
                kind.prune(&mut ctx);
            }
            kind.build(&mut ctx);
        }

        let SyncContext {
            mut files,
            aggregates,
            ..
        } = ctx;
        if kinds.iter().any(|kind| kind.touches_functions()) {
            aggregates.write_functions(&mut files, &payload.domain);
        }
        if kinds.iter().any(|kind| kind.touches_styles()) {
            aggregates.write_styles(&mut files);
        }
        if kinds.iter().any(|kind| kind.touches_scripts()) {
            aggregates.write_scripts(&mut files);
        }
        files.save(ThemePath::Stylesheet.as_str(), &Stylesheet::render(payload));

        let seconds = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        files.note(format!("Finished sync in {seconds}s"));
        info!(theme = payload.id, commit = payload.commit, full, seconds, "Finished sync");

        let report = if dry_run {
            SyncReport::new(stored.theme_id(), stored.commit())
        } else {
            SyncReport::new(Some(payload.id), Some(payload.commit))
        };
        Ok(report.with_messages(files.into_messages()))
    }
}
