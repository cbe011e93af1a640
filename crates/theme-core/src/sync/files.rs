//! Message-recording file access for one sync

use theme_fs::{FileStore, NormalizedPath, WriteOutcome};
use tracing::warn;

use super::report::kilobytes;
use crate::Result;

/// Wraps the theme's [`FileStore`] and records every change as a report
/// message.
///
/// Write and delete failures are recorded, never returned: one unwritable
/// file must not abort the rest of the sync. In dry-run mode nothing is
/// written and messages are prefixed with `[dry-run] Would`.
pub struct ThemeFiles<'a> {
    store: &'a mut dyn FileStore,
    dry_run: bool,
    messages: Vec<String>,
}

impl<'a> ThemeFiles<'a> {
    pub fn new(store: &'a mut dyn FileStore, dry_run: bool) -> Self {
        Self {
            store,
            dry_run,
            messages: Vec::new(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Read a theme file, `None` when it does not exist.
    pub fn read(&self, path: &str) -> Result<Option<String>> {
        Ok(self.store.read(&NormalizedPath::relative(path)?)?)
    }

    pub fn exists(&self, path: &str) -> bool {
        matches!(self.read(path), Ok(Some(_)))
    }

    /// Write `content` unless the file already holds it.
    pub fn save(&mut self, path: &str, content: &str) {
        let target = match NormalizedPath::relative(path) {
            Ok(target) => target,
            Err(e) => {
                warn!(path, error = %e, "Refusing to write file");
                self.messages
                    .push(format!("Error: Cannot create the file \"{path}\""));
                return;
            }
        };

        if self.dry_run {
            match self.store.read(&target) {
                Ok(Some(existing)) if existing == content => {}
                _ => self.messages.push(format!(
                    "[dry-run] Would build: {target} ({} KB)",
                    kilobytes(content.len())
                )),
            }
            return;
        }

        match self.store.write(&target, content) {
            Ok(WriteOutcome::Written { bytes }) => self
                .messages
                .push(format!("Built: {target} ({} KB)", kilobytes(bytes))),
            Ok(WriteOutcome::Unchanged) => {}
            Err(e) => {
                warn!(path = %target, error = %e, "Failed to write file");
                self.messages
                    .push(format!("Error: Cannot create the file \"{target}\""));
            }
        }
    }

    /// Delete a file if it exists.
    pub fn delete(&mut self, path: &str) {
        let Ok(target) = NormalizedPath::relative(path) else {
            warn!(path, "Refusing to delete file outside the theme");
            self.messages
                .push(format!("Error: Cannot delete the file \"{path}\""));
            return;
        };

        if self.dry_run {
            if matches!(self.store.read(&target), Ok(Some(_))) {
                self.messages
                    .push(format!("[dry-run] Would delete: {target}"));
            }
            return;
        }

        match self.store.delete(&target) {
            Ok(true) => self.messages.push(format!("Deleted: {target}")),
            Ok(false) => {}
            Err(e) => {
                warn!(path = %target, error = %e, "Failed to delete file");
                self.messages
                    .push(format!("Error: Cannot delete the file \"{target}\""));
            }
        }
    }

    /// File names directly inside `dir`. Listing failures are recorded and
    /// yield an empty list.
    pub fn list(&mut self, dir: &str) -> Vec<String> {
        let listed = NormalizedPath::relative(dir)
            .map_err(crate::Error::from)
            .and_then(|target| Ok(self.store.list(&target)?));
        match listed {
            Ok(names) => names,
            Err(e) => {
                warn!(dir, error = %e, "Failed to list directory");
                self.messages
                    .push(format!("Error: Cannot list the directory \"{dir}\""));
                Vec::new()
            }
        }
    }

    /// Record a free-form message.
    pub fn note(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
