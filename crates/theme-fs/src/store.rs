//! The file store collaborator used by every generator.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result, io};

/// Result of writing a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file already held exactly this content
    Unchanged,
    /// The file was created or replaced
    Written { bytes: usize },
}

/// Read/write access to one theme directory.
///
/// Paths are relative to the theme root.
pub trait FileStore {
    /// Read a file, `None` when it does not exist.
    fn read(&self, path: &NormalizedPath) -> Result<Option<String>>;

    /// Write a file unless it already holds `content`.
    fn write(&mut self, path: &NormalizedPath, content: &str) -> Result<WriteOutcome>;

    /// Delete a file. Returns `false` when there was nothing to delete.
    fn delete(&mut self, path: &NormalizedPath) -> Result<bool>;

    /// File names (not paths) directly inside `dir`, sorted.
    fn list(&self, dir: &NormalizedPath) -> Result<Vec<String>>;

    fn exists(&self, path: &NormalizedPath) -> Result<bool> {
        Ok(self.read(path)?.is_some())
    }
}

/// A [`FileStore`] rooted at a theme directory on disk.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &NormalizedPath) -> PathBuf {
        self.root.join(path.to_native())
    }
}

impl FileStore for LocalFileStore {
    fn read(&self, path: &NormalizedPath) -> Result<Option<String>> {
        io::read_text_if_exists(&self.resolve(path))
    }

    fn write(&mut self, path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
        let native = self.resolve(path);
        if io::read_text_if_exists(&native)?.as_deref() == Some(content) {
            return Ok(WriteOutcome::Unchanged);
        }
        io::write_atomic(&native, content.as_bytes())?;
        tracing::debug!(path = %path, bytes = content.len(), "wrote file");
        Ok(WriteOutcome::Written {
            bytes: content.len(),
        })
    }

    fn delete(&mut self, path: &NormalizedPath) -> Result<bool> {
        let native = self.resolve(path);
        match fs::remove_file(&native) {
            Ok(()) => {
                tracing::debug!(path = %path, "deleted file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::delete(native, e)),
        }
    }

    fn list(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        let native = self.resolve(dir);
        let entries = match fs::read_dir(&native) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::list(native, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::list(&native, e))?;
            let is_file = entry
                .file_type()
                .map_err(|e| Error::list(entry.path(), e))?
                .is_file();
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// An in-memory [`FileStore`], used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    files: BTreeMap<String, String>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of an existing file.
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.files
            .insert(NormalizedPath::new(path).as_str().to_string(), content.into());
        self
    }

    /// Direct access to a stored file.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .get(NormalizedPath::new(path).as_str())
            .map(String::as_str)
    }

    /// All stored paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl FileStore for MemoryFileStore {
    fn read(&self, path: &NormalizedPath) -> Result<Option<String>> {
        Ok(self.files.get(path.as_str()).cloned())
    }

    fn write(&mut self, path: &NormalizedPath, content: &str) -> Result<WriteOutcome> {
        if self.files.get(path.as_str()).map(String::as_str) == Some(content) {
            return Ok(WriteOutcome::Unchanged);
        }
        self.files
            .insert(path.as_str().to_string(), content.to_string());
        Ok(WriteOutcome::Written {
            bytes: content.len(),
        })
    }

    fn delete(&mut self, path: &NormalizedPath) -> Result<bool> {
        Ok(self.files.remove(path.as_str()).is_some())
    }

    fn list(&self, dir: &NormalizedPath) -> Result<Vec<String>> {
        let prefix = if dir.as_str().is_empty() {
            String::new()
        } else {
            format!("{}/", dir.as_str())
        };

        // BTreeMap keys are already sorted
        Ok(self
            .files
            .keys()
            .filter_map(|key| key.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_write_reports_unchanged_content() {
        let mut store = MemoryFileStore::new();
        let path = NormalizedPath::new("views/parts/hero.php");

        assert_eq!(
            store.write(&path, "<div></div>").unwrap(),
            WriteOutcome::Written { bytes: 11 }
        );
        assert_eq!(
            store.write(&path, "<div></div>").unwrap(),
            WriteOutcome::Unchanged
        );
    }

    #[test]
    fn memory_store_lists_direct_children_only() {
        let store = MemoryFileStore::new()
            .with_file("style.css", "")
            .with_file("views/parts/a.php", "")
            .with_file("views/parts/b.php", "")
            .with_file("views/parts/nested/c.php", "");

        assert_eq!(
            store.list(&NormalizedPath::new("views/parts")).unwrap(),
            vec!["a.php".to_string(), "b.php".to_string()]
        );
        assert_eq!(
            store.list(&NormalizedPath::new("")).unwrap(),
            vec!["style.css".to_string()]
        );
    }

    #[test]
    fn memory_store_delete_reports_missing_files() {
        let mut store = MemoryFileStore::new().with_file("a.php", "x");
        assert!(store.delete(&NormalizedPath::new("a.php")).unwrap());
        assert!(!store.delete(&NormalizedPath::new("a.php")).unwrap());
    }
}
