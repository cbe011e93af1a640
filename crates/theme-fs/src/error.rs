//! Errors raised by theme file stores and settings files

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating, filling or moving a generated file into place failed.
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another writer holds the lock on a generated file.
    #[error("Theme file is locked by another writer: {path}")]
    Locked { path: PathBuf },

    /// Absolute paths and `..` segments never reach the store.
    #[error("Path escapes the theme directory: {path}")]
    UnsafePath { path: String },

    #[error("Invalid {format} settings in {path}: {message}")]
    InvalidSettings {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Cannot encode settings as {format} for {path}: {message}")]
    EncodeSettings {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Unsupported settings file extension: {extension:?}")]
    UnsupportedSettingsFormat { extension: String },
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn delete(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Delete {
            path: path.into(),
            source,
        }
    }

    pub fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::List {
            path: path.into(),
            source,
        }
    }
}
