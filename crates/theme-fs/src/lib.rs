//! File store abstraction for theme synchronization
//!
//! Provides normalized theme-relative paths, atomic writes and the
//! [`FileStore`] collaborator every generator writes through.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use config::ConfigStore;
pub use constants::ThemePath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use store::{FileStore, LocalFileStore, MemoryFileStore, WriteOutcome};
