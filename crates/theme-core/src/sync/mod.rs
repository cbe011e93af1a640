//! Sync engine and the state it threads through the orchestrators
//!
//! - **engine**: commit gate, full and incremental rebuilds
//! - **files**: message-recording writes and deletes
//! - **aggregates**: `tw-functions.php`, `styles.scss`, `main.js`
//! - **report**: what the client gets back

mod aggregates;
mod engine;
mod files;
mod report;

pub use aggregates::{Aggregates, functions_preamble};
pub use engine::{SyncEngine, SyncOptions};
pub use files::ThemeFiles;
pub use report::SyncReport;
