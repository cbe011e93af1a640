//! Theme synchronization core
//!
//! Turns a theme payload into generated files:
//!
//! - **Payload**: typed entity records validated at ingestion
//! - **Commit gate**: full, incremental or skipped syncs
//! - **Entity orchestrators**: post types, taxonomies, blocks, block groups,
//!   parts, templates, menu pages, options pages, stylesheet partials and
//!   script modules
//! - **SyncEngine**: runs the orchestrators and writes the aggregates
//!
//! # Architecture
//!
//! ```text
//!                     theme-cli
//!                         |
//!                    theme-core
//!                         |
//!     +----------+--------+--------+-----------+
//!     |          |        |        |           |
//! theme-fs theme-blocks theme-view theme-fields theme-content
//! ```

pub mod action;
pub mod entities;
pub mod error;
pub mod gate;
pub mod locate;
pub mod payload;
pub mod stylesheet;
pub mod sync;

pub use action::SyncAction;
pub use entities::{EntityKind, SupportFile};
pub use error::{Error, Result};
pub use gate::{CommitGate, Decision};
pub use locate::{find_by_id, locate_theme_dir};
pub use payload::{
    Block, BlockGroup, GroupSettings, JsModule, MenuPage, OptionsFieldGroup, OptionsPage, Part,
    PartArg, PostType, ScssPartial, Taxonomy, Template, ThemePayload,
};
pub use stylesheet::Stylesheet;
pub use sync::{Aggregates, SyncEngine, SyncOptions, SyncReport, ThemeFiles};
