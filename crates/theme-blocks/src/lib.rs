//! Chunk documents and ordered import lists.
//!
//! Generated aggregate files are never patched line by line. They are parsed
//! into addressable units, the units are replaced or appended during a sync,
//! and the whole file is serialized again at the end.
//!
//! # Chunk documents
//!
//! `tw-functions.php` is a sequence of chunks separated by one blank line.
//! The first line of each chunk is a comment naming its type and, for
//! repeatable types, the entity id:
//!
//! ```text
//! // Register block: hero (#12)
//! include get_template_directory() . '/includes/blocks/fields-hero.php';
//!
//! // Register menu page: acme-settings (#3)
//! new TW_Menu_Page(
//! ...
//! ```
//!
//! # Ordered import lists
//!
//! `styles.scss` and `main.js` hold one import per line. The trailing comment
//! persists the entry's priority and optional id:
//!
//! ```text
//! @import "partials/variables"; // 10-4
//! @import "blocks/hero"; // 1000
//! ```

pub mod assets;
pub mod chunk;
pub mod document;

pub use assets::{AssetEntry, AssetList, DEFAULT_PRIORITY, ImportStyle};
pub use chunk::{Chunk, ChunkType, Identity};
pub use document::{ChunkDocument, Upsert};
