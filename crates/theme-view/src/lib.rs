//! View compilation for generated themes.
//!
//! An element tree from the payload (markup nodes, template and part
//! references, free PHP) is compiled into the lines of a PHP view file.
//! Conditions and loops arrive as code fragments with a placeholder line
//! (`#TW...`) marking where the element itself belongs; the compiler splices
//! the compiled element into that position.

pub mod compiler;
pub mod error;
pub mod ir;
pub mod node;

pub use compiler::{VOID_TAGS, ViewCompiler};
pub use error::{Error, Result};
pub use node::{ElementKind, ElementNode, RelatedEntity, parse_elements};
