//! Text primitives shared by the theme generators
//!
//! - [`TextBlock`]: a named, ordered run of generated lines
//! - [`PhpValue`] / [`ArrayArgs`]: PHP array literals with key-aligned `=>`
//! - [`code`]: normalization of raw code fragments taken from a payload
//! - [`text`]: small naming and whitespace helpers

pub mod block;
pub mod code;
pub mod php;
pub mod text;

pub use block::{TextBlock, indent, indent_lines};
pub use code::{MARKER_PATTERN, is_marker_line, normalize_code, retarget_text_domain};
pub use php::{ArrayArgs, PhpValue};
pub use text::{count_indents, slug, snake_case, spaces_to_tabs};
