//! Command implementations for theme-cli

pub mod fields;
pub mod sync;
pub mod view;

pub use fields::run_fields;
pub use sync::run_sync;
pub use view::run_view;
