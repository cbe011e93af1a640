//! View compilation command

use std::fs;
use std::path::Path;

use theme_view::{ViewCompiler, parse_elements};

use crate::error::Result;

/// Compile the element tree in `path` and print the PHP view.
///
/// Template and part references have no related entities to resolve
/// against here, so they compile to their unresolved form.
pub fn run_view(path: &Path, domain: &str) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let nodes = parse_elements(&json)?;
    tracing::debug!(count = nodes.len(), "Parsed elements");

    let view = ViewCompiler::new(domain).compile_all(&nodes);
    println!("{view}");
    Ok(())
}
