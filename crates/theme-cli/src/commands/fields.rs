//! Field group compilation command

use std::fs;
use std::path::Path;

use theme_fields::{build_group, parse_group};

use crate::error::Result;

/// Compile the field group in `path` and print the PHP registration.
pub fn run_fields(path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)?;
    let (group, sets) = parse_group(&json)?;
    tracing::debug!(fields = group.fields.len(), sets = sets.len(), "Parsed field group");

    println!("{}", build_group(&group, &sets));
    Ok(())
}
