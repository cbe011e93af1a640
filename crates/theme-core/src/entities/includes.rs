//! Support files shared by every generated theme

use theme_blocks::{Chunk, ChunkType};
use tracing::debug;

use super::SyncContext;

const SUPPORT_DIR: &str = "includes/tw";

/// A support file copied verbatim into `includes/tw/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportFile {
    pub name: String,
    pub content: String,
}

impl SupportFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Copy the support files, delete stale ones and register the include chunk.
/// Without support files the directory is left alone and no chunk is added.
pub(super) fn build(ctx: &mut SyncContext<'_>) {
    if ctx.support.is_empty() {
        debug!("No support files configured");
        return;
    }

    for existing in ctx.files.list(SUPPORT_DIR) {
        if !ctx.support.iter().any(|file| file.name == existing) {
            ctx.files.delete(&format!("{SUPPORT_DIR}/{existing}"));
        }
    }

    let mut lines = vec![ChunkType::Includes.prefix().to_string()];
    for file in ctx.support {
        let path = format!("{SUPPORT_DIR}/{}", file.name);
        ctx.files.save(&path, &file.content);
        lines.push(format!("include get_stylesheet_directory() . '/{path}';"));
    }

    ctx.aggregates.functions.upsert(Chunk::new(ChunkType::Includes, lines));
}
