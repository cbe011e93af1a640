//! Block groups exist only as chunks

use theme_blocks::{Chunk, ChunkType};
use theme_content::php::quote;

use super::{SyncContext, translated};
use crate::payload::BlockGroup;

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for group in &payload.block_groups {
        ctx.aggregates
            .functions
            .upsert(chunk(group, &payload.domain));
    }
}

fn chunk(group: &BlockGroup, domain: &str) -> Chunk {
    let blocks = group
        .blocks
        .iter()
        .map(|block| quote(&block.name))
        .collect::<Vec<_>>();
    let blocks = if blocks.is_empty() {
        "array()".to_string()
    } else {
        format!("array( {} )", blocks.join(", "))
    };

    Chunk::new(
        ChunkType::BlockGroup,
        [
            ChunkType::BlockGroup.header(&group.name, group.id),
            "TW_Block_Group::register(".to_string(),
            format!("\t{},", group.id),
            format!("\t{},", translated(&group.label, domain)),
            format!("\t{},", quote(&group.name)),
            format!("\t{blocks}"),
            ");".to_string(),
        ],
    )
}
