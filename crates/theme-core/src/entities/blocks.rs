//! Content blocks: fields file, view, stylesheet and script per block

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::php::quote;
use theme_content::{slug, spaces_to_tabs};
use theme_view::ViewCompiler;

use super::{SyncContext, prune_dir, sync_asset, translated, view_content};
use crate::payload::Block;

static FIELDS_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fields-([a-z0-9-]+)\.php$").expect("Invalid fields file regex"));
static ASSET_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_?([a-z0-9-]+)\.(?:scss|js)$").expect("Invalid asset file regex"));
static VIEW_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9-]+)\.php$").expect("Invalid view file regex"));

struct BlockPaths {
    fields: String,
    view: String,
    scss: String,
    js: String,
    style_import: String,
    script_import: String,
}

impl BlockPaths {
    fn new(name: &str) -> Self {
        let slug = slug(name);
        Self {
            fields: format!("includes/blocks/fields-{slug}.php"),
            view: format!("views/blocks/{slug}.php"),
            scss: format!("assets/scss/blocks/_{slug}.scss"),
            js: format!("assets/js/blocks/{slug}.js"),
            style_import: format!("blocks/{slug}"),
            script_import: format!("./blocks/{slug}"),
        }
    }
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx.payload.blocks.iter().map(|b| slug(&b.name)).collect();

    prune_dir(&mut ctx.files, "includes/blocks", &FIELDS_FILE, &keep);
    prune_dir(&mut ctx.files, "assets/scss/blocks", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "assets/js/blocks", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "views/blocks", &VIEW_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for block in &payload.blocks {
        let chunk = chunk(block);

        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .filter(|old| *old != block.name)
            .map(str::to_string);
        if let Some(old) = renamed {
            delete_renamed(ctx, &old);
        }

        let paths = BlockPaths::new(&block.name);
        ctx.files.save(&paths.fields, &fields_file(block, &payload.domain));

        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.styles,
            &paths.scss,
            &paths.style_import,
            &block.scss,
        );
        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.scripts,
            &paths.js,
            &paths.script_import,
            &block.js,
        );

        let compiler = ViewCompiler::new(&payload.domain)
            .with_templates(&block.templates)
            .with_parts(&block.parts);
        let view = view_content(&compiler, &block.view, block.view_raw.as_deref());
        ctx.files.save(&paths.view, &spaces_to_tabs(&view));

        ctx.aggregates.functions.upsert(chunk);
    }
}

/// Files and imports of a block under its previous name. The chunk is
/// replaced by the following upsert.
fn delete_renamed(ctx: &mut SyncContext<'_>, name: &str) {
    let paths = BlockPaths::new(name);
    for path in [&paths.fields, &paths.view, &paths.scss, &paths.js] {
        ctx.files.delete(path);
    }
    ctx.aggregates.styles.remove(&paths.style_import);
    ctx.aggregates.scripts.remove(&paths.script_import);
}

fn chunk(block: &Block) -> Chunk {
    let slug = slug(&block.name);
    Chunk::new(
        ChunkType::Block,
        [
            ChunkType::Block.header(&block.name, block.id),
            format!("include get_template_directory() . '/includes/blocks/fields-{slug}.php';"),
        ],
    )
}

/// `TW_Block::register()` call with the block's compiled fields.
fn fields_file(block: &Block, domain: &str) -> String {
    let mut lines = vec![
        "<?php".to_string(),
        String::new(),
        format!("// Register ACF field group for block: {}", block.name),
        "TW_Block::register(".to_string(),
        format!("\t{},", translated(&block.label, domain)),
        format!("\t{},", quote(&block.name)),
        "\tarray(".to_string(),
    ];

    let prefix = format!("field_block_{}_", block.id);
    let fields = theme_fields::build_fields(&block.fields, &block.field_sets, 2, &prefix);
    if !fields.is_empty() {
        lines.push(fields);
    }

    lines.push("\t)".to_string());
    lines.push(");".to_string());
    lines.join("\n") + "\n"
}
