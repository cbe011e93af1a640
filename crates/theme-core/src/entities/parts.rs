//! Template parts: view, stylesheet and script per part

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::php::quote;
use theme_content::spaces_to_tabs;
use theme_view::ViewCompiler;

use super::{SyncContext, prune_dir, sync_asset, view_content};
use crate::payload::Part;

static ASSET_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_?([a-z0-9-]+)\.(?:scss|js)$").expect("Invalid asset file regex"));
static VIEW_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9-]+)\.php$").expect("Invalid view file regex"));

fn view_path(name: &str) -> String {
    format!("views/parts/{name}.php")
}

fn scss_path(name: &str) -> String {
    format!("assets/scss/parts/_{name}.scss")
}

fn js_path(name: &str) -> String {
    format!("assets/js/parts/{name}.js")
}

fn style_import(name: &str) -> String {
    format!("parts/{name}")
}

fn script_import(name: &str) -> String {
    format!("./parts/{name}")
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx.payload.parts.iter().map(|p| p.name.clone()).collect();

    prune_dir(&mut ctx.files, "assets/scss/parts", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "assets/js/parts", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "views/parts", &VIEW_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for part in &payload.parts {
        let chunk = chunk(part);

        // Labels read `<name>.php`
        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .map(|label| label.trim_end_matches(".php"))
            .filter(|old| *old != part.name)
            .map(str::to_string);
        if let Some(old) = renamed {
            for path in [view_path(&old), scss_path(&old), js_path(&old)] {
                ctx.files.delete(&path);
            }
            ctx.aggregates.styles.remove(&style_import(&old));
            ctx.aggregates.scripts.remove(&script_import(&old));
        }

        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.styles,
            &scss_path(&part.name),
            &style_import(&part.name),
            &part.scss,
        );
        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.scripts,
            &js_path(&part.name),
            &script_import(&part.name),
            &part.js,
        );

        let compiler = ViewCompiler::new(&payload.domain)
            .with_templates(&part.templates)
            .with_parts(&part.parts);
        let view = view_content(&compiler, &part.view, part.view_raw.as_deref());
        ctx.files.save(&view_path(&part.name), &spaces_to_tabs(&view));

        ctx.aggregates.functions.upsert(chunk);
    }
}

/// `TW_Part::register()` with the part's arguments and their defaults.
fn chunk(part: &Part) -> Chunk {
    let mut lines = vec![ChunkType::Part.header(&format!("{}.php", part.name), part.id)];

    if part.args.is_empty() {
        lines.push(format!("TW_Part::register( {} );", quote(&part.name)));
    } else {
        lines.push("TW_Part::register(".to_string());
        lines.push(format!("\t{},", quote(&part.name)));
        lines.push("\tarray(".to_string());
        for arg in &part.args {
            let name = arg.name.trim_start_matches('$');
            let default = arg.default.as_deref().unwrap_or("null");
            lines.push(format!("\t\t{} => {default},", quote(name)));
        }
        lines.push("\t)".to_string());
        lines.push(");".to_string());
    }

    Chunk::new(ChunkType::Part, lines)
}
