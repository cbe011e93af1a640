//! ACF options pages and their field groups

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::{ArrayArgs, PhpValue};
use theme_fields::{GroupSpec, LocationRule};

use super::{SyncContext, prune_dir, translated};
use crate::payload::OptionsPage;

static FIELDS_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fields-([a-z0-9_-]+)\.php$").expect("Invalid fields file regex"));

fn fields_path(slug: &str) -> String {
    format!("includes/options-pages/fields-{slug}.php")
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx
        .payload
        .options_pages
        .iter()
        .map(|page| page.menu_slug.clone())
        .collect();
    prune_dir(&mut ctx.files, "includes/options-pages", &FIELDS_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for page in &payload.options_pages {
        let chunk = chunk(page, &payload.domain);

        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .filter(|old| *old != page.menu_slug)
            .map(str::to_string);
        if let Some(old) = renamed {
            ctx.files.delete(&fields_path(&old));
        }

        ctx.files
            .save(&fields_path(&page.menu_slug), &fields_file(page, &payload.domain));
        ctx.aggregates.functions.upsert(chunk);
    }
}

fn chunk(page: &OptionsPage, domain: &str) -> Chunk {
    let mut args = ArrayArgs::new();
    args.add("page_title", PhpValue::raw(translated(&page.page_title, domain)))
        .add("menu_title", PhpValue::raw(translated(&page.menu_title, domain)))
        .add("menu_slug", page.menu_slug.as_str())
        .add("capability", page.capability.as_str());
    if page.parent_slug.is_empty() {
        args.add("icon_url", page.icon_url.as_str());
    } else {
        args.add("parent_slug", page.parent_slug.as_str());
    }
    args.add("position", PhpValue::from_json(&page.position))
        .add("redirect", page.redirect)
        .add("autoload", page.autoload)
        .add("update_button", PhpValue::raw(translated(&page.update_button, domain)))
        .add(
            "updated_message",
            PhpValue::raw(translated(&page.updated_message, domain)),
        );

    let callback = format!("tw_options_page_{}", page.id);
    let mut lines = vec![
        ChunkType::OptionsPage.header(&page.menu_slug, page.id),
        format!("function {callback}() {{"),
        "\tacf_add_options_page(".to_string(),
        "\t\tarray(".to_string(),
    ];
    lines.extend(args.format(3));
    lines.extend([
        "\t\t)".to_string(),
        "\t);".to_string(),
        "}".to_string(),
        format!("add_action( 'acf/init', '{callback}' );"),
        format!(
            "include get_template_directory() . '/{}';",
            fields_path(&page.menu_slug)
        ),
    ]);

    Chunk::new(ChunkType::OptionsPage, lines)
}

fn fields_file(page: &OptionsPage, domain: &str) -> String {
    let settings = &page.field_group.settings;
    let title = if settings.title.is_empty() {
        format!("@php:{}", translated(&page.page_title, domain))
    } else {
        settings.title.clone()
    };

    let mut group = GroupSpec::new(
        format!("options_page_{}", page.id),
        title,
        page.field_group.fields.clone(),
    )
    .located(LocationRule::new("options_page", page.menu_slug.as_str()));
    group.menu_order = settings.menu_order;
    group.position = settings.position.clone();
    group.style = settings.style.clone();
    group.label_placement = settings.label_placement.clone();
    group.instruction_placement = settings.instruction_placement.clone();

    format!(
        "<?php\n\n// Register ACF field group for options page: {}\n{}\n",
        page.menu_slug,
        theme_fields::build_group(&group, &page.field_sets)
    )
}
