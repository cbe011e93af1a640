//! Theme template files and page-template field groups

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::php::quote;
use theme_content::spaces_to_tabs;
use theme_fields::{GroupSpec, LocationRule};
use theme_view::ViewCompiler;

use super::{SyncContext, prune_dir, sync_asset, view_content};
use crate::payload::Template;

static FIELDS_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fields-([a-z0-9-]+)\.php$").expect("Invalid fields file regex"));
static ASSET_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_?([a-z0-9-]+)\.(?:scss|js)$").expect("Invalid asset file regex"));
static VIEW_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9-]+)\.php$").expect("Invalid view file regex"));

/// Root files that share the template naming scheme but are not templates.
const RESERVED: [&str; 2] = ["functions", "tw-functions"];

struct TemplatePaths {
    fields: String,
    view: String,
    scss: String,
    js: String,
    style_import: String,
    script_import: String,
}

impl TemplatePaths {
    fn new(name: &str) -> Self {
        Self {
            fields: format!("includes/templates/fields-{name}.php"),
            view: format!("{name}.php"),
            scss: format!("assets/scss/templates/_{name}.scss"),
            js: format!("assets/js/templates/{name}.js"),
            style_import: format!("templates/{name}"),
            script_import: format!("./templates/{name}"),
        }
    }
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let mut keep: Vec<String> = ctx.payload.templates.iter().map(|t| t.name.clone()).collect();
    keep.extend(RESERVED.iter().map(|name| name.to_string()));

    prune_dir(&mut ctx.files, "includes/templates", &FIELDS_FILE, &keep);
    prune_dir(&mut ctx.files, "assets/scss/templates", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "assets/js/templates", &ASSET_FILE, &keep);
    prune_dir(&mut ctx.files, "", &VIEW_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for template in &payload.templates {
        let chunk = chunk(template);

        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .map(|label| label.trim_end_matches(".php"))
            .filter(|old| *old != template.name && !RESERVED.contains(old))
            .map(str::to_string);
        if let Some(old) = renamed {
            let paths = TemplatePaths::new(&old);
            for path in [&paths.fields, &paths.view, &paths.scss, &paths.js] {
                ctx.files.delete(path);
            }
            ctx.aggregates.styles.remove(&paths.style_import);
            ctx.aggregates.scripts.remove(&paths.script_import);
        }

        let paths = TemplatePaths::new(&template.name);
        if template.has_fields() {
            ctx.files.save(&paths.fields, &fields_file(template));
        } else {
            ctx.files.delete(&paths.fields);
        }

        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.styles,
            &paths.scss,
            &paths.style_import,
            &template.scss,
        );
        sync_asset(
            &mut ctx.files,
            &mut ctx.aggregates.scripts,
            &paths.js,
            &paths.script_import,
            &template.js,
        );

        let compiler = ViewCompiler::new(&payload.domain)
            .with_templates(&template.templates)
            .with_parts(&template.parts)
            .with_groups(&template.block_groups);
        let mut view = view_content(&compiler, &template.view, template.view_raw.as_deref());
        if template.is_page_template() && template.name != "page" {
            view = format!("<?php /* Template name: {} */ ?>\n{view}", template.name);
        }
        ctx.files.save(&paths.view, &spaces_to_tabs(&view));

        ctx.aggregates.functions.upsert(chunk);
    }
}

/// Block group locations and the fields include for one template.
fn chunk(template: &Template) -> Chunk {
    let location = quote(&template.location_value());
    let mut lines = vec![ChunkType::Template.header(&format!("{}.php", template.name), template.id)];

    for group in &template.block_groups {
        lines.extend([
            "TW_Block_Group::add_location(".to_string(),
            format!("\t{},", quote(&group.name)),
            "\tarray(".to_string(),
            "\t\t'param'    => 'page_template',".to_string(),
            "\t\t'operator' => '==',".to_string(),
            format!("\t\t'value'    => {location},"),
            "\t)".to_string(),
            ");".to_string(),
        ]);
    }

    if template.has_fields() {
        lines.push(format!(
            "include get_template_directory() . '/includes/templates/fields-{}.php';",
            template.name
        ));
    }

    Chunk::new(ChunkType::Template, lines)
}

fn fields_file(template: &Template) -> String {
    let location = template.location_value();
    let mut group = GroupSpec::new(
        format!("template_{}", template.id),
        format!("Page template: {location}"),
        template.fields.clone(),
    )
    .located(LocationRule::new("page_template", location.as_str()));
    group.label_placement = "left".to_string();

    format!(
        "<?php\n\n// Register ACF field group for page template: {location}\n{}\n",
        theme_fields::build_group(&group, &template.field_sets)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn chunk_adds_block_group_locations() {
        let template: Template = serde_json::from_value(json!({
            "id": 2,
            "name": "landing",
            "type": "template",
            "blockGroups": [{ "id": 1, "name": "content" }]
        }))
        .unwrap();

        assert_eq!(
            chunk(&template).render(),
            "// Template specific options: landing.php (#2)\nTW_Block_Group::add_location(\n\t'content',\n\tarray(\n\t\t'param'    => 'page_template',\n\t\t'operator' => '==',\n\t\t'value'    => 'landing.php',\n\t)\n);"
        );
    }

    #[test]
    fn fields_are_included_only_for_page_templates() {
        let template: Template = serde_json::from_value(json!({
            "id": 3,
            "name": "single",
            "type": "wp-template",
            "fields": [{ "type": "text", "name": "subtitle" }]
        }))
        .unwrap();

        assert_eq!(chunk(&template).lines(), ["// Template specific options: single.php (#3)"]);
    }
}
