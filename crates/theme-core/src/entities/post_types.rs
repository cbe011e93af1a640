//! Post types: registration and field group files
//!
//! Built-in post types are never registered again; their chunk only removes
//! the default supports the payload switched off.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use theme_blocks::{Chunk, ChunkType};
use theme_content::PhpValue;
use theme_fields::{GroupSpec, LocationRule};

use super::registration::{feature_name, is_truthy, registration_args};
use super::{SyncContext, prune_dir};
use crate::payload::PostType;

static POST_TYPE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:fields|register)-([a-z0-9_-]+)\.php$").expect("Invalid post type file regex")
});

const DIR: &str = "includes/post-types";

const RESERVED: [&str; 5] = ["post", "page", "attachment", "revision", "nav_menu_item"];

fn register_path(key: &str) -> String {
    format!("{DIR}/register-{key}.php")
}

fn fields_path(key: &str) -> String {
    format!("{DIR}/fields-{key}.php")
}

fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

/// Supports WordPress enables for a built-in post type.
fn default_supports(key: &str) -> &'static [&'static str] {
    match key {
        "post" => &[
            "title",
            "editor",
            "author",
            "thumbnail",
            "excerpt",
            "trackbacks",
            "custom-fields",
            "comments",
            "revisions",
            "post-formats",
        ],
        "page" => &[
            "title",
            "editor",
            "author",
            "thumbnail",
            "page-attributes",
            "custom-fields",
            "comments",
            "revisions",
        ],
        "attachment" => &["title", "author", "comments"],
        _ => &[],
    }
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx
        .payload
        .post_types
        .iter()
        .map(|post_type| post_type.post_type.clone())
        .collect();
    prune_dir(&mut ctx.files, DIR, &POST_TYPE_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for post_type in &payload.post_types {
        let key = &post_type.post_type;
        let chunk = chunk(post_type);

        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .filter(|old| *old != key.as_str())
            .map(str::to_string);
        if let Some(old) = renamed {
            ctx.files.delete(&register_path(&old));
            ctx.files.delete(&fields_path(&old));
        }

        if is_reserved(key) {
            ctx.files.delete(&register_path(key));
        } else {
            ctx.files
                .save(&register_path(key), &register_file(post_type, &payload.domain));
        }

        if post_type.fields.is_empty() {
            ctx.files.delete(&fields_path(key));
        } else {
            ctx.files.save(&fields_path(key), &fields_file(post_type));
        }

        ctx.aggregates.functions.upsert(chunk);
    }
}

/// `_x()` context of a post type label, when it has one.
fn label_context(label: &str) -> Option<String> {
    let context = match label {
        "name" => "post type general name",
        "singular_name" => "post type singular name",
        "add_new" | "featured_image" | "set_featured_image" | "remove_featured_image"
        | "use_featured_image" => "post",
        _ => return None,
    };
    Some(context.to_string())
}

fn register_file(post_type: &PostType, domain: &str) -> String {
    let key = &post_type.post_type;
    let callback = format!("tw_register_post_type_{}", post_type.id);
    let args = registration_args(&post_type.args, domain, label_context);

    let mut lines = vec![
        "<?php".to_string(),
        String::new(),
        format!("// Register custom post type: {key}"),
        format!("function {callback}() {{"),
        "\tregister_post_type(".to_string(),
        format!("\t\t'{key}',"),
        "\t\tarray(".to_string(),
    ];
    lines.extend(args.format(3));
    lines.extend([
        "\t\t)".to_string(),
        "\t);".to_string(),
        "}".to_string(),
        format!("add_action( 'init', '{callback}' );"),
    ]);

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Default supports of a built-in post type that the payload switches off.
/// Without a `supports` object nothing is removed.
fn removed_supports(post_type: &PostType) -> Vec<&'static str> {
    let Some(Value::Object(supports)) = post_type.args.get("supports") else {
        return Vec::new();
    };
    default_supports(&post_type.post_type)
        .iter()
        .copied()
        .filter(|feature| {
            !supports
                .iter()
                .any(|(key, on)| feature_name(key) == *feature && is_truthy(&PhpValue::from_json(on)))
        })
        .collect()
}

fn chunk(post_type: &PostType) -> Chunk {
    let key = &post_type.post_type;
    let mut lines = vec![ChunkType::PostType.header(key, post_type.id)];

    if is_reserved(key) {
        let removed = removed_supports(post_type);
        if !removed.is_empty() {
            let callback = format!("tw_remove_post_type_supports_{}", post_type.id);
            lines.push(format!("function {callback}() {{"));
            for feature in removed {
                lines.push(format!("\tremove_post_type_support( '{key}', '{feature}' );"));
            }
            lines.push("}".to_string());
            lines.push(format!("add_action( 'init', '{callback}' );"));
        }
    } else {
        lines.push(format!(
            "include get_template_directory() . '/{}';",
            register_path(key)
        ));
    }

    if !post_type.fields.is_empty() {
        lines.push(format!(
            "include get_template_directory() . '/{}';",
            fields_path(key)
        ));
    }

    Chunk::new(ChunkType::PostType, lines)
}

fn fields_file(post_type: &PostType) -> String {
    let key = &post_type.post_type;
    let mut group = GroupSpec::new(
        format!("post_type_{}", post_type.id),
        format!("Post type: {key}"),
        post_type.fields.clone(),
    )
    .located(LocationRule::new("post_type", key.as_str()));
    group.label_placement = "left".to_string();

    format!(
        "<?php\n\n// Register ACF field group for post type: {key}\n{}\n",
        theme_fields::build_group(&group, &post_type.field_sets)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn post_type(value: Value) -> PostType {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn custom_post_type_is_registered_from_its_file() {
        let books = post_type(json!({
            "id": 3,
            "postType": "book",
            "args": {
                "label": "Books",
                "public": true,
                "menuIcon": "dashicons-book",
                "supports": { "title": true, "editor": true }
            }
        }));

        assert_eq!(
            chunk(&books).lines(),
            [
                "// Register post type: book (#3)",
                "include get_template_directory() . '/includes/post-types/register-book.php';",
            ]
        );
        assert_eq!(
            register_file(&books, "acme"),
            "<?php\n\
             \n\
             // Register custom post type: book\n\
             function tw_register_post_type_3() {\n\
             \tregister_post_type(\n\
             \t\t'book',\n\
             \t\tarray(\n\
             \t\t\t'label'     => __( 'Books', 'acme' ),\n\
             \t\t\t'menu_icon' => 'dashicons-book',\n\
             \t\t\t'public'    => true,\n\
             \t\t\t'supports'  => array(\n\
             \t\t\t\t'editor',\n\
             \t\t\t\t'title',\n\
             \t\t\t),\n\
             \t\t)\n\
             \t);\n\
             }\n\
             add_action( 'init', 'tw_register_post_type_3' );\n"
        );
    }

    #[test]
    fn built_in_post_type_only_removes_supports() {
        let page = post_type(json!({
            "id": 1,
            "postType": "page",
            "args": {
                "supports": {
                    "title": true,
                    "editor": true,
                    "author": true,
                    "thumbnail": true,
                    "pageAttributes": true,
                    "customFields": false,
                    "revisions": true
                }
            },
            "fields": [{ "name": "subtitle", "type": "text" }]
        }));

        assert_eq!(
            chunk(&page).lines(),
            [
                "// Register post type: page (#1)",
                "function tw_remove_post_type_supports_1() {",
                "\tremove_post_type_support( 'page', 'custom-fields' );",
                "\tremove_post_type_support( 'page', 'comments' );",
                "}",
                "add_action( 'init', 'tw_remove_post_type_supports_1' );",
                "include get_template_directory() . '/includes/post-types/fields-page.php';",
            ]
        );
    }

    #[test]
    fn built_in_post_type_without_supports_keeps_defaults() {
        let post = post_type(json!({ "id": 2, "postType": "post" }));
        assert_eq!(chunk(&post).lines(), ["// Register post type: post (#2)"]);
    }
}
