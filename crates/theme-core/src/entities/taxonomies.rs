//! Taxonomies: registration, post type relations and field group files

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::php::quote;
use theme_fields::{GroupSpec, LocationRule};

use super::registration::registration_args;
use super::{SyncContext, prune_dir};
use crate::payload::Taxonomy;

static TAXONOMY_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:fields|register)-([a-z0-9_-]+)\.php$").expect("Invalid taxonomy file regex")
});

const DIR: &str = "includes/taxonomies";

const RESERVED: [&str; 4] = ["category", "post_tag", "post_format", "link_category"];

fn register_path(key: &str) -> String {
    format!("{DIR}/register-{key}.php")
}

fn fields_path(key: &str) -> String {
    format!("{DIR}/fields-{key}.php")
}

fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx
        .payload
        .taxonomies
        .iter()
        .map(|taxonomy| taxonomy.taxonomy.clone())
        .collect();
    prune_dir(&mut ctx.files, DIR, &TAXONOMY_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for taxonomy in &payload.taxonomies {
        let key = &taxonomy.taxonomy;
        let chunk = chunk(taxonomy);

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
                .save(&register_path(key), &register_file(taxonomy, &payload.domain));
        }

        if taxonomy.fields.is_empty() {
            ctx.files.delete(&fields_path(key));
        } else {
            ctx.files.save(&fields_path(key), &fields_file(taxonomy));
        }

        ctx.aggregates.functions.upsert(chunk);
    }
}

/// The object type argument: one key as a string, several as an array.
fn object_type(keys: &[String]) -> String {
    match keys {
        [single] => quote(single),
        _ => {
            let quoted: Vec<String> = keys.iter().map(|key| quote(key)).collect();
            if quoted.is_empty() {
                "array()".to_string()
            } else {
                format!("array( {} )", quoted.join(", "))
            }
        }
    }
}

fn register_file(taxonomy: &Taxonomy, domain: &str) -> String {
    let key = &taxonomy.taxonomy;
    let callback = format!("tw_register_taxonomy_{}", taxonomy.id);
    let args = registration_args(&taxonomy.args, domain, |label| {
        let context = match label {
            "name" => "taxonomy general name",
            "singular_name" => "taxonomy singular name",
            "most_used" => key.as_str(),
            _ => return None,
        };
        Some(context.to_string())
    });

    let mut lines = vec![
        "<?php".to_string(),
        String::new(),
        format!("// Register custom taxonomy: {key}"),
        format!("function {callback}() {{"),
        "\tregister_taxonomy(".to_string(),
        format!("\t\t{},", quote(key)),
        format!("\t\t{},", object_type(&taxonomy.post_type_keys)),
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

fn chunk(taxonomy: &Taxonomy) -> Chunk {
    let key = &taxonomy.taxonomy;
    let mut lines = vec![ChunkType::Taxonomy.header(key, taxonomy.id)];

    if is_reserved(key) {
        // Built-ins start out attached to posts only
        let keys = &taxonomy.post_type_keys;
        if keys.as_slice() != ["post"] {
            let callback = format!("tw_change_taxonomy_post_type_relations_{}", taxonomy.id);
            lines.push(format!("function {callback}() {{"));
            for post_type in keys.iter().filter(|post_type| *post_type != "post") {
                lines.push(format!(
                    "\tregister_taxonomy_for_object_type( {}, {} );",
                    quote(key),
                    quote(post_type)
                ));
            }
            if !keys.iter().any(|post_type| post_type == "post") {
                lines.push(format!(
                    "\tunregister_taxonomy_for_object_type( {}, 'post' );",
                    quote(key)
                ));
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

    if !taxonomy.fields.is_empty() {
        lines.push(format!(
            "include get_template_directory() . '/{}';",
            fields_path(key)
        ));
    }

    Chunk::new(ChunkType::Taxonomy, lines)
}

fn fields_file(taxonomy: &Taxonomy) -> String {
    let key = &taxonomy.taxonomy;
    let mut group = GroupSpec::new(
        format!("taxonomy_{}", taxonomy.id),
        format!("Taxonomy: {key}"),
        taxonomy.fields.clone(),
    )
    .located(LocationRule::new("taxonomy", key.as_str()));
    group.label_placement = "left".to_string();

    format!(
        "<?php\n\n// Register ACF field group for taxonomy: {key}\n{}\n",
        theme_fields::build_group(&group, &taxonomy.field_sets)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn taxonomy(value: Value) -> Taxonomy {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(&[], "array()")]
    #[case(&["book"], "'book'")]
    #[case(&["book", "post"], "array( 'book', 'post' )")]
    fn object_type_is_a_string_for_one_key(#[case] keys: &[&str], #[case] expected: &str) {
        let keys: Vec<String> = keys.iter().map(|key| key.to_string()).collect();
        assert_eq!(object_type(&keys), expected);
    }

    #[test]
    fn custom_taxonomy_is_registered_for_its_post_types() {
        let genre = taxonomy(json!({
            "id": 4,
            "taxonomy": "genre",
            "postTypeKeys": ["book", "post"],
            "args": {
                "hierarchical": true,
                "labels": { "name": "Genres", "mostUsed": "Popular" }
            }
        }));

        assert_eq!(
            chunk(&genre).lines(),
            [
                "// Register taxonomy: genre (#4)",
                "include get_template_directory() . '/includes/taxonomies/register-genre.php';",
            ]
        );
        assert_eq!(
            register_file(&genre, "acme"),
            "<?php\n\
             \n\
             // Register custom taxonomy: genre\n\
             function tw_register_taxonomy_4() {\n\
             \tregister_taxonomy(\n\
             \t\t'genre',\n\
             \t\tarray( 'book', 'post' ),\n\
             \t\tarray(\n\
             \t\t\t'hierarchical' => true,\n\
             \t\t\t'labels'       => array(\n\
             \t\t\t\t'most_used' => _x( 'Popular', 'genre', 'acme' ),\n\
             \t\t\t\t'name'      => _x( 'Genres', 'taxonomy general name', 'acme' ),\n\
             \t\t\t),\n\
             \t\t)\n\
             \t);\n\
             }\n\
             add_action( 'init', 'tw_register_taxonomy_4' );\n"
        );
    }

    #[test]
    fn built_in_taxonomy_moves_between_post_types() {
        let category = taxonomy(json!({
            "id": 5,
            "taxonomy": "category",
            "postTypeKeys": ["book"],
            "fields": [{ "name": "color", "type": "color_picker" }]
        }));

        assert_eq!(
            chunk(&category).lines(),
            [
                "// Register taxonomy: category (#5)",
                "function tw_change_taxonomy_post_type_relations_5() {",
                "\tregister_taxonomy_for_object_type( 'category', 'book' );",
                "\tunregister_taxonomy_for_object_type( 'category', 'post' );",
                "}",
                "add_action( 'init', 'tw_change_taxonomy_post_type_relations_5' );",
                "include get_template_directory() . '/includes/taxonomies/fields-category.php';",
            ]
        );
    }

    #[test]
    fn built_in_taxonomy_on_posts_is_left_alone() {
        let tag = taxonomy(json!({ "id": 6, "taxonomy": "post_tag", "postTypeKeys": ["post"] }));
        assert_eq!(chunk(&tag).lines(), ["// Register taxonomy: post_tag (#6)"]);
    }
}
