//! Compiling complete view payloads

use pretty_assertions::assert_eq;
use theme_view::{RelatedEntity, ViewCompiler, parse_elements};

const PAGE: &str = r#"[
    { "node": "header", "type": "template", "children": [] },
    { "node": "main", "type": "html", "children": [
        { "node": "h1", "type": "html", "children": [],
          "twsPhp": { "php": "<?php the_title(); ?>" } },
        { "node": "ul", "type": "html",
          "conditionGroupsPhp": { "php": "if ( have_rows( 'items' ) ) {\n    #TW001\n}" },
          "children": [
            { "node": "li", "type": "html", "children": [],
              "loopPhp": { "php": "while ( have_rows( 'items' ) ) {\n    #TW002\n}" },
              "twsPhp": { "php": "the_row(); the_sub_field( 'label' );" } }
          ] },
        { "node": "part", "type": "part", "foreignKey": 7, "children": [] },
        { "node": "part", "type": "part", "foreignKey": 8, "children": [] }
    ] },
    { "node": "footer", "type": "template", "children": [] }
]"#;

#[test]
fn compiles_a_page_view() {
    let elements = parse_elements(PAGE).unwrap();
    let parts = [RelatedEntity::new(7, "cta")];
    let view = ViewCompiler::new("acme").with_parts(&parts).compile_all(&elements);

    let expected = [
        "<?php get_header(); ?>",
        "<main>",
        "\t<h1><?php the_title(); ?></h1>",
        "\t<?php if ( have_rows( 'items' ) ) : ?>",
        "\t\t<ul>",
        "\t\t\t<?php while ( have_rows( 'items' ) ) : ?>",
        "\t\t\t\t<li><?php the_row(); the_sub_field( 'label' ); ?></li>",
        "\t\t\t<?php endwhile ?>",
        "\t\t</ul>",
        "\t<?php endif ?>",
        "\t<?php TW_Part::render( 'cta' ); ?>",
        "</main>",
        "<?php get_footer(); ?>",
    ]
    .join("\n");

    assert_eq!(view, expected);
}

#[test]
fn nested_single_child_collapses_into_parent() {
    let elements = parse_elements(
        r#"{ "node": "div", "type": "html", "children": [
            { "node": "a", "type": "html", "children": [],
              "attributesPhp": { "php": "$atts = array( 'href' => 'top' );" },
              "twsPhp": { "php": "esc_html_e( 'Top', 'x' );" } }
        ] }"#,
    )
    .unwrap();

    let view = ViewCompiler::new("acme").compile_all(&elements);
    insta::assert_snapshot!(view, @r#"<div><a href="top"><?php esc_html_e( 'Top', 'acme' ); ?></a></div>"#);
}

#[test]
fn loop_with_setup_code_keeps_the_code_block() {
    let elements = parse_elements(
        r#"{ "node": "ul", "type": "html", "children": [
            { "node": "li", "type": "html", "children": [],
              "loopPhp": { "php": "$items = get_field( 'items' );\nforeach ( $items as $item ) {\n    #TW001\n}" },
              "twsPhp": { "php": "echo esc_html( $item );" } }
        ] }"#,
    )
    .unwrap();

    let view = ViewCompiler::new("acme").compile_all(&elements);

    let expected = [
        "<ul>",
        "\t<?php",
        "\t\t$items = get_field( 'items' );",
        "\t\tforeach ( $items as $item ) {",
        "\t?>",
        "\t\t<li><?php echo esc_html( $item ); ?></li>",
        "\t<?php",
        "\t\t}",
        "\t?>",
        "</ul>",
    ]
    .join("\n");
    assert_eq!(view, expected);
}

#[test]
fn foreach_loop_uses_alternative_syntax() {
    let elements = parse_elements(
        r#"{ "node": "ul", "type": "html", "children": [
            { "node": "li", "type": "html", "children": [],
              "loopPhp": { "php": "foreach ( $items as $item ) {\n    #TW001\n}" },
              "twsPhp": { "php": "echo esc_html( $item );" } }
        ] }"#,
    )
    .unwrap();

    let view = ViewCompiler::new("acme").compile_all(&elements);

    let expected = [
        "<ul>",
        "\t<?php foreach ( $items as $item ) : ?>",
        "\t\t<li><?php echo esc_html( $item ); ?></li>",
        "\t<?php endforeach ?>",
        "</ul>",
    ]
    .join("\n");
    assert_eq!(view, expected);
}

#[test]
fn loop_without_marker_drops_the_element() {
    let elements = parse_elements(
        r#"{ "node": "ul", "type": "html", "children": [
            { "node": "li", "type": "html", "children": [],
              "loopPhp": { "php": "foreach ( $items as $item ) {\n    echo $item;\n}" } }
        ] }"#,
    )
    .unwrap();

    let view = ViewCompiler::new("acme").compile_all(&elements);

    let expected = [
        "<ul>",
        "\t<?php",
        "\t\tforeach ( $items as $item ) {",
        "\t\t\techo $item;",
        "\t\t}",
        "\t?>",
        "</ul>",
    ]
    .join("\n");
    assert_eq!(view, expected);
}
