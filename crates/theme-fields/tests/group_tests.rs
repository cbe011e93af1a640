//! Field groups compiled end to end from payload JSON

use pretty_assertions::assert_eq;
use theme_fields::{build_group, parse_group};

const GROUP: &str = r#"{
    "id": 5,
    "title": "@php:__( 'Hero', 'acme' )",
    "fields": [
        { "twKey": "a", "type": "true_false", "label": "Show" },
        { "name": "b", "type": "text", "label": "Text",
          "conditionalLogic": [[{ "field": "a", "operator": "==", "value": "1" }]] }
    ],
    "location": [[{ "param": "post_type", "operator": "==", "value": "page" }]]
}"#;

#[test]
fn conditions_reference_generated_keys() {
    let (group, sets) = parse_group(GROUP).unwrap();
    let php = build_group(&group, &sets);

    let expected = [
        "if ( function_exists( 'acf_add_local_field_group' ) ) {",
        "\tacf_add_local_field_group(",
        "\t\tarray(",
        "\t\t\t'key'                   => 'group_5',",
        "\t\t\t'title'                 => __( 'Hero', 'acme' ),",
        "\t\t\t'fields'                => array(",
        "\t\t\t\tarray(",
        "\t\t\t\t\t'key'   => 'field_5_a',",
        "\t\t\t\t\t'label' => 'Show',",
        "\t\t\t\t\t'type'  => 'true_false',",
        "\t\t\t\t),",
        "\t\t\t\tarray(",
        "\t\t\t\t\t'conditional_logic' => array(",
        "\t\t\t\t\t\tarray(",
        "\t\t\t\t\t\t\tarray(",
        "\t\t\t\t\t\t\t\t'field'    => 'field_5_a',",
        "\t\t\t\t\t\t\t\t'operator' => '==',",
        "\t\t\t\t\t\t\t\t'value'    => '1',",
        "\t\t\t\t\t\t\t),",
        "\t\t\t\t\t\t),",
        "\t\t\t\t\t),",
        "\t\t\t\t\t'key'               => 'field_5_b',",
        "\t\t\t\t\t'label'             => 'Text',",
        "\t\t\t\t\t'name'              => 'b',",
        "\t\t\t\t\t'type'              => 'text',",
        "\t\t\t\t),",
        "\t\t\t),",
        "\t\t\t'location'              => array(",
        "\t\t\t\tarray(",
        "\t\t\t\t\tarray(",
        "\t\t\t\t\t\t'param'    => 'post_type',",
        "\t\t\t\t\t\t'operator' => '==',",
        "\t\t\t\t\t\t'value'    => 'page',",
        "\t\t\t\t\t),",
        "\t\t\t\t),",
        "\t\t\t),",
        "\t\t\t'menu_order'            => 0,",
        "\t\t\t'position'              => 'normal',",
        "\t\t\t'style'                 => 'default',",
        "\t\t\t'label_placement'       => 'left',",
        "\t\t\t'instruction_placement' => 'top',",
        "\t\t\t'hide_on_screen'        => '',",
        "\t\t\t'active'                => true,",
        "\t\t\t'description'           => '',",
        "\t\t)",
        "\t);",
        "}",
    ]
    .join("\n");

    assert_eq!(php, expected);
}

#[test]
fn field_sets_from_the_document_are_spliced() {
    let (group, sets) = parse_group(
        r#"{
            "id": "opts",
            "title": "Options",
            "fields": [
                { "fieldSet": 3 },
                { "name": "note", "type": "text" }
            ],
            "fieldSets": [
                { "id": 3, "fieldGroup": { "fields": [
                    { "twKey": "cta_on", "name": "cta_enabled", "type": "true_false" },
                    { "name": "cta_label", "type": "text",
                      "conditionalLogic": [[{ "field": "cta_on", "operator": "==", "value": 1 }]] }
                ] } }
            ]
        }"#,
    )
    .unwrap();
    let php = build_group(&group, &sets);

    assert!(php.contains("'key'  => 'field_opts_cta_enabled',"));
    assert!(php.contains("'field'    => 'field_opts_cta_enabled',"));
    assert!(php.contains("'value'    => 1,"));
    assert!(php.contains("'key'  => 'field_opts_note',"));
    assert!(!php.contains("fieldSet"));
}

#[test]
fn group_snapshot_without_fields() {
    let (group, sets) =
        parse_group(r#"{ "id": 1, "title": "Empty", "labelPlacement": "top" }"#).unwrap();
    let php = build_group(&group, &sets);

    insta::assert_snapshot!(
        php.lines()
            .filter(|line| line.contains("'fields'") || line.contains("'label_placement'"))
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" | "),
        @"'fields'                => array(), | 'label_placement'       => 'top',"
    );
}
