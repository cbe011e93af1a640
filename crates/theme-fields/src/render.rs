//! Rendering expanded fields and groups as PHP

use serde_json::Value;
use theme_content::{ArrayArgs, PhpValue, indent, snake_case};

use crate::expand::{ExpandedField, expand};
use crate::remap::{collect_key_map, rewrite_conditions};
use crate::spec::{ConditionRule, FieldSet, FieldSpec, GroupSpec, LocationRule};

/// Author-only keys that never reach the output.
const BOOKKEEPING_KEYS: [&str; 2] = ["tw_key", "auto_name"];

/// Fields as a list of arrays, sorted by generated key.
pub fn render(fields: &[ExpandedField]) -> PhpValue {
    let mut sorted: Vec<&ExpandedField> = fields.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    PhpValue::List(
        sorted
            .into_iter()
            .map(|field| PhpValue::Map(field_args(field)))
            .collect(),
    )
}

fn field_args(field: &ExpandedField) -> ArrayArgs {
    let mut args = ArrayArgs::new();
    args.add("key", field.key.as_str());

    if let Some(name) = &field.name
        && !name.is_empty()
    {
        args.add("name", name.as_str());
    }
    if let Some(field_type) = &field.field_type {
        args.add("type", field_type.as_str());
    }

    for (key, value) in &field.settings {
        let value = PhpValue::from_json(value);
        if !value.is_empty() {
            args.add(snake_case(key), value);
        }
    }

    if !field.choices.is_empty() {
        let mut choices = ArrayArgs::new();
        for choice in &field.choices {
            choices.add(choice.key(), PhpValue::from_payload_str(&choice.text));
        }
        args.add("choices", choices);
    }

    if !field.conditional_logic.is_empty() {
        let groups = field
            .conditional_logic
            .iter()
            .map(|rules| PhpValue::List(rules.iter().map(rule_value).collect()))
            .collect();
        args.add("conditional_logic", PhpValue::List(groups));
    }

    if !field.sub_fields.is_empty() {
        args.add("sub_fields", render(&field.sub_fields));
    }
    if !field.layouts.is_empty() {
        args.add("layouts", render(&field.layouts));
    }

    for key in BOOKKEEPING_KEYS {
        args.remove(key);
    }
    args.sort_by_key();
    args
}

fn rule_value(rule: &ConditionRule) -> PhpValue {
    let value = match &rule.value {
        Value::Null => PhpValue::str(""),
        other => PhpValue::from_json(other),
    };
    let mut args = ArrayArgs::new();
    args.add("field", rule.field.as_str())
        .add("operator", rule.operator.as_str())
        .add("value", value);
    PhpValue::Map(args)
}

fn location_value(rule: &LocationRule) -> PhpValue {
    let mut args = ArrayArgs::new();
    args.add("param", rule.param.as_str())
        .add("operator", rule.operator.as_str())
        .add("value", rule.value.as_str());
    PhpValue::Map(args)
}

fn compile(fields: &[FieldSpec], sets: &[FieldSet], prefix: &str) -> PhpValue {
    let expanded = expand(fields, prefix, sets);
    let map = collect_key_map(&expanded);
    render(&rewrite_conditions(expanded, &map))
}

/// Compile a field list into `array( ... ),` entries at `level`.
pub fn build_fields(fields: &[FieldSpec], sets: &[FieldSet], level: usize, prefix: &str) -> String {
    let mut list = ArrayArgs::new();
    if let PhpValue::List(items) = compile(fields, sets, prefix) {
        for item in items {
            list.push(item);
        }
    }
    list.format(level).join("\n")
}

/// Compile a single field. A field-set pointer compiles to nothing here
/// since no sets are in scope.
pub fn build(field: &FieldSpec, level: usize, prefix: &str) -> String {
    build_fields(std::slice::from_ref(field), &[], level, prefix)
}

/// The capability-guarded `acf_add_local_field_group()` call for a group.
pub fn build_group(group: &GroupSpec, sets: &[FieldSet]) -> String {
    let id = group.id.clone().unwrap_or_else(random_id);
    let fields = compile(&group.fields, sets, &format!("field_{id}_"));

    let location = group
        .location
        .iter()
        .map(|rules| PhpValue::List(rules.iter().map(location_value).collect()))
        .collect();
    let hide_on_screen = match &group.hide_on_screen {
        Value::Null => PhpValue::str(""),
        other => PhpValue::from_json(other),
    };

    let mut args = ArrayArgs::new();
    args.add("key", format!("group_{id}"))
        .add("title", PhpValue::from_payload_str(&group.title))
        .add("fields", fields)
        .add("location", PhpValue::List(location))
        .add("menu_order", PhpValue::Int(group.menu_order))
        .add("position", group.position.as_str())
        .add("style", group.style.as_str())
        .add("label_placement", group.label_placement.as_str())
        .add("instruction_placement", group.instruction_placement.as_str())
        .add("hide_on_screen", hide_on_screen)
        .add("active", group.active)
        .add("description", group.description.as_str());

    let mut lines = vec![
        "if ( function_exists( 'acf_add_local_field_group' ) ) {".to_string(),
        format!("{}acf_add_local_field_group(", indent(1)),
        format!("{}array(", indent(2)),
    ];
    lines.extend(args.format(3));
    lines.push(format!("{})", indent(2)));
    lines.push(format!("{});", indent(1)));
    lines.push("}".to_string());
    lines.join("\n")
}

fn random_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}
