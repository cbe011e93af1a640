//! `register_post_type()` / `register_taxonomy()` argument arrays

use serde_json::{Map, Value};
use theme_content::php::quote;
use theme_content::{ArrayArgs, PhpValue, snake_case};

use super::translated;

/// `_x( 'text', 'context', 'domain' )`
pub(super) fn translated_with_context(text: &str, context: &str, domain: &str) -> String {
    format!("_x( {}, {}, {} )", quote(text), quote(context), quote(domain))
}

/// Feature name as WordPress spells it: `customFields` -> `custom-fields`.
pub(super) fn feature_name(key: &str) -> String {
    snake_case(key).replace('_', "-")
}

/// Registration arguments with snake_case keys, sorted by key.
///
/// Labels are translated; `label_context` names the `_x()` context for the
/// label keys that carry one. The builder's helper members
/// (`show_in_menu_string`, `has_archive_string`, `rewrite_args`,
/// `query_var_string`) replace the flag they refine and are not emitted.
pub(super) fn registration_args(
    args: &Map<String, Value>,
    domain: &str,
    label_context: impl Fn(&str) -> Option<String>,
) -> ArrayArgs {
    let mut out = ArrayArgs::new();

    for (key, value) in args {
        let key = snake_case(key);
        let rendered = match (key.as_str(), value) {
            ("label", Value::String(text)) => Some(PhpValue::raw(translated(text, domain))),
            ("labels", Value::Object(labels)) => {
                Some(PhpValue::Map(labels_args(labels, domain, &label_context)))
            }
            ("description", Value::String(text)) if !text.is_empty() => {
                Some(PhpValue::raw(translated(text, domain)))
            }
            ("description", _) => None,
            ("supports", Value::Object(features)) => Some(PhpValue::List(
                features
                    .iter()
                    .filter(|(_, on)| is_truthy(&PhpValue::from_json(on)))
                    .map(|(feature, _)| PhpValue::str(feature_name(feature)))
                    .collect(),
            )),
            _ => Some(PhpValue::from_json(value)),
        };
        if let Some(rendered) = rendered {
            out.add(key, rendered);
        }
    }

    refine(&mut out, "show_in_menu", "show_in_menu_string", |flag| {
        flag.as_str() == Some("string")
    });
    refine(&mut out, "has_archive", "has_archive_string", is_truthy);
    refine(&mut out, "rewrite", "rewrite_args", is_truthy);
    refine(&mut out, "query_var", "query_var_string", is_truthy);

    out.sort_by_key();
    out
}

fn labels_args(
    labels: &Map<String, Value>,
    domain: &str,
    label_context: &impl Fn(&str) -> Option<String>,
) -> ArrayArgs {
    let mut out = ArrayArgs::new();
    for (key, label) in labels {
        let key = snake_case(key);
        let value = match label.as_str() {
            Some(text) => PhpValue::raw(match label_context(&key) {
                Some(context) => translated_with_context(text, &context, domain),
                None => translated(text, domain),
            }),
            None => PhpValue::from_json(label),
        };
        out.add(key, value);
    }
    out
}

/// Drop `helper` and, when `flag` passes `applies` and the helper holds a
/// value, put that value in place of the flag.
fn refine(args: &mut ArrayArgs, flag: &str, helper: &str, applies: impl Fn(&PhpValue) -> bool) {
    let Some(value) = args.remove(helper) else {
        return;
    };
    let replace = args.get(flag).is_some_and(applies) && !value.is_empty();
    if replace {
        args.remove(flag);
        args.add(flag, value);
    }
}

/// PHP truthiness of a literal.
pub(super) fn is_truthy(value: &PhpValue) -> bool {
    !value.is_empty() && !matches!(value, PhpValue::Bool(false) | PhpValue::Int(0))
}
