//! Field-set splicing and key generation

use serde_json::{Map, Value};
use tracing::warn;

use crate::spec::{Choice, ConditionRule, FieldSet, FieldSpec};

/// A field with its generated key, field sets already spliced in.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedField {
    pub key: String,
    pub tw_key: Option<String>,
    pub name: Option<String>,
    pub field_type: Option<String>,
    pub choices: Vec<Choice>,
    pub conditional_logic: Vec<Vec<ConditionRule>>,
    pub settings: Map<String, Value>,
    pub sub_fields: Vec<ExpandedField>,
    pub layouts: Vec<ExpandedField>,
}

/// Expand `fields` under `prefix`.
///
/// A field pointing at a field set is replaced by the set's fields, expanded
/// with the same prefix. Nested fields get `<key>__` as their prefix. A set
/// that includes itself, directly or not, is skipped where it re-enters.
pub fn expand(fields: &[FieldSpec], prefix: &str, sets: &[FieldSet]) -> Vec<ExpandedField> {
    let mut out = Vec::new();
    expand_into(fields, prefix, sets, &mut Vec::new(), &mut out);
    out
}

fn expand_into(
    fields: &[FieldSpec],
    prefix: &str,
    sets: &[FieldSet],
    visiting: &mut Vec<u64>,
    out: &mut Vec<ExpandedField>,
) {
    for field in fields {
        if let Some(set_id) = field.field_set {
            if visiting.contains(&set_id) {
                warn!(set_id, "Skipping recursive field set");
                continue;
            }
            let Some(set) = FieldSet::find(sets, set_id) else {
                warn!(set_id, "Skipping unknown field set");
                continue;
            };
            visiting.push(set_id);
            expand_into(set.fields(), prefix, sets, visiting, out);
            visiting.pop();
            continue;
        }

        let Some(suffix) = field.key_suffix() else {
            warn!(field_type = ?field.field_type, "Skipping field without name or twKey");
            continue;
        };
        let key = format!("{prefix}{suffix}");
        let child_prefix = format!("{key}__");

        let mut sub_fields = Vec::new();
        expand_into(&field.sub_fields, &child_prefix, sets, visiting, &mut sub_fields);
        let mut layouts = Vec::new();
        expand_into(&field.layouts, &child_prefix, sets, visiting, &mut layouts);

        let mut settings = field.settings.clone();
        settings.remove("key");

        out.push(ExpandedField {
            key,
            tw_key: field.tw_key.clone(),
            name: field.name.clone(),
            field_type: field.field_type.clone(),
            choices: field.choices.clone(),
            conditional_logic: field.conditional_logic.clone(),
            settings,
            sub_fields,
            layouts,
        });
    }
}
