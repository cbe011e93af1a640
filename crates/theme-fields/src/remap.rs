//! Rewriting conditional-logic references from `twKey`s to generated keys

use std::collections::BTreeMap;

use crate::expand::ExpandedField;

/// `twKey` to generated key.
pub type KeyMap = BTreeMap<String, String>;

/// Record `twKey -> key` for every field of the tree, at any depth.
pub fn collect_key_map(fields: &[ExpandedField]) -> KeyMap {
    let mut map = KeyMap::new();
    collect_into(fields, &mut map);
    map
}

fn collect_into(fields: &[ExpandedField], map: &mut KeyMap) {
    for field in fields {
        if let Some(tw_key) = &field.tw_key {
            map.insert(tw_key.clone(), field.key.clone());
        }
        collect_into(&field.sub_fields, map);
        collect_into(&field.layouts, map);
    }
}

/// Point every rule at the generated key of the field it references. Rules
/// referencing a token that is not in `map` are left as they are.
pub fn rewrite_conditions(fields: Vec<ExpandedField>, map: &KeyMap) -> Vec<ExpandedField> {
    fields
        .into_iter()
        .map(|mut field| {
            for rule in field.conditional_logic.iter_mut().flatten() {
                if let Some(key) = map.get(&rule.field) {
                    rule.field = key.clone();
                }
            }
            field.sub_fields = rewrite_conditions(field.sub_fields, map);
            field.layouts = rewrite_conditions(field.layouts, map);
            field
        })
        .collect()
}
