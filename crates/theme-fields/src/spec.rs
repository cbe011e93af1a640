//! Field, field-set and field-group specifications as they arrive in the payload

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::Result;

/// One entry of a choice list: stored value and visible label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    pub value: Value,
    #[serde(default)]
    pub text: String,
}

impl Choice {
    pub fn new(value: impl Into<Value>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }

    /// The stored value as an array key.
    pub fn key(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A single conditional-logic rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionRule {
    /// Referenced field: a `twKey` before remapping, a generated key after.
    pub field: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

fn default_operator() -> String {
    "==".to_string()
}

impl ConditionRule {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// One field. Unknown members are kept in `settings` and emitted with
/// snake_case keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default)]
    pub tw_key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub choices: Vec<Choice>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sub_fields: Vec<FieldSpec>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub layouts: Vec<FieldSpec>,
    /// OR-groups of AND-ed rules
    #[serde(default, deserialize_with = "lenient_list")]
    pub conditional_logic: Vec<Vec<ConditionRule>>,
    #[serde(default)]
    pub field_set: Option<u64>,
    #[serde(default)]
    pub auto_name: Option<bool>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    /// A placeholder that splices the given field set in its place.
    pub fn field_set(id: u64) -> Self {
        Self {
            field_set: Some(id),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn tw_key(mut self, key: impl Into<String>) -> Self {
        self.tw_key = Some(key.into());
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn choice(mut self, value: impl Into<Value>, text: impl Into<String>) -> Self {
        self.choices.push(Choice::new(value, text));
        self
    }

    pub fn sub_field(mut self, field: FieldSpec) -> Self {
        self.sub_fields.push(field);
        self
    }

    pub fn layout(mut self, layout: FieldSpec) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Add an OR-group of AND-ed rules.
    pub fn condition_group(mut self, rules: Vec<ConditionRule>) -> Self {
        self.conditional_logic.push(rules);
        self
    }

    /// `name` when present, else `twKey`.
    pub fn key_suffix(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.tw_key.as_deref().filter(|key| !key.is_empty()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct FieldSetGroup {
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

/// A named, reusable list of fields spliced wherever a field points at it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSet {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    fields: Vec<FieldSpec>,
    #[serde(default)]
    field_group: Option<FieldSetGroup>,
}

impl FieldSet {
    pub fn new(id: u64, fields: Vec<FieldSpec>) -> Self {
        Self {
            id,
            name: None,
            fields,
            field_group: None,
        }
    }

    /// The set's fields, whether listed directly or under `fieldGroup`.
    pub fn fields(&self) -> &[FieldSpec] {
        match &self.field_group {
            Some(group) if self.fields.is_empty() => &group.fields,
            _ => &self.fields,
        }
    }

    pub fn find(sets: &[FieldSet], id: u64) -> Option<&FieldSet> {
        sets.iter().find(|set| set.id == id)
    }
}

/// One rule of a group's location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationRule {
    pub param: String,
    #[serde(default = "default_operator")]
    pub operator: String,
    pub value: String,
}

impl LocationRule {
    pub fn new(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            operator: "==".to_string(),
            value: value.into(),
        }
    }
}

/// A field group and its group-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpec {
    /// Missing ids get a random one at build time.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Strings prefixed with `@php:` are emitted as code.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// OR-groups of AND-ed location rules
    #[serde(default)]
    pub location: Vec<Vec<LocationRule>>,
    #[serde(default)]
    pub menu_order: i64,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_label_placement")]
    pub label_placement: String,
    #[serde(default = "default_instruction_placement")]
    pub instruction_placement: String,
    #[serde(default)]
    pub hide_on_screen: Value,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub description: String,
}

fn default_position() -> String {
    "normal".to_string()
}

fn default_style() -> String {
    "default".to_string()
}

fn default_label_placement() -> String {
    "left".to_string()
}

fn default_instruction_placement() -> String {
    "top".to_string()
}

fn default_active() -> bool {
    true
}

impl GroupSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            fields,
            location: Vec::new(),
            menu_order: 0,
            position: default_position(),
            style: default_style(),
            label_placement: default_label_placement(),
            instruction_placement: default_instruction_placement(),
            hide_on_screen: Value::String(String::new()),
            active: default_active(),
            description: String::new(),
        }
    }

    /// Add an OR-group holding a single location rule.
    pub fn located(mut self, rule: LocationRule) -> Self {
        self.location.push(vec![rule]);
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupDocument {
    #[serde(flatten)]
    group: GroupSpec,
    #[serde(default)]
    field_sets: Vec<FieldSet>,
}

/// Parse a field group object; a `fieldSets` member carries the sets its
/// fields may reference.
pub fn parse_group(json: &str) -> Result<(GroupSpec, Vec<FieldSet>)> {
    let document: GroupDocument = serde_json::from_str(json)?;
    Ok((document.group, document.field_sets))
}

/// Lists that may arrive as `0`, `false` or `null` when unset.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// Group ids may be numbers or strings.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unknown_members_become_settings() {
        let field: FieldSpec = serde_json::from_value(json!({
            "twKey": "a1",
            "type": "text",
            "label": "Title",
            "defaultValue": "",
            "conditionalLogic": 0
        }))
        .unwrap();

        assert_eq!(field.tw_key.as_deref(), Some("a1"));
        assert_eq!(field.field_type.as_deref(), Some("text"));
        assert!(field.conditional_logic.is_empty());
        assert_eq!(field.settings.get("label"), Some(&json!("Title")));
        assert!(field.settings.contains_key("defaultValue"));
        assert!(!field.settings.contains_key("twKey"));
    }

    #[test]
    fn key_suffix_prefers_name() {
        assert_eq!(FieldSpec::new("text").named("title").tw_key("a").key_suffix(), Some("title"));
        assert_eq!(FieldSpec::new("text").tw_key("a").key_suffix(), Some("a"));
        assert_eq!(FieldSpec::new("text").named("").tw_key("a").key_suffix(), Some("a"));
        assert_eq!(FieldSpec::new("text").key_suffix(), None);
    }

    #[test]
    fn field_sets_accept_both_shapes() {
        let direct: FieldSet =
            serde_json::from_value(json!({ "id": 1, "fields": [{ "name": "a" }] })).unwrap();
        let nested: FieldSet = serde_json::from_value(
            json!({ "id": 2, "fieldGroup": { "fields": [{ "name": "b" }] } }),
        )
        .unwrap();

        assert_eq!(direct.fields()[0].name.as_deref(), Some("a"));
        assert_eq!(nested.fields()[0].name.as_deref(), Some("b"));
    }

    #[test]
    fn group_defaults() {
        let (group, sets) = parse_group(r#"{ "id": 12, "title": "Hero", "fields": [] }"#).unwrap();

        assert_eq!(group.id.as_deref(), Some("12"));
        assert_eq!(group.position, "normal");
        assert_eq!(group.label_placement, "left");
        assert!(group.active);
        assert!(sets.is_empty());
    }
}
