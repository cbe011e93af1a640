//! Typed theme payload
//!
//! The webhook body describes the whole theme: metadata for the stylesheet
//! header and one list per entity kind. Element trees are converted into
//! [`ElementNode`]s while deserializing, so a malformed view is rejected
//! before anything is written.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use theme_blocks::DEFAULT_PRIORITY;
use theme_fields::{FieldSet, FieldSpec};
use theme_view::{ElementNode, RelatedEntity};

use crate::{Error, Result};

/// The complete description of one theme.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePayload {
    pub id: u64,
    /// Monotonic counter, one higher on every client change
    pub commit: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Text domain used in every translation call
    #[serde(default, deserialize_with = "nullable")]
    pub domain: String,
    #[serde(default, deserialize_with = "nullable")]
    pub version: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author_uri: String,
    #[serde(default, deserialize_with = "nullable")]
    pub theme_uri: String,
    #[serde(default, deserialize_with = "nullable")]
    pub license: String,
    #[serde(default, deserialize_with = "nullable")]
    pub license_uri: String,
    /// Remote screenshot URL, persisted in the header only
    #[serde(default, deserialize_with = "nullable")]
    pub screenshot: String,

    #[serde(default)]
    pub post_types: Vec<PostType>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub block_groups: Vec<BlockGroup>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub menu_pages: Vec<MenuPage>,
    #[serde(default)]
    pub options_pages: Vec<OptionsPage>,
    #[serde(default)]
    pub scss_partials: Vec<ScssPartial>,
    #[serde(default)]
    pub js_modules: Vec<JsModule>,
}

impl ThemePayload {
    /// Parse and validate a payload.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: ThemePayload = serde_json::from_str(json)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Check the members every sync relies on.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("The 'name' parameter is required".to_string());
        }
        if self.version.trim().is_empty() {
            errors.push("The 'version' parameter is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidPayload { errors })
        }
    }
}

/// A custom post type, or field and support tweaks of a built-in one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostType {
    pub id: u64,
    /// Post type key, e.g. `product`
    pub post_type: String,
    /// `register_post_type()` arguments with camelCase keys
    #[serde(default, deserialize_with = "object")]
    pub args: Map<String, Value>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub field_sets: Vec<FieldSet>,
}

/// A custom taxonomy, or the post type relations of a built-in one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub id: u64,
    /// Taxonomy key, e.g. `genre`
    pub taxonomy: String,
    /// Post types the taxonomy is attached to
    #[serde(default)]
    pub post_type_keys: Vec<String>,
    /// `register_taxonomy()` arguments with camelCase keys
    #[serde(default, deserialize_with = "object")]
    pub args: Map<String, Value>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub field_sets: Vec<FieldSet>,
}

/// A content block with its own view, field group and assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, deserialize_with = "elements")]
    pub view: Vec<ElementNode>,
    /// Hand-written view that replaces the compiled one
    #[serde(default, deserialize_with = "optional_text")]
    pub view_raw: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub scss: String,
    #[serde(default, deserialize_with = "nullable")]
    pub js: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub field_sets: Vec<FieldSet>,
    #[serde(default)]
    pub templates: Vec<RelatedEntity>,
    #[serde(default)]
    pub parts: Vec<RelatedEntity>,
}

/// A named list of blocks that may be placed together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGroup {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default)]
    pub blocks: Vec<RelatedEntity>,
}

/// One argument of a template part, `default` is PHP code.
#[derive(Debug, Clone, Deserialize)]
pub struct PartArg {
    pub name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub default: Option<String>,
}

/// A reusable template part.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub args: Vec<PartArg>,
    #[serde(default, deserialize_with = "elements")]
    pub view: Vec<ElementNode>,
    #[serde(default, deserialize_with = "optional_text")]
    pub view_raw: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub scss: String,
    #[serde(default, deserialize_with = "nullable")]
    pub js: String,
    #[serde(default)]
    pub templates: Vec<RelatedEntity>,
    #[serde(default)]
    pub parts: Vec<RelatedEntity>,
}

/// A top-level theme file: a page template or a WordPress template file
/// such as `header` or `single`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: u64,
    pub name: String,
    /// `template` for selectable page templates
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub template_type: String,
    #[serde(default, deserialize_with = "elements")]
    pub view: Vec<ElementNode>,
    #[serde(default, deserialize_with = "optional_text")]
    pub view_raw: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub scss: String,
    #[serde(default, deserialize_with = "nullable")]
    pub js: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub field_sets: Vec<FieldSet>,
    #[serde(default)]
    pub templates: Vec<RelatedEntity>,
    #[serde(default)]
    pub parts: Vec<RelatedEntity>,
    #[serde(default)]
    pub block_groups: Vec<RelatedEntity>,
}

impl Template {
    pub fn is_page_template(&self) -> bool {
        self.template_type == "template"
    }

    /// The `page_template` value WordPress stores for this template.
    pub fn location_value(&self) -> String {
        if self.name == "page" {
            "default".to_string()
        } else {
            format!("{}.php", self.name)
        }
    }

    pub fn has_fields(&self) -> bool {
        self.is_page_template() && !self.fields.is_empty()
    }
}

/// An admin menu page with its own view and assets.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPage {
    pub id: u64,
    pub menu_slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub page_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub menu_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub capability: String,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub icon_url: String,
    #[serde(default)]
    pub position: Value,
    #[serde(default, deserialize_with = "elements")]
    pub view: Vec<ElementNode>,
    #[serde(default, deserialize_with = "optional_text")]
    pub view_raw: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub scss: String,
    #[serde(default, deserialize_with = "nullable")]
    pub js: String,
}

/// Group-level settings of an options page's field group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupSettings {
    /// Empty means "use the page title"
    pub title: String,
    pub menu_order: i64,
    pub position: String,
    pub style: String,
    pub label_placement: String,
    pub instruction_placement: String,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            menu_order: 0,
            position: "normal".to_string(),
            style: "default".to_string(),
            label_placement: "left".to_string(),
            instruction_placement: "top".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsFieldGroup {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub settings: GroupSettings,
}

/// An ACF options page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPage {
    pub id: u64,
    pub menu_slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub page_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub menu_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub capability: String,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_slug: String,
    #[serde(default, deserialize_with = "nullable")]
    pub icon_url: String,
    #[serde(default)]
    pub position: Value,
    #[serde(default)]
    pub redirect: bool,
    #[serde(default)]
    pub autoload: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub update_button: String,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_message: String,
    #[serde(default)]
    pub field_group: OptionsFieldGroup,
    #[serde(default)]
    pub field_sets: Vec<FieldSet>,
}

/// A stylesheet partial imported by `styles.scss`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScssPartial {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub scss: String,
    #[serde(default = "default_priority")]
    pub priority: u32,
}

/// A script module, imported by `main.js` when `import` is set.
#[derive(Debug, Clone, Deserialize)]
pub struct JsModule {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub js: String,
    #[serde(default)]
    pub import: bool,
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

/// Strings that may arrive as `null`.
fn nullable<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional text where `null`, `false` and `""` all mean "absent".
/// Objects that may arrive as `null` or `[]` when empty.
fn object<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Map::new(),
    })
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Element trees, converted while deserializing.
fn elements<'de, D>(deserializer: D) -> std::result::Result<Vec<ElementNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(|value| ElementNode::from_value(value).map_err(serde::de::Error::custom))
        .collect()
}
