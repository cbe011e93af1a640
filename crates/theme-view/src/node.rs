//! Element payloads and the normalized element tree

use serde::Deserialize;
use serde_json::Value;
use theme_content::normalize_code;

use crate::error::Result;

/// How an element compiles once its condition and loop are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "template", alias = "template-ref")]
    TemplateRef,
    #[serde(rename = "part", alias = "part-ref")]
    PartRef,
    #[serde(rename = "blockGroup", alias = "group-ref")]
    GroupRef,
    #[serde(rename = "none", alias = "text-only", alias = "text")]
    TextOnly,
    /// Anything else compiles to nothing.
    #[serde(other)]
    Unknown,
}

/// A template, part or block group an element may refer to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelatedEntity {
    pub id: u64,
    pub name: String,
}

impl RelatedEntity {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Look an entity up by id.
    pub fn find(list: &[RelatedEntity], id: u64) -> Option<&RelatedEntity> {
        list.iter().find(|entity| entity.id == id)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PhpSource {
    #[serde(default)]
    php: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementPayload {
    #[serde(default)]
    node: String,
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default)]
    foreign_key: Option<u64>,
    #[serde(default)]
    children: Vec<ElementPayload>,
    #[serde(default)]
    condition_groups_php: Option<PhpSource>,
    #[serde(default)]
    loop_php: Option<PhpSource>,
    #[serde(default)]
    part_args_php: Option<PhpSource>,
    #[serde(default)]
    tws_php: Option<PhpSource>,
    #[serde(default)]
    css_classes_php: Option<PhpSource>,
    #[serde(default)]
    attributes_php: Option<PhpSource>,
}

fn code(source: Option<PhpSource>) -> Vec<String> {
    source
        .and_then(|s| s.php)
        .map(|php| normalize_code(&php))
        .unwrap_or_default()
}

/// One node of a view tree with its code fragments normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// HTML tag name, or the reserved name of a template reference
    pub tag: String,
    pub kind: ElementKind,
    pub foreign_key: Option<u64>,
    pub condition: Vec<String>,
    pub loop_code: Vec<String>,
    pub part_args: Vec<String>,
    pub text: Vec<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<String>,
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(kind: ElementKind, tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind,
            foreign_key: None,
            condition: Vec::new(),
            loop_code: Vec::new(),
            part_args: Vec::new(),
            text: Vec::new(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn html(tag: impl Into<String>) -> Self {
        Self::new(ElementKind::Html, tag)
    }

    /// Build a node from one element object of the payload.
    pub fn from_value(value: Value) -> Result<Self> {
        let payload: ElementPayload = serde_json::from_value(value)?;
        Ok(payload.into_node())
    }

    pub fn with_text(mut self, raw: &str) -> Self {
        self.text = normalize_code(raw);
        self
    }

    pub fn with_condition(mut self, raw: &str) -> Self {
        self.condition = normalize_code(raw);
        self
    }

    pub fn with_loop(mut self, raw: &str) -> Self {
        self.loop_code = normalize_code(raw);
        self
    }

    pub fn with_classes(mut self, raw: &str) -> Self {
        self.classes = normalize_code(raw);
        self
    }

    pub fn with_attributes(mut self, raw: &str) -> Self {
        self.attributes = normalize_code(raw);
        self
    }

    pub fn with_part_args(mut self, raw: &str) -> Self {
        self.part_args = normalize_code(raw);
        self
    }

    pub fn with_foreign_key(mut self, id: u64) -> Self {
        self.foreign_key = Some(id);
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }
}

impl ElementPayload {
    fn into_node(self) -> ElementNode {
        ElementNode {
            tag: self.node,
            kind: self.kind,
            foreign_key: self.foreign_key,
            condition: code(self.condition_groups_php),
            loop_code: code(self.loop_php),
            part_args: code(self.part_args_php),
            text: code(self.tws_php),
            classes: code(self.css_classes_php),
            attributes: code(self.attributes_php),
            children: self
                .children
                .into_iter()
                .map(ElementPayload::into_node)
                .collect(),
        }
    }
}

/// Parse one element object or an array of them.
pub fn parse_elements(json: &str) -> Result<Vec<ElementNode>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(items) => items.into_iter().map(ElementNode::from_value).collect(),
        other => Ok(vec![ElementNode::from_value(other)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn payload_code_is_normalized() {
        let node = ElementNode::from_value(json!({
            "node": "div",
            "type": "html",
            "children": [],
            "conditionGroupsPhp": { "php": "<?php\nif ( $show ) {\n    #TW001\n}\n?>" },
            "twsPhp": { "php": "<?php the_title(); ?>" }
        }))
        .unwrap();

        assert_eq!(node.condition, vec!["if ( $show ) {", "\t#TW001", "}"]);
        assert_eq!(node.text, vec!["the_title();"]);
        assert!(node.loop_code.is_empty());
    }

    #[rstest]
    #[case("html", ElementKind::Html)]
    #[case("template", ElementKind::TemplateRef)]
    #[case("part-ref", ElementKind::PartRef)]
    #[case("blockGroup", ElementKind::GroupRef)]
    #[case("none", ElementKind::TextOnly)]
    #[case("text-only", ElementKind::TextOnly)]
    #[case("svg-sprite", ElementKind::Unknown)]
    fn kinds_and_aliases(#[case] name: &str, #[case] expected: ElementKind) {
        let node = ElementNode::from_value(json!({ "node": "x", "type": name })).unwrap();
        assert_eq!(node.kind, expected);
    }

    #[test]
    fn children_are_built_recursively() {
        let nodes = parse_elements(
            r#"[{ "node": "ul", "type": "html", "children": [
                { "node": "li", "type": "html", "children": [], "twsPhp": { "php": "echo 1;" } }
            ] }]"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children[0].tag, "li");
        assert_eq!(nodes[0].children[0].text, vec!["echo 1;"]);
    }

    #[test]
    fn single_object_is_accepted() {
        let nodes = parse_elements(r#"{ "node": "header", "type": "template" }"#).unwrap();
        assert_eq!(nodes[0].kind, ElementKind::TemplateRef);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_elements(r#"{ "node": "div" }"#).is_err());
    }

    #[test]
    fn related_lookup() {
        let parts = [RelatedEntity::new(1, "card"), RelatedEntity::new(2, "hero")];
        assert_eq!(RelatedEntity::find(&parts, 2).map(|p| p.name.as_str()), Some("hero"));
        assert!(RelatedEntity::find(&parts, 3).is_none());
    }
}
