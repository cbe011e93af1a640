//! PHP array-literal rendering
//!
//! Generated registration calls are nested `array( ... )` literals with the
//! `=>` of sibling keys aligned:
//!
//! ```text
//! 'key'      => 'field_group_title',
//! 'required' => true,
//! 'choices'  => array(
//! 	'red' => 'Red',
//! ),
//! ```

use serde_json::Value;

use crate::block::indent;

/// Prefix marking a payload string that must be emitted as raw code.
pub const RAW_PREFIX: &str = "@php:";

/// A value inside a PHP array literal.
#[derive(Debug, Clone, PartialEq)]
pub enum PhpValue {
    /// Emitted verbatim (an expression, a function call, a constant)
    Raw(String),
    /// Single-quoted string literal
    Str(String),
    Bool(bool),
    Null,
    Int(i64),
    Float(f64),
    /// `array( a, b )` without keys
    List(Vec<PhpValue>),
    /// `array( 'k' => v )`
    Map(ArrayArgs),
}

impl PhpValue {
    pub fn raw(code: impl Into<String>) -> Self {
        Self::Raw(code.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// A payload string: `@php:`-prefixed strings become raw code.
    pub fn from_payload_str(value: &str) -> Self {
        match value.strip_prefix(RAW_PREFIX) {
            Some(code) => Self::Raw(code.to_string()),
            None => Self::Str(value.to_string()),
        }
    }

    /// Convert a JSON value into its PHP literal form.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::from_payload_str(s),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => {
                let mut args = ArrayArgs::new();
                for (key, value) in map {
                    args.add(key.clone(), Self::from_json(value));
                }
                Self::Map(args)
            }
        }
    }

    /// `null`, `''`, `array()`.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) | Self::Raw(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(args) => args.is_empty(),
            _ => false,
        }
    }

    /// The string content of `Str` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Inline rendering of a scalar. Lists and maps render as `array()`
    /// when empty and are otherwise formatted by [`ArrayArgs::format`].
    fn scalar(&self) -> Option<String> {
        match self {
            Self::Raw(code) => Some(code.clone()),
            Self::Str(s) => Some(quote(s)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => Some("null".to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::List(items) if items.is_empty() => Some("array()".to_string()),
            Self::Map(args) if args.is_empty() => Some("array()".to_string()),
            Self::List(_) | Self::Map(_) => None,
        }
    }

    fn render_into(&self, out: &mut Vec<String>, level: usize, prefix: &str) {
        let tabs = indent(level);
        if let Some(scalar) = self.scalar() {
            out.push(format!("{tabs}{prefix}{scalar},"));
            return;
        }

        out.push(format!("{tabs}{prefix}array("));
        match self {
            Self::List(items) => {
                for item in items {
                    item.render_into(out, level + 1, "");
                }
            }
            Self::Map(args) => out.extend(args.format(level + 1)),
            _ => {}
        }
        out.push(format!("{tabs}),"));
    }
}

impl From<&str> for PhpValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PhpValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PhpValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PhpValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<ArrayArgs> for PhpValue {
    fn from(value: ArrayArgs) -> Self {
        Self::Map(value)
    }
}

/// Single-quoted PHP string literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// An ordered list of array entries, keyed or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayArgs {
    entries: Vec<(Option<String>, PhpValue)>,
}

impl ArrayArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keyed entry.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<PhpValue>) -> &mut Self {
        self.entries.push((Some(key.into()), value.into()));
        self
    }

    /// Append an entry without a key.
    pub fn push(&mut self, value: impl Into<PhpValue>) -> &mut Self {
        self.entries.push((None, value.into()));
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| v)
    }

    /// Remove every entry stored under `key`, returning the first one.
    pub fn remove(&mut self, key: &str) -> Option<PhpValue> {
        let mut removed = None;
        let mut kept = Vec::with_capacity(self.entries.len());
        for (k, v) in self.entries.drain(..) {
            if k.as_deref() == Some(key) {
                removed.get_or_insert(v);
            } else {
                kept.push((k, v));
            }
        }
        self.entries = kept;
        removed
    }

    /// Stable sort by key; un-keyed entries sort first.
    pub fn sort_by_key(&mut self) -> &mut Self {
        self.entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, &PhpValue)> {
        self.entries.iter().map(|(k, v)| (k.as_deref(), v))
    }

    /// Render the entries at `level`, one `'key' => value,` per line with the
    /// arrows aligned.
    pub fn format(&self, level: usize) -> Vec<String> {
        let width = self
            .entries
            .iter()
            .filter_map(|(k, _)| k.as_ref().map(|k| quote(k).chars().count()))
            .max()
            .unwrap_or(0);

        let mut out = Vec::new();
        for (key, value) in &self.entries {
            let prefix = match key {
                Some(key) => {
                    let quoted = quote(key);
                    let pad = width - quoted.chars().count();
                    format!("{quoted}{} => ", " ".repeat(pad))
                }
                None => String::new(),
            };
            value.render_into(&mut out, level, &prefix);
        }
        out
    }
}
