//! The `style.css` theme header
//!
//! Besides the WordPress theme metadata, the header persists the theme id
//! (`TWID`), the last synced commit (`TWCID`) and the screenshot URL
//! (`TWSS`). The commit is what the commit gate compares against.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::payload::ThemePayload;

static HEADER_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*(.+?)\*/").expect("Invalid header comment regex"));

static DETAIL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[\s*]*(.+?): *(.+)$").expect("Invalid detail line regex"));

/// Parsed `Key: value` lines of the header comment, keys lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    details: BTreeMap<String, String>,
}

impl Stylesheet {
    /// Parse the first comment of a stylesheet. Text without a comment yields
    /// an empty header.
    pub fn parse(text: &str) -> Self {
        let mut details = BTreeMap::new();
        if let Some(comment) = HEADER_COMMENT.captures(text) {
            for line in DETAIL_LINE.captures_iter(&comment[1]) {
                details.insert(line[1].trim().to_lowercase(), line[2].trim().to_string());
            }
        }
        Self { details }
    }

    /// A header value by case-insensitive key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.details.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn theme_id(&self) -> Option<u64> {
        self.get("twid").and_then(|v| v.parse().ok())
    }

    /// The last commit written by a sync.
    pub fn commit(&self) -> Option<u64> {
        self.get("twcid").and_then(|v| v.parse().ok())
    }

    pub fn screenshot(&self) -> Option<&str> {
        self.get("twss")
    }

    /// A fresh header for `payload`.
    pub fn render(payload: &ThemePayload) -> String {
        let mut lines = vec![
            "/*".to_string(),
            format!("Theme Name: {}", payload.name),
            format!("Text Domain: {}", payload.domain),
            format!("Version: {}", payload.version),
            "Requires at least: 4.7".to_string(),
            "Requires PHP: 7.2".to_string(),
        ];

        push_optional(&mut lines, "Description", &payload.description);
        push_optional(&mut lines, "Tags", &payload.tags);
        lines.push(format!("Author: {}", payload.author));
        push_optional(&mut lines, "Author URI", &payload.author_uri);
        push_optional(&mut lines, "Theme URI", &payload.theme_uri);
        lines.push(format!("License: {}", payload.license));
        push_optional(&mut lines, "License URI", &payload.license_uri);
        lines.push(format!("TWID: {}", payload.id));
        lines.push(format!("TWCID: {}", payload.commit));
        lines.push(format!("TWSS: {}", payload.screenshot));
        lines.push("*/".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn push_optional(lines: &mut Vec<String>, key: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("{key}: {value}"));
    }
}
