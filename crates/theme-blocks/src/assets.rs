//! Ordered import lists (`styles.scss`, `main.js`)

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Priority of entries that carry none.
pub const DEFAULT_PRIORITY: u32 = 1000;

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*@?import\s+["']([^"']+)["']\s*;?\s*(?://\s*([0-9]+)(?:-([0-9]+))?)?\s*$"#)
        .expect("Invalid import line regex")
});

/// Directive used when serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// `@import "<path>";`
    Scss,
    /// `import "<path>";`
    Js,
}

impl ImportStyle {
    pub fn directive(self) -> &'static str {
        match self {
            Self::Scss => "@import",
            Self::Js => "import",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub path: String,
    pub id: Option<u64>,
    pub priority: u32,
}

impl AssetEntry {
    pub fn new(path: impl Into<String>, id: Option<u64>, priority: u32) -> Self {
        Self {
            path: path.into(),
            id,
            priority,
        }
    }

    fn render(&self, style: ImportStyle) -> String {
        let id = self.id.map(|id| format!("-{id}")).unwrap_or_default();
        format!(
            "{} \"{}\"; // {}{id}",
            style.directive(),
            self.path,
            self.priority
        )
    }
}

/// Import entries keyed by path, serialized by `(priority, path)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetList {
    style: ImportStyle,
    entries: BTreeMap<String, AssetEntry>,
}

impl AssetList {
    pub fn new(style: ImportStyle) -> Self {
        Self {
            style,
            entries: BTreeMap::new(),
        }
    }

    /// Parse an existing list. Lines that are not imports are ignored; an
    /// import without its trailing comment gets the default priority and no id.
    pub fn parse(style: ImportStyle, text: &str) -> Self {
        let mut list = Self::new(style);

        for line in text.lines() {
            let Some(caps) = IMPORT_LINE.captures(line) else {
                if !line.trim().is_empty() {
                    debug!(line, "Ignoring non-import line");
                }
                continue;
            };
            let priority = caps
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(DEFAULT_PRIORITY);
            let id = caps.get(3).and_then(|m| m.as_str().parse().ok());
            list.add(&caps[1], id, priority);
        }

        list
    }

    pub fn style(&self) -> ImportStyle {
        self.style
    }

    /// Insert an entry, replacing any entry with the same path.
    pub fn add(&mut self, path: impl Into<String>, id: Option<u64>, priority: u32) {
        let entry = AssetEntry::new(path, id, priority);
        self.entries.insert(entry.path.clone(), entry);
    }

    pub fn get(&self, path: &str) -> Option<&AssetEntry> {
        self.entries.get(path)
    }

    pub fn get_by_id(&self, id: u64) -> Option<&AssetEntry> {
        self.entries.values().find(|entry| entry.id == Some(id))
    }

    pub fn remove(&mut self, path: &str) -> Option<AssetEntry> {
        self.entries.remove(path)
    }

    pub fn remove_by_id(&mut self, id: u64) -> Option<AssetEntry> {
        let path = self.get_by_id(id)?.path.clone();
        self.entries.remove(&path)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by `(priority, path)`.
    pub fn entries(&self) -> Vec<&AssetEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| (a.priority, &a.path).cmp(&(b.priority, &b.path)));
        entries
    }

    /// One line per entry, newline terminated. An empty list is an empty file.
    pub fn serialize(&self) -> String {
        self.entries()
            .into_iter()
            .map(|entry| entry.render(self.style) + "\n")
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn serializes_by_priority_then_path() {
        let mut list = AssetList::new(ImportStyle::Scss);
        list.add("blocks/hero", None, DEFAULT_PRIORITY);
        list.add("partials/variables", Some(4), 10);
        list.add("blocks/cards", None, DEFAULT_PRIORITY);

        assert_eq!(
            list.serialize(),
            "@import \"partials/variables\"; // 10-4\n\
             @import \"blocks/cards\"; // 1000\n\
             @import \"blocks/hero\"; // 1000\n"
        );
    }

    #[rstest]
    #[case("import './modules/slider'; // 20-7", "./modules/slider", Some(7), 20)]
    #[case("import \"./blocks/hero\"; // 1000", "./blocks/hero", None, 1000)]
    #[case("@import \"blocks/hero\";", "blocks/hero", None, DEFAULT_PRIORITY)]
    #[case("  @import 'base'  ", "base", None, DEFAULT_PRIORITY)]
    fn parses_lenient_lines(
        #[case] line: &str,
        #[case] path: &str,
        #[case] id: Option<u64>,
        #[case] priority: u32,
    ) {
        let list = AssetList::parse(ImportStyle::Js, line);
        assert_eq!(list.get(path), Some(&AssetEntry::new(path, id, priority)));
    }

    #[test]
    fn same_path_is_replaced() {
        let mut list = AssetList::new(ImportStyle::Js);
        list.add("./modules/a", Some(1), 5);
        list.add("./modules/a", Some(1), 50);

        assert_eq!(list.len(), 1);
        assert_eq!(list.get("./modules/a").map(|e| e.priority), Some(50));
    }

    #[test]
    fn lookup_and_removal_by_id() {
        let mut list = AssetList::new(ImportStyle::Js);
        list.add("./modules/old-name", Some(3), 5);

        assert_eq!(list.get_by_id(3).map(|e| e.path.as_str()), Some("./modules/old-name"));
        assert!(list.remove_by_id(3).is_some());
        assert!(list.is_empty());
        assert!(list.remove_by_id(3).is_none());
    }

    #[test]
    fn empty_list_is_empty_text() {
        assert_eq!(AssetList::new(ImportStyle::Scss).serialize(), "");
    }
}
