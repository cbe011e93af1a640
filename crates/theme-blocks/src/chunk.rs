//! Chunk types, identities and the chunk record itself

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use theme_content::TextBlock;

/// Trailing `(#<id>)` marker on a chunk's first line.
static ID_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(#([^)\s]+)\)\s*$").expect("Invalid id marker regex"));

/// Every kind of chunk `tw-functions.php` may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChunkType {
    Includes,
    PostType,
    Taxonomy,
    Block,
    BlockGroup,
    MenuPage,
    OptionsPage,
    Template,
    Part,
    Style,
    Script,
    Filter,
    Action,
    Ajax,
    Shortcode,
    Editor,
}

impl ChunkType {
    pub const ALL: [ChunkType; 16] = [
        Self::Includes,
        Self::PostType,
        Self::Taxonomy,
        Self::Block,
        Self::BlockGroup,
        Self::MenuPage,
        Self::OptionsPage,
        Self::Template,
        Self::Part,
        Self::Style,
        Self::Script,
        Self::Filter,
        Self::Action,
        Self::Ajax,
        Self::Shortcode,
        Self::Editor,
    ];

    /// The comment every chunk of this type starts with.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Includes => "// Include the theme support files",
            Self::PostType => "// Register post type:",
            Self::Taxonomy => "// Register taxonomy:",
            Self::Block => "// Register block:",
            Self::BlockGroup => "// Register block group:",
            Self::MenuPage => "// Register menu page:",
            Self::OptionsPage => "// Register options page:",
            Self::Template => "// Template specific options:",
            Self::Part => "// Register template part:",
            Self::Style => "// Enqueue style:",
            Self::Script => "// Enqueue script:",
            Self::Filter => "// Add filter:",
            Self::Action => "// Add action:",
            Self::Ajax => "// Add Ajax:",
            Self::Shortcode => "// Add shortcode:",
            Self::Editor => "// Editor settings",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Includes => "includes",
            Self::PostType => "post-type",
            Self::Taxonomy => "taxonomy",
            Self::Block => "block",
            Self::BlockGroup => "block-group",
            Self::MenuPage => "menu-page",
            Self::OptionsPage => "options-page",
            Self::Template => "template",
            Self::Part => "part",
            Self::Style => "style",
            Self::Script => "script",
            Self::Filter => "filter",
            Self::Action => "action",
            Self::Ajax => "ajax",
            Self::Shortcode => "shortcode",
            Self::Editor => "editor",
        }
    }

    /// Singleton chunks occur at most once per document.
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Includes | Self::Editor)
    }

    /// Classify a chunk by its first line.
    pub fn classify(first_line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| first_line.starts_with(kind.prefix()))
    }

    /// First line for an entity chunk: `<prefix> <label> (#<id>)`.
    pub fn header(self, label: &str, id: impl fmt::Display) -> String {
        format!("{} {label} (#{id})", self.prefix())
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown chunk type: {s}"))
    }
}

/// What makes two chunks "the same" for upserts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Singleton(ChunkType),
    Entity(ChunkType, String),
}

/// One addressable unit of an aggregate file.
///
/// Bodies never contain blank lines since a blank line separates chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    kind: ChunkType,
    lines: Vec<String>,
}

impl Chunk {
    pub fn new<I, S>(kind: ChunkType, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(Into::into)
            .filter(|line: &String| !line.trim().is_empty())
            .collect();
        Self { kind, lines }
    }

    pub fn from_block(kind: ChunkType, block: TextBlock) -> Self {
        Self::new(kind, block.into_lines())
    }

    pub fn kind(&self) -> ChunkType {
        self.kind
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// Identity used to match this chunk against existing ones. Repeatable
    /// chunks without an `(#id)` marker have none.
    pub fn identity(&self) -> Option<Identity> {
        if self.kind.is_singleton() {
            return Some(Identity::Singleton(self.kind));
        }
        ID_MARKER
            .captures(self.first_line())
            .map(|caps| Identity::Entity(self.kind, caps[1].to_string()))
    }

    /// The entity label between the type prefix and the id marker, e.g.
    /// `hero` for `// Register block: hero (#3)`.
    pub fn label(&self) -> Option<&str> {
        let rest = self.first_line().strip_prefix(self.kind.prefix())?;
        let end = ID_MARKER.find(rest).map_or(rest.len(), |m| m.start());
        let label = rest[..end].trim();
        (!label.is_empty()).then_some(label)
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
