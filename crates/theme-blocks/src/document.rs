//! Chunk documents: parse, upsert, serialize

use tracing::{debug, warn};

use crate::chunk::{Chunk, ChunkType};

/// Outcome of [`ChunkDocument::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// An existing chunk with the same identity was replaced at this index.
    Replaced(usize),
    Appended,
}

/// An aggregate file as an ordered list of chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkDocument {
    chunks: Vec<Chunk>,
}

impl ChunkDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a previously written document.
    ///
    /// Runs of lines separated by blank lines become chunks when their first
    /// line starts with a known type prefix. Everything else (the preamble,
    /// hand edits) is left out of the document.
    pub fn parse(text: &str) -> Self {
        let mut chunks = Vec::new();

        for run in runs(text) {
            let first = run[0];
            match ChunkType::classify(first) {
                Some(kind) => chunks.push(Chunk::new(kind, run)),
                None if first.starts_with("//") => {
                    warn!(line = first, "Dropping unclassified chunk");
                }
                None => debug!(line = first, "Skipping non-chunk run"),
            }
        }

        Self { chunks }
    }

    /// Replace the chunk with the same identity in place, or append.
    pub fn upsert(&mut self, chunk: Chunk) -> Upsert {
        match self.position(&chunk) {
            Some(index) => {
                debug!(kind = %chunk.kind(), index, "Replacing chunk");
                self.chunks[index] = chunk;
                Upsert::Replaced(index)
            }
            None => {
                debug!(kind = %chunk.kind(), "Appending chunk");
                self.chunks.push(chunk);
                Upsert::Appended
            }
        }
    }

    /// The existing chunk with the same identity as `chunk`.
    pub fn get(&self, chunk: &Chunk) -> Option<&Chunk> {
        self.position(chunk).map(|index| &self.chunks[index])
    }

    pub fn position(&self, chunk: &Chunk) -> Option<usize> {
        let identity = chunk.identity()?;
        self.chunks
            .iter()
            .position(|existing| existing.identity().as_ref() == Some(&identity))
    }

    /// Remove every chunk of `kind`, returning how many were removed.
    pub fn remove_by_type(&mut self, kind: ChunkType) -> usize {
        let before = self.chunks.len();
        self.chunks.retain(|chunk| chunk.kind() != kind);
        before - self.chunks.len()
    }

    pub fn remove_all(&mut self) {
        self.chunks.clear();
    }

    pub fn chunks_of_type(&self, kind: ChunkType) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(move |chunk| chunk.kind() == kind)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The preamble, then every chunk, separated by blank lines and ending
    /// with a newline.
    pub fn serialize(&self, preamble: &str) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.chunks.len() + 1);
        let preamble = preamble.trim_end();
        if !preamble.is_empty() {
            parts.push(preamble.to_string());
        }
        parts.extend(self.chunks.iter().map(Chunk::render));

        let mut out = parts.join("\n\n");
        out.push('\n');
        out
    }
}

/// Maximal runs of non-blank lines.
fn runs(text: &str) -> Vec<Vec<&str>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(name: &str, id: u32) -> Chunk {
        Chunk::new(
            ChunkType::Block,
            [
                ChunkType::Block.header(name, id),
                format!("include get_template_directory() . '/includes/blocks/fields-{name}.php';"),
            ],
        )
    }

    #[test]
    fn parse_skips_preamble() {
        let text = "<?php\n\ndefine( 'TW_DOMAIN', 'acme' );\n\n// Register block: hero (#1)\ninclude 'a';\n";
        let doc = ChunkDocument::parse(text);

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.chunks()[0].kind(), ChunkType::Block);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut doc = ChunkDocument::new();
        doc.upsert(block("a", 1));
        doc.upsert(block("b", 2));
        doc.upsert(block("c", 3));

        assert_eq!(doc.upsert(block("b-renamed", 2)), Upsert::Replaced(1));
        let labels: Vec<_> = doc.chunks().iter().filter_map(Chunk::label).collect();
        assert_eq!(labels, vec!["a", "b-renamed", "c"]);

        assert_eq!(doc.upsert(block("d", 4)), Upsert::Appended);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn get_finds_previous_version() {
        let mut doc = ChunkDocument::new();
        doc.upsert(block("old-name", 9));

        let previous = doc.get(&block("new-name", 9)).and_then(Chunk::label);
        assert_eq!(previous, Some("old-name"));
        assert!(doc.get(&block("x", 10)).is_none());
    }

    #[test]
    fn remove_by_type_keeps_others() {
        let mut doc = ChunkDocument::new();
        doc.upsert(block("a", 1));
        doc.upsert(Chunk::new(ChunkType::Includes, ["// Include the theme support files"]));
        doc.upsert(block("b", 2));

        assert_eq!(doc.remove_by_type(ChunkType::Block), 2);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.chunks_of_type(ChunkType::Includes).count(), 1);
    }

    #[test]
    fn serialize_separates_with_blank_lines() {
        let mut doc = ChunkDocument::new();
        doc.upsert(block("a", 1));
        doc.upsert(block("b", 2));

        assert_eq!(
            doc.serialize("<?php"),
            "<?php\n\n\
             // Register block: a (#1)\ninclude get_template_directory() . '/includes/blocks/fields-a.php';\n\n\
             // Register block: b (#2)\ninclude get_template_directory() . '/includes/blocks/fields-b.php';\n"
        );
    }

    #[test]
    fn empty_document_serializes_preamble_only() {
        assert_eq!(ChunkDocument::new().serialize("<?php\n"), "<?php\n");
        assert_eq!(ChunkDocument::new().serialize(""), "\n");
    }
}
