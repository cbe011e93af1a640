//! The three aggregate files every entity contributes to

use theme_blocks::{AssetList, ChunkDocument, ChunkType, ImportStyle};
use theme_fs::ThemePath;

use super::files::ThemeFiles;
use crate::Result;

/// Written once when missing and never touched again.
const FUNCTIONS_STUB: &str = "<?php\n\n// Theme customizations go here.\n// Generated registrations live in tw-functions.php.\nrequire_once get_template_directory() . '/tw-functions.php';\n";

/// Chunk types rebuilt from the payload on every full sync. Other chunks
/// (filters, actions, shortcodes and the like) are kept as they are.
const GENERATED_CHUNKS: [ChunkType; 9] = [
    ChunkType::Includes,
    ChunkType::PostType,
    ChunkType::Taxonomy,
    ChunkType::Block,
    ChunkType::BlockGroup,
    ChunkType::MenuPage,
    ChunkType::OptionsPage,
    ChunkType::Template,
    ChunkType::Part,
];

/// `tw-functions.php`, `styles.scss` and `main.js` held in memory for the
/// duration of a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregates {
    pub functions: ChunkDocument,
    pub styles: AssetList,
    pub scripts: AssetList,
}

impl Aggregates {
    /// Parse the aggregates as they are on disk; missing files are empty.
    pub fn load(files: &ThemeFiles<'_>) -> Result<Self> {
        let functions = files
            .read(ThemePath::GeneratedFunctions.as_str())?
            .unwrap_or_default();
        let styles = files.read(ThemePath::StylesScss.as_str())?.unwrap_or_default();
        let scripts = files.read(ThemePath::MainJs.as_str())?.unwrap_or_default();

        Ok(Self {
            functions: ChunkDocument::parse(&functions),
            styles: AssetList::parse(ImportStyle::Scss, &styles),
            scripts: AssetList::parse(ImportStyle::Js, &scripts),
        })
    }

    /// Drop every generated chunk and every import before a full rebuild.
    pub fn clear(&mut self) {
        for kind in GENERATED_CHUNKS {
            self.functions.remove_by_type(kind);
        }
        self.styles.clear();
        self.scripts.clear();
    }

    /// Write `tw-functions.php`, creating `functions.php` if it is missing.
    pub fn write_functions(&self, files: &mut ThemeFiles<'_>, domain: &str) {
        if !files.exists(ThemePath::Functions.as_str()) {
            files.save(ThemePath::Functions.as_str(), FUNCTIONS_STUB);
        }
        files.save(
            ThemePath::GeneratedFunctions.as_str(),
            &self.functions.serialize(&functions_preamble(domain)),
        );
    }

    pub fn write_styles(&self, files: &mut ThemeFiles<'_>) {
        files.save(ThemePath::StylesScss.as_str(), &self.styles.serialize());
    }

    pub fn write_scripts(&self, files: &mut ThemeFiles<'_>) {
        files.save(ThemePath::MainJs.as_str(), &self.scripts.serialize());
    }
}

/// Opening lines of `tw-functions.php`, ahead of the first chunk.
pub fn functions_preamble(domain: &str) -> String {
    format!("<?php\n\ndefine( 'TW_DOMAIN', '{domain}' );")
}
