//! Per-entity orchestrators
//!
//! Each entity kind knows which files it owns, how to delete the files of
//! entities that are gone (`prune`, full syncs only) and how to rebuild its
//! files, chunks and import entries (`build`). Builds run in payload order so
//! appended chunks follow the order of the payload lists.

mod block_groups;
mod blocks;
mod includes;
mod js_modules;
mod menu_pages;
mod options_pages;
mod parts;
mod post_types;
mod registration;
mod scss_partials;
mod taxonomies;
mod templates;

use regex::Regex;
use theme_blocks::{AssetList, DEFAULT_PRIORITY};
use theme_content::php::quote;
use theme_content::spaces_to_tabs;
use theme_view::{ElementNode, ViewCompiler};
use tracing::debug;

use crate::action::SyncAction;
use crate::payload::ThemePayload;
use crate::sync::{Aggregates, ThemeFiles};

pub use includes::SupportFile;

/// Everything an orchestrator reads and mutates during one sync.
pub struct SyncContext<'a> {
    pub payload: &'a ThemePayload,
    /// Support files copied into `includes/tw`
    pub support: &'a [SupportFile],
    pub files: ThemeFiles<'a>,
    pub aggregates: Aggregates,
}

/// Entity kinds in the order a full sync rebuilds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Includes,
    PostTypes,
    Taxonomies,
    Blocks,
    BlockGroups,
    MenuPages,
    OptionsPages,
    Templates,
    Parts,
    ScssPartials,
    JsModules,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        Self::Includes,
        Self::PostTypes,
        Self::Taxonomies,
        Self::Blocks,
        Self::BlockGroups,
        Self::MenuPages,
        Self::OptionsPages,
        Self::Templates,
        Self::Parts,
        Self::ScssPartials,
        Self::JsModules,
    ];

    /// The kinds an incremental sync of `action` rebuilds.
    pub fn scope(action: SyncAction) -> &'static [EntityKind] {
        match action {
            SyncAction::All => &Self::ALL,
            SyncAction::PostType => &[Self::PostTypes],
            SyncAction::Taxonomy => &[Self::Taxonomies],
            SyncAction::Block => &[Self::Blocks],
            SyncAction::BlockGroup => &[Self::BlockGroups],
            SyncAction::Part => &[Self::Parts],
            SyncAction::Template => &[Self::Templates],
            SyncAction::MenuPage => &[Self::MenuPages],
            SyncAction::OptionsPage => &[Self::OptionsPages],
            SyncAction::ScssPartial => &[Self::ScssPartials],
            SyncAction::JsModule => &[Self::JsModules],
            // Field sets are spliced into every field group
            SyncAction::FieldSet => &[
                Self::Templates,
                Self::Blocks,
                Self::PostTypes,
                Self::Taxonomies,
            ],
            SyncAction::Ping => &[],
        }
    }

    /// Whether this kind contributes chunks to `tw-functions.php`.
    pub fn touches_functions(self) -> bool {
        !matches!(self, Self::ScssPartials | Self::JsModules)
    }

    pub fn touches_styles(self) -> bool {
        matches!(
            self,
            Self::Blocks | Self::Templates | Self::Parts | Self::ScssPartials
        )
    }

    pub fn touches_scripts(self) -> bool {
        matches!(
            self,
            Self::Blocks | Self::Templates | Self::Parts | Self::JsModules
        )
    }

    /// Delete files of entities missing from the payload.
    pub fn prune(self, ctx: &mut SyncContext<'_>) {
        debug!(kind = ?self, "Pruning");
        match self {
            Self::PostTypes => post_types::prune(ctx),
            Self::Taxonomies => taxonomies::prune(ctx),
            Self::Blocks => blocks::prune(ctx),
            Self::MenuPages => menu_pages::prune(ctx),
            Self::OptionsPages => options_pages::prune(ctx),
            Self::Templates => templates::prune(ctx),
            Self::Parts => parts::prune(ctx),
            Self::ScssPartials => scss_partials::prune(ctx),
            Self::JsModules => js_modules::prune(ctx),
            Self::Includes | Self::BlockGroups => {}
        }
    }

    /// Rebuild every entity of this kind.
    pub fn build(self, ctx: &mut SyncContext<'_>) {
        debug!(kind = ?self, "Building");
        match self {
            Self::Includes => includes::build(ctx),
            Self::PostTypes => post_types::build(ctx),
            Self::Taxonomies => taxonomies::build(ctx),
            Self::Blocks => blocks::build(ctx),
            Self::BlockGroups => block_groups::build(ctx),
            Self::MenuPages => menu_pages::build(ctx),
            Self::OptionsPages => options_pages::build(ctx),
            Self::Templates => templates::build(ctx),
            Self::Parts => parts::build(ctx),
            Self::ScssPartials => scss_partials::build(ctx),
            Self::JsModules => js_modules::build(ctx),
        }
    }
}

/// `__( 'text', 'domain' )`
fn translated(text: &str, domain: &str) -> String {
    format!("__( {}, {} )", quote(text), quote(domain))
}

/// The hand-written view when present, else the compiled element trees.
fn view_content(compiler: &ViewCompiler<'_>, view: &[ElementNode], raw: Option<&str>) -> String {
    match raw {
        Some(raw) => raw.to_string(),
        None => compiler.compile_all(view),
    }
}

/// Write an entity's stylesheet or script and keep its import in step:
/// empty source deletes both.
fn sync_asset(
    files: &mut ThemeFiles<'_>,
    imports: &mut AssetList,
    file: &str,
    import: &str,
    source: &str,
) {
    if source.is_empty() {
        files.delete(file);
        imports.remove(import);
    } else {
        files.save(file, &spaces_to_tabs(source));
        imports.add(import, None, DEFAULT_PRIORITY);
    }
}

/// Delete files in `dir` whose name matches `pattern` but whose first
/// capture is not in `keep`. Returns the captured names that were deleted.
fn prune_dir(files: &mut ThemeFiles<'_>, dir: &str, pattern: &Regex, keep: &[String]) -> Vec<String> {
    let mut deleted = Vec::new();
    for name in files.list(dir) {
        let Some(captures) = pattern.captures(&name) else {
            continue;
        };
        let stem = captures[1].to_string();
        if !keep.contains(&stem) {
            let path = if dir.is_empty() {
                name.clone()
            } else {
                format!("{dir}/{name}")
            };
            files.delete(&path);
            deleted.push(stem);
        }
    }
    deleted
}
