//! Admin menu pages: view, stylesheet, script and the `TW_Menu_Page` chunk

use std::sync::LazyLock;

use regex::Regex;
use theme_blocks::{Chunk, ChunkType};
use theme_content::{ArrayArgs, PhpValue, spaces_to_tabs};
use theme_view::ViewCompiler;

use super::{SyncContext, prune_dir, translated, view_content};
use crate::payload::MenuPage;

static ASSET_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9_-]+)\.menu-page\.(?:css|css\.map|scss|js|js\.map)$")
        .expect("Invalid menu page asset regex")
});
static VIEW_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9_-]+)\.php$").expect("Invalid view file regex"));

const ASSET_DIRS: [&str; 4] = ["assets/css", "assets/scss", "assets/js", "assets/js/dist"];

/// Every file a menu page owns, compiled output included.
struct MenuPagePaths {
    scss: String,
    css: [String; 2],
    js: String,
    bundle: [String; 2],
    view: String,
}

impl MenuPagePaths {
    fn new(slug: &str) -> Self {
        Self {
            scss: format!("assets/scss/{slug}.menu-page.scss"),
            css: [
                format!("assets/css/{slug}.menu-page.css"),
                format!("assets/css/{slug}.menu-page.css.map"),
            ],
            js: format!("assets/js/{slug}.menu-page.js"),
            bundle: [
                format!("assets/js/dist/{slug}.menu-page.js"),
                format!("assets/js/dist/{slug}.menu-page.js.map"),
            ],
            view: format!("views/menu-pages/{slug}.php"),
        }
    }

    fn all(&self) -> Vec<&String> {
        let mut paths = vec![&self.scss, &self.js, &self.view];
        paths.extend(&self.css);
        paths.extend(&self.bundle);
        paths
    }
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx
        .payload
        .menu_pages
        .iter()
        .map(|page| page.menu_slug.clone())
        .collect();

    for dir in ASSET_DIRS {
        prune_dir(&mut ctx.files, dir, &ASSET_FILE, &keep);
    }
    prune_dir(&mut ctx.files, "views/menu-pages", &VIEW_FILE, &keep);
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for page in &payload.menu_pages {
        let chunk = chunk(page, &payload.domain);

        let renamed = ctx
            .aggregates
            .functions
            .get(&chunk)
            .and_then(Chunk::label)
            .filter(|old| *old != page.menu_slug)
            .map(str::to_string);
        if let Some(old) = renamed {
            for path in MenuPagePaths::new(&old).all() {
                ctx.files.delete(path);
            }
        }

        // Menu page assets are compiled separately, not imported
        let paths = MenuPagePaths::new(&page.menu_slug);
        if page.scss.is_empty() {
            for path in [&paths.scss, &paths.css[0], &paths.css[1]] {
                ctx.files.delete(path);
            }
        } else {
            ctx.files.save(&paths.scss, &spaces_to_tabs(&page.scss));
        }
        if page.js.is_empty() {
            for path in [&paths.js, &paths.bundle[0], &paths.bundle[1]] {
                ctx.files.delete(path);
            }
        } else {
            ctx.files.save(&paths.js, &spaces_to_tabs(&page.js));
        }

        let compiler = ViewCompiler::new(&payload.domain);
        let view = view_content(&compiler, &page.view, page.view_raw.as_deref());
        ctx.files.save(&paths.view, &spaces_to_tabs(&view));

        ctx.aggregates.functions.upsert(chunk);
    }
}

fn chunk(page: &MenuPage, domain: &str) -> Chunk {
    let mut args = ArrayArgs::new();
    args.add("page_title", PhpValue::raw(translated(&page.page_title, domain)))
        .add("menu_title", PhpValue::raw(translated(&page.menu_title, domain)))
        .add("menu_slug", page.menu_slug.as_str())
        .add("capability", page.capability.as_str());
    if page.parent_slug.is_empty() {
        args.add("icon_url", page.icon_url.as_str());
    } else {
        args.add("parent_slug", page.parent_slug.as_str());
    }
    args.add("position", PhpValue::from_json(&page.position))
        .add("scss", !page.scss.is_empty())
        .add("js", !page.js.is_empty());

    let mut lines = vec![
        ChunkType::MenuPage.header(&page.menu_slug, page.id),
        "new TW_Menu_Page(".to_string(),
        "\tarray(".to_string(),
    ];
    lines.extend(args.format(2));
    lines.push("\t)".to_string());
    lines.push(");".to_string());

    Chunk::new(ChunkType::MenuPage, lines)
}
