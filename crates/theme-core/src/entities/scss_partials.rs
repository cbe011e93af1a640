//! Stylesheet partials, imported by `styles.scss` in priority order

use std::sync::LazyLock;

use regex::Regex;
use theme_content::spaces_to_tabs;

use super::{SyncContext, prune_dir};

static PARTIAL_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_([a-z0-9-]+)\.scss$").expect("Invalid partial file regex"));

const DIR: &str = "assets/scss/partials";

fn import_path(name: &str) -> String {
    format!("partials/{name}")
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx.payload.scss_partials.iter().map(|p| p.name.clone()).collect();
    for name in prune_dir(&mut ctx.files, DIR, &PARTIAL_FILE, &keep) {
        ctx.aggregates.styles.remove(&import_path(&name));
    }
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for partial in &payload.scss_partials {
        let path = import_path(&partial.name);

        // A different path under the same id means the partial was renamed
        let renamed = ctx
            .aggregates
            .styles
            .get_by_id(partial.id)
            .filter(|old| old.path != path)
            .map(|old| old.path.clone());
        if let Some(old) = renamed {
            let stem = old.rsplit('/').next().unwrap_or(&old);
            ctx.files.delete(&format!("{DIR}/_{stem}.scss"));
            ctx.aggregates.styles.remove(&old);
        }

        ctx.files.save(
            &format!("{DIR}/_{}.scss", partial.name),
            &spaces_to_tabs(&partial.scss),
        );
        ctx.aggregates
            .styles
            .add(path, Some(partial.id), partial.priority);
    }
}
