//! Script modules, imported by `main.js` when flagged

use std::sync::LazyLock;

use regex::Regex;
use theme_content::spaces_to_tabs;

use super::{SyncContext, prune_dir};

static MODULE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9.-]+)\.js$").expect("Invalid module file regex"));

const DIR: &str = "assets/js/modules";

fn import_path(name: &str) -> String {
    format!("./modules/{name}")
}

pub(super) fn prune(ctx: &mut SyncContext<'_>) {
    let keep: Vec<String> = ctx.payload.js_modules.iter().map(|m| m.name.clone()).collect();
    for name in prune_dir(&mut ctx.files, DIR, &MODULE_FILE, &keep) {
        ctx.aggregates.scripts.remove(&import_path(&name));
    }
}

pub(super) fn build(ctx: &mut SyncContext<'_>) {
    let payload = ctx.payload;
    for module in &payload.js_modules {
        let path = import_path(&module.name);

        let renamed = ctx
            .aggregates
            .scripts
            .get_by_id(module.id)
            .filter(|old| old.path != path)
            .map(|old| old.path.clone());
        if let Some(old) = renamed {
            let stem = old.rsplit('/').next().unwrap_or(&old);
            ctx.files.delete(&format!("{DIR}/{stem}.js"));
            ctx.aggregates.scripts.remove(&old);
        }

        ctx.files
            .save(&format!("{DIR}/{}.js", module.name), &spaces_to_tabs(&module.js));
        if module.import {
            ctx.aggregates
                .scripts
                .add(path, Some(module.id), module.priority);
        } else {
            ctx.aggregates.scripts.remove(&path);
        }
    }
}
