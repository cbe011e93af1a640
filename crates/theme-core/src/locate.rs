//! Finding a theme's directory among the installed themes

use std::fs;
use std::path::{Path, PathBuf};

use theme_content::slug;
use theme_fs::ThemePath;
use tracing::debug;

use crate::Result;
use crate::payload::ThemePayload;
use crate::stylesheet::Stylesheet;

/// The child of `themes_dir` whose header carries the payload's theme id,
/// else a new directory named after the theme.
///
/// # Errors
///
/// Returns an error if `themes_dir` exists but cannot be listed, or a
/// header cannot be read.
pub fn locate_theme_dir(themes_dir: &Path, payload: &ThemePayload) -> Result<PathBuf> {
    if let Some(dir) = find_by_id(themes_dir, payload.id)? {
        debug!(dir = %dir.display(), "Found theme by id");
        return Ok(dir);
    }

    let name = slug(&payload.name).replace('-', "");
    debug!(name, "No theme with this id, using name");
    Ok(themes_dir.join(name))
}

/// The child directory whose `style.css` has `TWID: <id>`.
pub fn find_by_id(themes_dir: &Path, id: u64) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(themes_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(theme_fs::Error::list(themes_dir, e).into()),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| theme_fs::Error::list(themes_dir, e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    for dir in dirs {
        let header = dir.join(ThemePath::Stylesheet.as_str());
        if let Some(text) = theme_fs::io::read_text_if_exists(&header)?
            && Stylesheet::parse(&text).theme_id() == Some(id)
        {
            return Ok(Some(dir));
        }
    }
    Ok(None)
}
