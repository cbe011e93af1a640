//! Naming and whitespace helpers

/// Convert a camelCase payload key into a snake_case schema key.
///
/// Keys that are already snake_case pass through unchanged.
pub fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// File-name slug of an entity name: lowercase, underscores and spaces become
/// hyphens, anything outside `[a-z0-9-]` is dropped.
pub fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .filter_map(|ch| match ch {
            '_' | ' ' => Some('-'),
            c if c.is_ascii_alphanumeric() || c == '-' => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

/// Replace leading pairs of spaces with tabs on every line.
pub fn spaces_to_tabs(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let spaces = line.len() - line.trim_start_matches(' ').len();
            let tabs = spaces / 2;
            format!("{}{}", "\t".repeat(tabs), &line[tabs * 2..])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of leading tabs.
pub fn count_indents(line: &str) -> usize {
    line.chars().take_while(|c| *c == '\t').count()
}
