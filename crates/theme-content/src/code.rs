//! Normalization of raw code fragments
//!
//! Payload code arrives as free-form text typed into an editor: mixed
//! indentation, optional `<?php` / `?>` wrappers, trailing blank lines. The
//! generators want tab-indented lines with no code-boundary lines.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder line marking where a compiled body is spliced into a
/// condition or loop fragment: leading tabs, `#TW` and three opaque
/// characters.
pub static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\t*#TW...$").expect("Invalid marker regex"));

static ONE_LINE_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<\?php\s*(.*?)\s*\?>\s*$").expect("Invalid wrapper regex")
});

static TRANSLATION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(_[_e]\(\s*'.+?',\s*')[a-z0-9_-]+('\s*\))").expect("Invalid translation regex")
});

pub fn is_marker_line(line: &str) -> bool {
    MARKER_PATTERN.is_match(line)
}

/// Split a raw fragment into normalized lines.
pub fn normalize_code(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<String> = raw
        .lines()
        .filter(|line| !matches!(line.trim_matches(' '), "<?php" | "?>"))
        .map(normalize_line)
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    // Only a one-line fragment may carry its own `<?php ... ?>` wrapper
    if let [line] = lines.as_mut_slice() {
        let unwrapped = ONE_LINE_WRAPPER.captures(line).map(|caps| caps[1].to_string());
        if let Some(unwrapped) = unwrapped {
            *line = unwrapped;
        }
    }

    lines
}

fn normalize_line(line: &str) -> String {
    let mut rest = line;
    let mut out = String::new();

    // Leading groups of four spaces become tabs, existing tabs stay.
    loop {
        if let Some(stripped) = rest.strip_prefix("    ") {
            out.push('\t');
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('\t') {
            out.push('\t');
            rest = stripped;
        } else {
            break;
        }
    }
    out.push_str(rest.trim_start_matches(' '));
    out
}

/// Rewrite the text domain of every `__( '...', 'domain' )` and
/// `_e( '...', 'domain' )` call.
pub fn retarget_text_domain(text: &str, domain: &str) -> String {
    TRANSLATION_CALL
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("{}{}{}", &caps[1], domain, &caps[2])
        })
        .into_owned()
}
