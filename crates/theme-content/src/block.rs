//! Named text blocks

/// `n` tab characters.
pub fn indent(n: usize) -> String {
    "\t".repeat(n)
}

/// Prefix every line with `n` tabs.
pub fn indent_lines<I, S>(lines: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = indent(n);
    lines
        .into_iter()
        .map(|line| format!("{prefix}{}", line.as_ref()))
        .collect()
}

/// A single named unit of generated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    name: String,
    lines: Vec<String>,
}

impl TextBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one line as-is.
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// Append one line at the given indentation.
    pub fn line_at(&mut self, level: usize, line: impl AsRef<str>) -> &mut Self {
        self.lines.push(format!("{}{}", indent(level), line.as_ref()));
        self
    }

    /// Append lines as-is.
    pub fn extend<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Append lines, each prefixed with `level` tabs.
    pub fn extend_indented<I, S>(&mut self, level: usize, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lines.extend(indent_lines(lines, level));
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_indented_with_tabs() {
        let mut block = TextBlock::new("part");
        block
            .line("// Register template part: hero.php (#4)")
            .line("TW_Part::register(")
            .line_at(1, "'hero',")
            .line(");");

        assert_eq!(block.name(), "part");
        assert_eq!(
            block.render(),
            "// Register template part: hero.php (#4)\nTW_Part::register(\n\t'hero',\n);"
        );
    }

    #[test]
    fn extend_indented_prefixes_each_line() {
        let mut block = TextBlock::new("view");
        block.extend_indented(2, ["a", "b"]);
        assert_eq!(block.lines(), ["\t\ta", "\t\tb"]);
    }
}
