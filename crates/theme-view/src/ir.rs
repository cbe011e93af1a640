//! Intermediate line tree
//!
//! Compiled bodies are kept as nested segments while the surrounding code
//! blocks are assembled, and flattened into plain lines once.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Line(String),
    Nested(Vec<Segment>),
}

impl Segment {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    pub fn line_count(&self) -> usize {
        match self {
            Self::Line(_) => 1,
            Self::Nested(children) => children.iter().map(Segment::line_count).sum(),
        }
    }
}

/// Total number of lines once flattened.
pub fn line_count(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::line_count).sum()
}

pub fn flatten(segments: Vec<Segment>) -> Vec<String> {
    let mut out = Vec::with_capacity(line_count(&segments));
    flatten_into(segments, &mut out);
    out
}

fn flatten_into(segments: Vec<Segment>, out: &mut Vec<String>) {
    for segment in segments {
        match segment {
            Segment::Line(line) => out.push(line),
            Segment::Nested(children) => flatten_into(children, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_depth_first() {
        let tree = vec![
            Segment::line("a"),
            Segment::Nested(vec![
                Segment::line("b"),
                Segment::Nested(vec![Segment::line("c")]),
            ]),
            Segment::line("d"),
        ];

        assert_eq!(line_count(&tree), 4);
        assert_eq!(flatten(tree), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_nested_contributes_nothing() {
        let tree = vec![Segment::Nested(vec![]), Segment::line("x")];
        assert_eq!(flatten(tree), vec!["x"]);
    }
}
