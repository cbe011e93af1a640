//! Element tree to PHP view lines

use std::sync::LazyLock;

use regex::{Captures, Regex};
use theme_content::{count_indents, indent, is_marker_line, retarget_text_domain};
use tracing::{debug, warn};

use crate::ir::{self, Segment};
use crate::node::{ElementKind, ElementNode, RelatedEntity};

/// Tags that never get a closing tag.
pub const VOID_TAGS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link", "meta",
    "param", "source", "track", "wbr",
];

static SHORT_IF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^if\s*\(\s*(.+?)\s*\)\s*\{$").expect("Invalid if regex"));

static SHORT_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(for|foreach|while)\s*\(\s*(.+?)\s*\)\s*\{$").expect("Invalid loop regex")
});

static FLAT_CLASSES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\$classes = array\([a-zA-Z0-9_\-'\s,]+?\);\z")
        .expect("Invalid classes regex")
});

static FLAT_ATTRIBUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\$atts = array\([a-zA-Z0-9_\-'\s=>,]+?\);\z")
        .expect("Invalid attributes regex")
});

static CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([a-zA-Z0-9_-]+)'").expect("Invalid class token regex"));

static ATTRIBUTE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([a-zA-Z0-9_-]+)'\s*=>\s*(?:'([a-zA-Z0-9_-]*)'|([a-zA-Z0-9_-]+))")
        .expect("Invalid attribute token regex")
});

static SLUGGED_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(header|footer|sidebar)-([a-z0-9-]+)$").expect("Invalid template regex")
});

/// Compiles element trees for one view file.
///
/// Related templates, parts and block groups resolve the `foreign_key` of
/// reference nodes; references that do not resolve compile to nothing.
#[derive(Debug, Clone, Copy)]
pub struct ViewCompiler<'a> {
    domain: &'a str,
    templates: &'a [RelatedEntity],
    parts: &'a [RelatedEntity],
    groups: &'a [RelatedEntity],
}

impl<'a> ViewCompiler<'a> {
    /// A compiler retargeting translation calls to `domain`. An empty domain
    /// leaves them untouched.
    pub fn new(domain: &'a str) -> Self {
        Self {
            domain,
            templates: &[],
            parts: &[],
            groups: &[],
        }
    }

    pub fn with_templates(mut self, templates: &'a [RelatedEntity]) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_parts(mut self, parts: &'a [RelatedEntity]) -> Self {
        self.parts = parts;
        self
    }

    pub fn with_groups(mut self, groups: &'a [RelatedEntity]) -> Self {
        self.groups = groups;
        self
    }

    /// Compile one top-level element.
    pub fn compile(&self, node: &ElementNode) -> String {
        self.compile_lines(node, 0).join("\n")
    }

    /// Compile the top-level elements of a view file.
    pub fn compile_all(&self, nodes: &[ElementNode]) -> String {
        nodes
            .iter()
            .map(|node| self.compile(node))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Compile an element at the given indentation into final lines.
    pub fn compile_lines(&self, node: &ElementNode, level: usize) -> Vec<String> {
        ir::flatten(self.node(node, level))
            .into_iter()
            .map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else if self.domain.is_empty() {
                    line
                } else {
                    retarget_text_domain(&line, self.domain)
                }
            })
            .collect()
    }

    fn node(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        if !node.condition.is_empty() {
            self.condition(node, level)
        } else if !node.loop_code.is_empty() {
            self.loop_block(node, level)
        } else {
            self.element(node, level)
        }
    }

    fn condition(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        let body = |at: usize| {
            if node.loop_code.is_empty() {
                self.element(node, at)
            } else {
                self.loop_block(node, at)
            }
        };

        match short_form(&node.condition, &SHORT_IF) {
            Some(caps) => {
                let tabs = indent(level);
                vec![
                    Segment::Line(format!("{tabs}<?php if ( {} ) : ?>", &caps[1])),
                    Segment::Nested(body(level + 1)),
                    Segment::Line(format!("{tabs}<?php endif ?>")),
                ]
            }
            None => general_form(&node.condition, level, body),
        }
    }

    fn loop_block(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        let body = |at: usize| self.element(node, at);

        match short_form(&node.loop_code, &SHORT_LOOP) {
            Some(caps) => {
                let tabs = indent(level);
                let keyword = &caps[1];
                vec![
                    Segment::Line(format!("{tabs}<?php {keyword} ( {} ) : ?>", &caps[2])),
                    Segment::Nested(body(level + 1)),
                    Segment::Line(format!("{tabs}<?php end{keyword} ?>")),
                ]
            }
            None => general_form(&node.loop_code, level, body),
        }
    }

    fn element(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        match node.kind {
            ElementKind::Html => self.html(node, level),
            ElementKind::TemplateRef => self.template(node, level),
            ElementKind::PartRef => self.part(node, level),
            ElementKind::GroupRef => self.group(node, level),
            ElementKind::TextOnly => code_block(&node.text, level),
            ElementKind::Unknown => {
                debug!(tag = %node.tag, "Skipping element of unknown type");
                Vec::new()
            }
        }
    }

    fn html(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        let tabs = indent(level);
        let mut out = Vec::new();

        let flat_classes = flat_classes(&node.classes);
        let flat_attributes = flat_attributes(&node.attributes);

        let mut class_attr = String::new();
        if !node.classes.is_empty() {
            match &flat_classes {
                Some(classes) if classes.is_empty() => {}
                Some(classes) => class_attr = format!(" class=\"{}\"", classes.join(" ")),
                None => {
                    class_attr = " class=\"<?php echo implode( ' ', $classes ); ?>\"".to_string();
                    out.push(Segment::Line(format!("{tabs}<?php")));
                    out.extend(indented(&node.classes, level + 1));
                    // Computed attributes continue the same code block.
                    if !node.attributes.is_empty() && flat_attributes.is_none() {
                        out.push(Segment::line(""));
                    } else {
                        out.push(Segment::Line(format!("{tabs}?>")));
                    }
                }
            }
        }

        let mut attributes_attr = String::new();
        if !node.attributes.is_empty() {
            match &flat_attributes {
                Some(attributes) if attributes.is_empty() => {}
                Some(attributes) => attributes_attr = format!(" {}", attributes.join(" ")),
                None => {
                    attributes_attr = " <?php echo tw_element_attributes( $atts ); ?>".to_string();
                    if node.classes.is_empty() || flat_classes.is_some() {
                        out.push(Segment::Line(format!("{tabs}<?php")));
                    }
                    out.extend(indented(&node.attributes, level + 1));
                    out.push(Segment::Line(format!("{tabs}?>")));
                }
            }
        }

        out.push(Segment::Line(format!(
            "{tabs}<{}{class_attr}{attributes_attr}>",
            node.tag
        )));

        out.extend(code_block(&node.text, level + 1));

        for child in &node.children {
            out.push(Segment::Nested(self.node(child, level + 1)));
        }

        let tag = node.tag.to_ascii_lowercase();
        if !VOID_TAGS.contains(&tag.as_str()) {
            out.push(Segment::Line(format!("{tabs}</{}>", node.tag)));
        }

        if ir::line_count(&out) == 3 {
            let joined: String = ir::flatten(out).iter().map(|line| line.trim()).collect();
            return vec![Segment::Line(format!("{tabs}{joined}"))];
        }

        out
    }

    fn template(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        let name = node
            .foreign_key
            .and_then(|id| RelatedEntity::find(self.templates, id))
            .map_or(node.tag.as_str(), |template| template.name.as_str());

        let call = match name {
            "header" => "get_header()".to_string(),
            "footer" => "get_footer()".to_string(),
            "sidebar" => "get_sidebar()".to_string(),
            "searchform" => "get_search_form()".to_string(),
            other => match SLUGGED_TEMPLATE.captures(other) {
                Some(caps) => format!("get_{}( '{}' )", &caps[1], &caps[2]),
                None => {
                    debug!(name = other, "Template reference has no theme call");
                    String::new()
                }
            },
        };

        vec![Segment::Line(format!("{}<?php {call}; ?>", indent(level)))]
    }

    fn part(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        let Some(part) = resolve(self.parts, node, "part") else {
            return Vec::new();
        };
        let tabs = indent(level);

        if node.part_args.is_empty() {
            return vec![Segment::Line(format!(
                "{tabs}<?php TW_Part::render( '{}' ); ?>",
                part.name
            ))];
        }

        let mut out = vec![Segment::Line(format!("{tabs}<?php"))];
        out.extend(indented(&node.part_args, level + 1));
        out.push(Segment::Line(format!(
            "{}TW_Part::render( '{}', $args );",
            indent(level + 1),
            part.name
        )));
        out.push(Segment::Line(format!("{tabs}?>")));
        out
    }

    fn group(&self, node: &ElementNode, level: usize) -> Vec<Segment> {
        match resolve(self.groups, node, "block group") {
            Some(group) => vec![Segment::Line(format!(
                "{}<?php TW_Block_Group::render( '{}' ); ?>",
                indent(level),
                group.name
            ))],
            None => Vec::new(),
        }
    }
}

fn resolve<'r>(
    list: &'r [RelatedEntity],
    node: &ElementNode,
    what: &str,
) -> Option<&'r RelatedEntity> {
    let found = node.foreign_key.and_then(|id| RelatedEntity::find(list, id));
    if found.is_none() {
        warn!(foreign_key = ?node.foreign_key, what, "Dropping unresolved reference");
    }
    found
}

/// `if ( expr ) {` / marker / `}` style fragments.
fn short_form<'c>(lines: &'c [String], opener: &Regex) -> Option<Captures<'c>> {
    if lines.len() != 3 || !is_marker_line(&lines[1]) || lines[2] != "}" {
        return None;
    }
    opener.captures(&lines[0])
}

/// The fragment as a code block, with the body spliced in at every marker
/// line by closing and reopening the block around it.
fn general_form(
    lines: &[String],
    level: usize,
    body: impl Fn(usize) -> Vec<Segment>,
) -> Vec<Segment> {
    let tabs = indent(level);
    let mut out = vec![Segment::Line(format!("{tabs}<?php"))];

    for line in lines {
        let line = format!("{}{line}", indent(level + 1));
        if is_marker_line(&line) {
            out.push(Segment::Line(format!("{tabs}?>")));
            out.push(Segment::Nested(body(count_indents(&line) - 1)));
            out.push(Segment::Line(format!("{tabs}<?php")));
        } else {
            out.push(Segment::Line(line));
        }
    }

    out.push(Segment::Line(format!("{tabs}?>")));
    out
}

fn indented(lines: &[String], level: usize) -> impl Iterator<Item = Segment> + '_ {
    let tabs = indent(level);
    lines
        .iter()
        .map(move |line| Segment::Line(format!("{tabs}{line}")))
}

/// Free code: one line inline, several lines in their own block.
fn code_block(lines: &[String], level: usize) -> Vec<Segment> {
    let tabs = indent(level);
    match lines {
        [] => Vec::new(),
        [line] => vec![Segment::Line(format!("{tabs}<?php {line} ?>"))],
        _ => {
            let mut out = vec![Segment::Line(format!("{tabs}<?php"))];
            out.extend(indented(lines, level + 1));
            out.push(Segment::Line(format!("{tabs}?>")));
            out
        }
    }
}

fn flat_classes(lines: &[String]) -> Option<Vec<String>> {
    let code = lines.join("\n");
    if lines.is_empty() || !FLAT_CLASSES.is_match(&code) {
        return None;
    }
    let list = &code[code.find('(').map_or(0, |i| i + 1)..];
    Some(
        CLASS_TOKEN
            .captures_iter(list)
            .map(|caps| caps[1].to_string())
            .collect(),
    )
}

fn flat_attributes(lines: &[String]) -> Option<Vec<String>> {
    let code = lines.join("\n");
    if lines.is_empty() || !FLAT_ATTRIBUTES.is_match(&code) {
        return None;
    }
    Some(
        ATTRIBUTE_TOKEN
            .captures_iter(&code)
            .map(|caps| {
                let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                if value.is_empty() {
                    caps[1].to_string()
                } else {
                    format!("{}=\"{value}\"", &caps[1])
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn compile(node: &ElementNode) -> Vec<String> {
        ViewCompiler::new("acme").compile_lines(node, 0)
    }

    #[test]
    fn single_line_text_collapses() {
        let node = ElementNode::html("p").with_text("the_title();");
        assert_eq!(compile(&node), vec!["<p><?php the_title(); ?></p>"]);
    }

    #[test]
    fn empty_element_keeps_two_lines() {
        assert_eq!(compile(&ElementNode::html("div")), vec!["<div>", "</div>"]);
    }

    #[test]
    fn multi_line_text_gets_code_block() {
        let node = ElementNode::html("div").with_text("$a = 1;\n\necho $a;");
        assert_eq!(
            compile(&node),
            vec!["<div>", "\t<?php", "\t\t$a = 1;", "", "\t\techo $a;", "\t?>", "</div>"]
        );
    }

    #[test]
    fn void_tags_never_close() {
        let node = ElementNode::html("img")
            .with_classes("$classes = array( 'logo' );")
            .with_child(ElementNode::html("span").with_text("echo 1;"));
        let lines = compile(&node);

        assert_eq!(lines, vec!["<img class=\"logo\">", "\t<span><?php echo 1; ?></span>"]);
        assert!(lines.iter().all(|line| !line.contains("</img>")));
    }

    #[test]
    fn flat_classes_and_attributes_are_inlined() {
        let node = ElementNode::html("div")
            .with_classes("$classes = array( 'card', 'card--wide' );")
            .with_attributes("$atts = array(\n    'id' => 'main',\n    'hidden' => '',\n);")
            .with_text("echo 1;");

        assert_eq!(
            compile(&node),
            vec!["<div class=\"card card--wide\" id=\"main\" hidden><?php echo 1; ?></div>"]
        );
    }

    #[test]
    fn computed_classes_precede_the_tag() {
        let node = ElementNode::html("div")
            .with_classes("$classes = array( 'card' );\nif ( $wide ) {\n\t$classes[] = 'wide';\n}")
            .with_text("echo 1;");

        assert_eq!(
            compile(&node),
            vec![
                "<?php",
                "\t$classes = array( 'card' );",
                "\tif ( $wide ) {",
                "\t\t$classes[] = 'wide';",
                "\t}",
                "?>",
                "<div class=\"<?php echo implode( ' ', $classes ); ?>\">",
                "\t<?php echo 1; ?>",
                "</div>",
            ]
        );
    }

    #[test]
    fn computed_classes_and_attributes_share_a_block() {
        let node = ElementNode::html("section")
            .with_classes("$classes = get_classes();")
            .with_attributes("$atts = get_atts();");

        assert_eq!(
            compile(&node),
            vec![
                "<?php",
                "\t$classes = get_classes();",
                "",
                "\t$atts = get_atts();",
                "?>",
                "<section class=\"<?php echo implode( ' ', $classes ); ?>\" <?php echo tw_element_attributes( $atts ); ?>>",
                "</section>",
            ]
        );
    }

    #[test]
    fn short_condition() {
        let node = ElementNode::html("p")
            .with_text("echo 1;")
            .with_condition("if ( $x > 1 ) {\n\t#TW001\n}");

        assert_eq!(
            compile(&node),
            vec!["<?php if ( $x > 1 ) : ?>", "\t<p><?php echo 1; ?></p>", "<?php endif ?>"]
        );
    }

    #[test]
    fn short_condition_wraps_short_loop() {
        let node = ElementNode::html("li")
            .with_text("echo $item;")
            .with_condition("if ( $items ) {\n    #TW001\n}")
            .with_loop("foreach ( $items as $item ) {\n    #TW002\n}");

        assert_eq!(
            compile(&node),
            vec![
                "<?php if ( $items ) : ?>",
                "\t<?php foreach ( $items as $item ) : ?>",
                "\t\t<li><?php echo $item; ?></li>",
                "\t<?php endforeach ?>",
                "<?php endif ?>",
            ]
        );
    }

    #[test]
    fn general_condition_splices_at_marker() {
        let node = ElementNode::html("span")
            .with_text("echo $a;")
            .with_condition("if ( $a ) {\n\t#TW001\n} else {\n\techo 'none';\n}");

        assert_eq!(
            compile(&node),
            vec![
                "<?php",
                "\tif ( $a ) {",
                "?>",
                "\t<span><?php echo $a; ?></span>",
                "<?php",
                "\t} else {",
                "\t\techo 'none';",
                "\t}",
                "?>",
            ]
        );
    }

    #[test]
    fn missing_marker_falls_back_to_general_form() {
        let node = ElementNode::html("b")
            .with_text("echo 1;")
            .with_condition("if ( $a ) {\n\techo 2;\n}");

        assert_eq!(
            compile(&node),
            vec!["<?php", "\tif ( $a ) {", "\t\techo 2;", "\t}", "?>"]
        );
    }

    #[rstest]
    #[case("header", "<?php get_header(); ?>")]
    #[case("header-main", "<?php get_header( 'main' ); ?>")]
    #[case("footer", "<?php get_footer(); ?>")]
    #[case("sidebar-left", "<?php get_sidebar( 'left' ); ?>")]
    #[case("searchform", "<?php get_search_form(); ?>")]
    #[case("breadcrumbs", "<?php ; ?>")]
    fn template_references(#[case] tag: &str, #[case] expected: &str) {
        let node = ElementNode::new(ElementKind::TemplateRef, tag);
        assert_eq!(compile(&node), vec![expected]);
    }

    #[test]
    fn template_reference_by_foreign_key() {
        let templates = [RelatedEntity::new(5, "footer-dark")];
        let node = ElementNode::new(ElementKind::TemplateRef, "template").with_foreign_key(5);
        let compiler = ViewCompiler::new("acme").with_templates(&templates);

        assert_eq!(compiler.compile(&node), "<?php get_footer( 'dark' ); ?>");
    }

    #[test]
    fn part_with_arguments() {
        let parts = [RelatedEntity::new(2, "card")];
        let node = ElementNode::new(ElementKind::PartRef, "part")
            .with_foreign_key(2)
            .with_part_args("$args = array( 'title' => get_the_title() );");
        let compiler = ViewCompiler::new("acme").with_parts(&parts);

        assert_eq!(
            compiler.compile_lines(&node, 1),
            vec![
                "\t<?php",
                "\t\t$args = array( 'title' => get_the_title() );",
                "\t\tTW_Part::render( 'card', $args );",
                "\t?>",
            ]
        );
    }

    #[test]
    fn part_without_arguments() {
        let parts = [RelatedEntity::new(2, "card")];
        let node = ElementNode::new(ElementKind::PartRef, "part").with_foreign_key(2);
        let compiler = ViewCompiler::new("acme").with_parts(&parts);

        assert_eq!(compiler.compile(&node), "<?php TW_Part::render( 'card' ); ?>");
    }

    #[test]
    fn unresolved_references_compile_to_nothing() {
        let parts = [RelatedEntity::new(2, "card")];
        let compiler = ViewCompiler::new("acme").with_parts(&parts);

        let part = ElementNode::new(ElementKind::PartRef, "part").with_foreign_key(99);
        let group = ElementNode::new(ElementKind::GroupRef, "group").with_foreign_key(1);
        let no_key = ElementNode::new(ElementKind::PartRef, "part");

        assert!(compiler.compile_lines(&part, 0).is_empty());
        assert!(compiler.compile_lines(&group, 0).is_empty());
        assert!(compiler.compile_lines(&no_key, 0).is_empty());
    }

    #[test]
    fn block_group_reference() {
        let groups = [RelatedEntity::new(1, "content")];
        let node = ElementNode::new(ElementKind::GroupRef, "group").with_foreign_key(1);
        let compiler = ViewCompiler::new("acme").with_groups(&groups);

        assert_eq!(
            compiler.compile(&node),
            "<?php TW_Block_Group::render( 'content' ); ?>"
        );
    }

    #[test]
    fn text_only_nodes() {
        let one = ElementNode::new(ElementKind::TextOnly, "").with_text("the_content();");
        let many = ElementNode::new(ElementKind::TextOnly, "").with_text("$a = 1;\necho $a;");

        assert_eq!(compile(&one), vec!["<?php the_content(); ?>"]);
        assert_eq!(compile(&many), vec!["<?php", "\t$a = 1;", "\techo $a;", "?>"]);
    }

    #[test]
    fn unknown_kind_is_empty() {
        assert!(compile(&ElementNode::new(ElementKind::Unknown, "x")).is_empty());
    }

    #[test]
    fn translation_domain_is_retargeted() {
        let node = ElementNode::html("p").with_text("_e( 'Hello', 'tw' );");
        assert_eq!(compile(&node), vec!["<p><?php _e( 'Hello', 'acme' ); ?></p>"]);
    }
}
