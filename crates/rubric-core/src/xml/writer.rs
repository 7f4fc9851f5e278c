//! Editing-tree to topic XML serialization
//!
//! The layout is fixed rather than configurable: four-space
//! indentation, one element per line, childless elements self-closed
//! with a space before the slash, and an element whose only child is a
//! text leaf collapsed onto one line. Output carries no XML declaration
//! and no trailing newline.
//!
//! Serialization is total. A tree that breaks a shape expectation is
//! repaired on the way out (topics re-ordered, stray table children
//! skipped) instead of rejected.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::NodeKind;
use crate::tree::Node;
use crate::xml::escape::{escape_attribute, escape_text, push_indent};

/// Render tree roots back to topic XML.
///
/// Task and reference topics are re-ordered into title, optional
/// prolog, then body; figures into titles, then images, then the rest;
/// tables grow back their `tgroup`/`thead`/`tbody` scaffolding with a
/// `cols` count taken from the widest row.
pub fn serialize(roots: &[Node]) -> String {
    let mut emitter = Emitter::new();
    for root in roots {
        emitter.node(root, 0);
    }
    emitter.finish()
}

/// Collapse formatting whitespace so two renderings of the same
/// document compare equal regardless of pretty-printing. Runs of
/// whitespace between tags disappear, runs inside text shrink to a
/// single space, and text is pulled flush against its enclosing tags.
pub fn normalize(xml: &str) -> String {
    static BETWEEN_TAGS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r">\s+<").expect("valid regex"));
    static RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
    static AFTER_OPEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r">\s+([^<])").expect("valid regex"));
    static BEFORE_CLOSE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([^>])\s+<").expect("valid regex"));

    let xml = BETWEEN_TAGS.replace_all(xml, "><");
    let xml = RUNS.replace_all(&xml, " ");
    let xml = AFTER_OPEN.replace_all(&xml, ">${1}");
    let xml = BEFORE_CLOSE.replace_all(&xml, "${1}<");
    xml.trim().to_string()
}

struct Emitter {
    out: String,
}

impl Emitter {
    fn new() -> Emitter {
        Emitter { out: String::new() }
    }

    /// Final document text, without the trailing newline.
    fn finish(mut self) -> String {
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }

    fn node(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Text { text } => {
                push_indent(&mut self.out, depth);
                self.out.push_str(&escape_text(text));
                self.out.push('\n');
            }
            Node::CrossReference { text, .. } => {
                let attrs = node.wire_attributes();
                if text.is_empty() {
                    self.self_closing("xref", &attrs, depth);
                } else {
                    self.one_line("xref", &attrs, text, depth);
                }
            }
            Node::Task { children, .. } | Node::Reference { children, .. } => {
                let ordered = canonical_topic_children(node.kind(), children);
                if let Some(tag) = node.tag() {
                    self.element(tag, &node.wire_attributes(), &ordered, depth);
                }
            }
            Node::Figure { children } => {
                let ordered = figure_children(children);
                self.element("figure", &[], &ordered, depth);
            }
            Node::Table { .. } => self.table(node, depth),
            Node::Unknown {
                tag,
                attributes,
                children,
            } => {
                let attrs: Vec<(&str, &str)> = attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str()))
                    .collect();
                let children: Vec<&Node> = children.iter().collect();
                self.element(tag, &attrs, &children, depth);
            }
            other => {
                let Some(tag) = other.tag() else {
                    return;
                };
                let children: Vec<&Node> = other.children().iter().collect();
                self.element(tag, &other.wire_attributes(), &children, depth);
            }
        }
    }

    /// Shared element layout: childless self-closes, a lone text child
    /// stays on one line, anything else indents children on their own
    /// lines.
    fn element(&mut self, tag: &str, attrs: &[(&str, &str)], children: &[&Node], depth: usize) {
        match children {
            [] => self.self_closing(tag, attrs, depth),
            [child] => {
                if let Node::Text { text } = child {
                    self.one_line(tag, attrs, text, depth);
                } else {
                    self.multi_line(tag, attrs, children, depth);
                }
            }
            _ => self.multi_line(tag, attrs, children, depth),
        }
    }

    fn multi_line(&mut self, tag: &str, attrs: &[(&str, &str)], children: &[&Node], depth: usize) {
        self.open_line(tag, attrs, depth);
        for child in children {
            self.node(child, depth + 1);
        }
        self.close_line(tag, depth);
    }

    /// Rebuild the wire shape of a table: `tgroup` sized to the widest
    /// row, the leading run of all-header rows under `thead`, every
    /// remaining row under `tbody`. A table without rows self-closes.
    fn table(&mut self, node: &Node, depth: usize) {
        let Node::Table { children, .. } = node else {
            return;
        };
        let rows: Vec<&Node> = children
            .iter()
            .filter(|child| matches!(child, Node::TableRow { .. }))
            .collect();
        if rows.len() != children.len() {
            debug!("skipping non-row children of a table");
        }
        let attrs = node.wire_attributes();
        if rows.is_empty() {
            self.self_closing("table", &attrs, depth);
            return;
        }

        let cols = rows.iter().map(|row| row_cells(row).len()).max().unwrap_or(0);
        let header_len = rows.iter().take_while(|row| is_header_row(row)).count();

        self.open_line("table", &attrs, depth);
        let cols = cols.to_string();
        self.open_line("tgroup", &[("cols", cols.as_str())], depth + 1);

        if header_len > 0 {
            self.open_line("thead", &[], depth + 2);
            for row in &rows[..header_len] {
                self.element("row", &[], &row_cells(row), depth + 3);
            }
            self.close_line("thead", depth + 2);
        }

        let body = &rows[header_len..];
        if body.is_empty() {
            self.self_closing("tbody", &[], depth + 2);
        } else {
            self.open_line("tbody", &[], depth + 2);
            for row in body {
                self.element("row", &[], &row_cells(row), depth + 3);
            }
            self.close_line("tbody", depth + 2);
        }

        self.close_line("tgroup", depth + 1);
        self.close_line("table", depth);
    }

    fn self_closing(&mut self, tag: &str, attrs: &[(&str, &str)], depth: usize) {
        push_indent(&mut self.out, depth);
        self.open_tag(tag, attrs);
        self.out.push_str(" />\n");
    }

    fn one_line(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str, depth: usize) {
        push_indent(&mut self.out, depth);
        self.open_tag(tag, attrs);
        self.out.push('>');
        self.out.push_str(&escape_text(text));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn open_line(&mut self, tag: &str, attrs: &[(&str, &str)], depth: usize) {
        push_indent(&mut self.out, depth);
        self.open_tag(tag, attrs);
        self.out.push_str(">\n");
    }

    fn close_line(&mut self, tag: &str, depth: usize) {
        push_indent(&mut self.out, depth);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// `<tag` plus attributes, bracket left open.
    fn open_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attribute(value));
            self.out.push('"');
        }
    }
}

/// Canonical child order for task and reference topics: title first,
/// prolog when present, then the body wrapper. Children outside that
/// shape are skipped.
fn canonical_topic_children(kind: NodeKind, children: &[Node]) -> Vec<&Node> {
    let title = children.iter().find(|child| matches!(child, Node::Title { .. }));
    let prolog = children.iter().find(|child| matches!(child, Node::Prolog { .. }));
    let body = children.iter().find(|child| child.kind().is_body_wrapper());
    let ordered: Vec<&Node> = title.into_iter().chain(prolog).chain(body).collect();
    if ordered.len() != children.len() {
        debug!(kind = %kind, "skipping children outside the canonical topic shape");
    }
    ordered
}

/// Figures serialize titles first, then images, then everything else,
/// keeping relative order within each group.
fn figure_children(children: &[Node]) -> Vec<&Node> {
    let titles = children.iter().filter(|child| matches!(child, Node::Title { .. }));
    let images = children.iter().filter(|child| matches!(child, Node::Image { .. }));
    let rest = children
        .iter()
        .filter(|child| !matches!(child, Node::Title { .. } | Node::Image { .. }));
    titles.chain(images).chain(rest).collect()
}

fn row_cells(row: &Node) -> Vec<&Node> {
    row.children()
        .iter()
        .filter(|child| matches!(child, Node::TableHeaderCell { .. } | Node::TableCell { .. }))
        .collect()
}

/// A header row is non-empty and made of header cells only.
fn is_header_row(row: &Node) -> bool {
    let cells = row_cells(row);
    !cells.is_empty()
        && cells
            .iter()
            .all(|cell| matches!(cell, Node::TableHeaderCell { .. }))
}
