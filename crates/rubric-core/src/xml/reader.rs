//! Topic XML to editing-tree deserialization
//!
//! Two stages: an event loop builds a raw element tree with whitespace
//! intact, then catalog-driven classification turns raw elements into
//! [`Node`]s. Keeping the stages apart is what lets code blocks keep
//! their exact text while everything else sheds formatting whitespace.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::catalog::NodeKind;
use crate::error::ParseError;
use crate::result::Result;
use crate::tree::Node;

/// Diagnostic paragraph shown when there is nothing to parse.
const EMPTY_INPUT_PLACEHOLDER: &str = "(empty or invalid XML)";

/// Parse topic XML into editing-tree roots.
///
/// Blank input yields a single placeholder paragraph instead of an
/// error; the editing surface always needs something renderable.
/// Malformed XML is a hard [`ParseError`]. Elements outside the
/// vocabulary are not errors, they pass through as [`Node::Unknown`].
///
/// Root handling: a `concept`, `task` or `reference` root is kept
/// whole; otherwise the children of the first body-like wrapper
/// (`body`, `conbody`, `taskbody`, `refbody`) become the roots; a bare
/// fragment root converts as-is.
pub fn parse(xml: &str) -> Result<Vec<Node>> {
    if xml.trim().is_empty() {
        debug!("blank input, substituting the placeholder paragraph");
        return Ok(vec![Node::paragraph(vec![Node::text(
            EMPTY_INPUT_PLACEHOLDER,
        )])]);
    }

    let root = match read_document(xml) {
        Ok(root) => root,
        Err(error) => {
            warn!(%error, "failed to parse topic XML");
            return Err(error);
        }
    };
    Ok(classify_roots(&root))
}

/// Raw element with formatting whitespace still attached.
#[derive(Debug)]
struct RawElement {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<RawContent>,
}

#[derive(Debug)]
enum RawContent {
    Element(RawElement),
    Text(String),
}

impl RawElement {
    fn attr(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    /// Concatenated descendant text in document order, untrimmed.
    fn text_content(&self) -> String {
        fn collect(el: &RawElement, out: &mut String) {
            for child in &el.children {
                match child {
                    RawContent::Text(text) => out.push_str(text),
                    RawContent::Element(child) => collect(child, out),
                }
            }
        }
        let mut out = String::new();
        collect(self, &mut out);
        out
    }
}

/// Run the event stream into a raw tree, enforcing a single root.
fn read_document(xml: &str) -> Result<RawElement> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(ParseError::structure("multiple root elements"));
                }
                stack.push(raw_element(&e)?);
            }
            Event::Empty(e) => {
                let element = raw_element(&e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // quick-xml has already checked the name matches
                let Some(element) = stack.pop() else {
                    return Err(ParseError::structure("closing tag without an open element"));
                };
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                let text = t.unescape()?.into_owned();
                append_text(text, &mut stack)?;
            }
            Event::CData(c) => {
                let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                append_text(text, &mut stack)?;
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::structure("unclosed element at end of document"));
    }
    root.ok_or_else(|| ParseError::structure("no root element"))
}

fn raw_element(e: &BytesStart<'_>) -> Result<RawElement> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = IndexMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(RawElement {
        tag,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    element: RawElement,
    stack: &mut Vec<RawElement>,
    root: &mut Option<RawElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(RawContent::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(ParseError::structure("multiple root elements")),
    }
}

fn append_text(text: String, stack: &mut Vec<RawElement>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(RawContent::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::structure("text outside the root element")),
    }
}

fn classify_roots(root: &RawElement) -> Vec<Node> {
    if let Some(kind) = NodeKind::from_tag(&root.tag)
        && kind.is_structural_root()
    {
        return vec![convert_element(root)];
    }
    if let Some(wrapper) = find_body_wrapper(root) {
        return convert_children(wrapper);
    }
    vec![convert_element(root)]
}

/// First body-like wrapper in document order, the root itself included.
fn find_body_wrapper(el: &RawElement) -> Option<&RawElement> {
    if NodeKind::from_tag(&el.tag).is_some_and(NodeKind::is_body_wrapper) {
        return Some(el);
    }
    for child in &el.children {
        if let RawContent::Element(child) = child
            && let Some(found) = find_body_wrapper(child)
        {
            return Some(found);
        }
    }
    None
}

/// Convert element children, dropping whitespace-only text and trimming
/// the edges of what remains.
fn convert_children(el: &RawElement) -> Vec<Node> {
    let mut children = Vec::new();
    for child in &el.children {
        match child {
            RawContent::Element(child) => children.push(convert_element(child)),
            RawContent::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    children.push(Node::text(trimmed));
                }
            }
        }
    }
    children
}

fn convert_element(el: &RawElement) -> Node {
    let Some(kind) = NodeKind::from_tag(&el.tag) else {
        debug!(tag = %el.tag, "passing through unknown element");
        return Node::Unknown {
            tag: el.tag.clone(),
            attributes: el.attributes.clone(),
            children: convert_children(el),
        };
    };
    log_dropped_attributes(kind, el);
    match kind {
        NodeKind::Concept => Node::Concept {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::ConceptBody => Node::ConceptBody {
            children: convert_children(el),
        },
        NodeKind::Task => Node::Task {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::TaskBody => Node::TaskBody {
            children: convert_children(el),
        },
        NodeKind::Reference => Node::Reference {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::ReferenceBody => Node::ReferenceBody {
            children: convert_children(el),
        },
        NodeKind::Body => Node::Body {
            children: convert_children(el),
        },
        NodeKind::Paragraph => Node::Paragraph {
            children: convert_children(el),
        },
        NodeKind::Title => Node::Title {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::Shortdesc => Node::Shortdesc {
            children: convert_children(el),
        },
        NodeKind::Section => Node::Section {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::Note => Node::Note {
            note_type: el.attr("type"),
            children: convert_children(el),
        },
        NodeKind::Example => Node::Example {
            title: el.attr("title"),
            children: convert_children(el),
        },
        NodeKind::Prolog => Node::Prolog {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::Steps => Node::Steps {
            children: convert_children(el),
        },
        NodeKind::Step => Node::Step {
            children: convert_children(el),
        },
        NodeKind::BulletList => Node::BulletList {
            children: convert_children(el),
        },
        NodeKind::OrderedList => Node::OrderedList {
            children: convert_children(el),
        },
        NodeKind::ListItem => Node::ListItem {
            children: convert_children(el),
        },
        NodeKind::Question => Node::Question {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::Answer => Node::Answer {
            id: el.attr("id"),
            correct: el.attr("correct"),
            children: convert_children(el),
        },
        NodeKind::Codeblock => {
            // verbatim capture, the one place whitespace is sacred
            let text = el.text_content();
            let children = if text.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(text)]
            };
            Node::Codeblock {
                language: el.attr("language"),
                children,
            }
        }
        NodeKind::Table => convert_table(el),
        NodeKind::TableRow => Node::TableRow {
            children: convert_children(el),
        },
        // from_tag resolves entry to TableCell; header cells only come
        // out of thead handling inside convert_table
        NodeKind::TableHeaderCell | NodeKind::TableCell => Node::TableCell {
            align: el.attr("align"),
            children: convert_children(el),
        },
        NodeKind::Figure => Node::Figure {
            children: convert_children(el),
        },
        NodeKind::Image => Node::Image {
            src: el.attr("src").or_else(|| el.attr("href")),
            alt: el.attr("alt"),
            reference: el.attr("ref"),
            width: el.attr("width"),
            height: el.attr("height"),
            float: el.attr("float"),
            role: el.attr("role"),
        },
        NodeKind::Video => Node::Video {
            reference: el.attr("ref"),
            src: el.attr("src").or_else(|| el.attr("href")),
            width: el.attr("width"),
            height: el.attr("height"),
            poster: el.attr("poster"),
            autoplay: el.attr("autoplay"),
            controls: el.attr("controls"),
        },
        NodeKind::CrossReference => Node::CrossReference {
            refid: el.attr("refid"),
            text: el.text_content().trim().to_string(),
        },
        NodeKind::DocTag => {
            let text = el.text_content();
            let text = text.trim();
            let children = if text.is_empty() {
                Vec::new()
            } else {
                vec![Node::text(text)]
            };
            Node::DocTag {
                tag_type: el.attr("type"),
                children,
            }
        }
        NodeKind::Variable => Node::Variable {
            name: el.attr("name"),
        },
        NodeKind::GlossaryEntry => {
            if has_significant_content(el) {
                debug!("discarding glossary entry content");
            }
            Node::GlossaryEntry {
                termid: el.attr("termid"),
                term: el.attr("term"),
                definition: el.attr("definition"),
            }
        }
        NodeKind::LearningContent => Node::LearningContent {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::LearningBody => Node::LearningBody {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::LearningSummary => Node::LearningSummary {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::LearningContentBody => Node::LearningContentBody {
            id: el.attr("id"),
            children: convert_children(el),
        },
        NodeKind::LearningAssessment => Node::LearningAssessment {
            id: el.attr("id"),
            mode: el.attr("mode"),
            children: convert_children(el),
        },
        // from_tag never yields these
        NodeKind::Text | NodeKind::Unknown => Node::Unknown {
            tag: el.tag.clone(),
            attributes: el.attributes.clone(),
            children: convert_children(el),
        },
    }
}

/// Tables shed their wire scaffolding on the way in. Rows inside
/// `thead` become header rows, all others body rows; declared column
/// counts are ignored, the serializer re-derives them from the widest
/// row.
fn convert_table(el: &RawElement) -> Node {
    let grid = element_child(el, "tgroup").unwrap_or(el);
    let mut rows = Vec::new();
    if let Some(head) = element_child(grid, "thead") {
        for row in element_children(head, "row") {
            rows.push(convert_row(row, true));
        }
    }
    let body = element_child(grid, "tbody").unwrap_or(grid);
    for row in element_children(body, "row") {
        rows.push(convert_row(row, false));
    }
    Node::Table {
        xml_id: el.attr("xml:id"),
        role: el.attr("role"),
        children: rows,
    }
}

fn convert_row(el: &RawElement, header: bool) -> Node {
    let mut cells = Vec::new();
    for entry in element_children(el, "entry") {
        let align = entry.attr("align");
        let children = convert_children(entry);
        cells.push(if header {
            Node::TableHeaderCell { align, children }
        } else {
            Node::TableCell { align, children }
        });
    }
    Node::TableRow { children: cells }
}

fn element_child<'a>(el: &'a RawElement, tag: &str) -> Option<&'a RawElement> {
    el.children.iter().find_map(|child| match child {
        RawContent::Element(child) if child.tag == tag => Some(child),
        _ => None,
    })
}

fn element_children<'a>(
    el: &'a RawElement,
    tag: &'a str,
) -> impl Iterator<Item = &'a RawElement> + 'a {
    el.children.iter().filter_map(move |child| match child {
        RawContent::Element(child) if child.tag == tag => Some(child),
        _ => None,
    })
}

fn log_dropped_attributes(kind: NodeKind, el: &RawElement) {
    for name in el.attributes.keys() {
        let kept = kind.attributes().contains(&name.as_str())
            || kind.attribute_alias(name).is_some();
        if !kept {
            debug!(kind = %kind, attribute = %name, "dropping attribute outside the catalog");
        }
    }
}

fn has_significant_content(el: &RawElement) -> bool {
    el.children.iter().any(|child| match child {
        RawContent::Element(_) => true,
        RawContent::Text(text) => !text.trim().is_empty(),
    })
}
