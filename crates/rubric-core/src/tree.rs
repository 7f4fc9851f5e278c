//! The editing-tree data model
//!
//! One closed sum type with a variant per catalog kind. Each variant
//! carries exactly the attributes its kind allows as named optional
//! fields, so storing an attribute the schema rejects is a compile
//! error rather than a runtime surprise. Elements outside the
//! vocabulary survive as [`Node::Unknown`] with their tag, attribute
//! map, and children intact.
//!
//! Trees are built by [`crate::xml::parse`] and mutated in place by the
//! host through the public fields; nothing here holds locks or parent
//! back-references.

use indexmap::IndexMap;

use crate::catalog::NodeKind;

/// A node of the editing tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Concept {
        id: Option<String>,
        children: Vec<Node>,
    },
    ConceptBody {
        children: Vec<Node>,
    },
    Task {
        id: Option<String>,
        children: Vec<Node>,
    },
    TaskBody {
        children: Vec<Node>,
    },
    Reference {
        id: Option<String>,
        children: Vec<Node>,
    },
    ReferenceBody {
        children: Vec<Node>,
    },
    Body {
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    Title {
        id: Option<String>,
        children: Vec<Node>,
    },
    Shortdesc {
        children: Vec<Node>,
    },
    Section {
        id: Option<String>,
        children: Vec<Node>,
    },
    Note {
        note_type: Option<String>,
        children: Vec<Node>,
    },
    Example {
        title: Option<String>,
        children: Vec<Node>,
    },
    Prolog {
        id: Option<String>,
        children: Vec<Node>,
    },
    Steps {
        children: Vec<Node>,
    },
    Step {
        children: Vec<Node>,
    },
    BulletList {
        children: Vec<Node>,
    },
    OrderedList {
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    Question {
        id: Option<String>,
        children: Vec<Node>,
    },
    Answer {
        id: Option<String>,
        correct: Option<String>,
        children: Vec<Node>,
    },
    /// Code listing. Its content lives in a single verbatim text child
    /// that the deserializer never trims or re-flows.
    Codeblock {
        language: Option<String>,
        children: Vec<Node>,
    },
    /// Table holding [`Node::TableRow`] children. The wire-side
    /// `tgroup`/`thead`/`tbody` scaffolding is reconstructed on
    /// serialization, it is not part of the tree.
    Table {
        xml_id: Option<String>,
        role: Option<String>,
        children: Vec<Node>,
    },
    TableRow {
        children: Vec<Node>,
    },
    TableHeaderCell {
        align: Option<String>,
        children: Vec<Node>,
    },
    TableCell {
        align: Option<String>,
        children: Vec<Node>,
    },
    Figure {
        children: Vec<Node>,
    },
    Image {
        src: Option<String>,
        alt: Option<String>,
        reference: Option<String>,
        width: Option<String>,
        height: Option<String>,
        float: Option<String>,
        role: Option<String>,
    },
    Video {
        reference: Option<String>,
        src: Option<String>,
        width: Option<String>,
        height: Option<String>,
        poster: Option<String>,
        autoplay: Option<String>,
        controls: Option<String>,
    },
    /// Atomic link to another topic. The visible label is element text
    /// on the wire but a plain field here, not a child.
    CrossReference {
        refid: Option<String>,
        text: String,
    },
    DocTag {
        tag_type: Option<String>,
        children: Vec<Node>,
    },
    Variable {
        name: Option<String>,
    },
    GlossaryEntry {
        termid: Option<String>,
        term: Option<String>,
        definition: Option<String>,
    },
    LearningContent {
        id: Option<String>,
        children: Vec<Node>,
    },
    LearningBody {
        id: Option<String>,
        children: Vec<Node>,
    },
    LearningSummary {
        id: Option<String>,
        children: Vec<Node>,
    },
    LearningContentBody {
        id: Option<String>,
        children: Vec<Node>,
    },
    LearningAssessment {
        id: Option<String>,
        mode: Option<String>,
        children: Vec<Node>,
    },
    /// Text leaf.
    Text {
        text: String,
    },
    /// Pass-through element outside the vocabulary. Keeps the original
    /// tag and the full attribute map in document order so nothing is
    /// lost across a round trip.
    Unknown {
        tag: String,
        attributes: IndexMap<String, String>,
        children: Vec<Node>,
    },
}

impl Node {
    /// Build a text leaf.
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text { text: text.into() }
    }

    /// Build a paragraph over the given children.
    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph { children }
    }

    /// The catalog kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Concept { .. } => NodeKind::Concept,
            Node::ConceptBody { .. } => NodeKind::ConceptBody,
            Node::Task { .. } => NodeKind::Task,
            Node::TaskBody { .. } => NodeKind::TaskBody,
            Node::Reference { .. } => NodeKind::Reference,
            Node::ReferenceBody { .. } => NodeKind::ReferenceBody,
            Node::Body { .. } => NodeKind::Body,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Title { .. } => NodeKind::Title,
            Node::Shortdesc { .. } => NodeKind::Shortdesc,
            Node::Section { .. } => NodeKind::Section,
            Node::Note { .. } => NodeKind::Note,
            Node::Example { .. } => NodeKind::Example,
            Node::Prolog { .. } => NodeKind::Prolog,
            Node::Steps { .. } => NodeKind::Steps,
            Node::Step { .. } => NodeKind::Step,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::Question { .. } => NodeKind::Question,
            Node::Answer { .. } => NodeKind::Answer,
            Node::Codeblock { .. } => NodeKind::Codeblock,
            Node::Table { .. } => NodeKind::Table,
            Node::TableRow { .. } => NodeKind::TableRow,
            Node::TableHeaderCell { .. } => NodeKind::TableHeaderCell,
            Node::TableCell { .. } => NodeKind::TableCell,
            Node::Figure { .. } => NodeKind::Figure,
            Node::Image { .. } => NodeKind::Image,
            Node::Video { .. } => NodeKind::Video,
            Node::CrossReference { .. } => NodeKind::CrossReference,
            Node::DocTag { .. } => NodeKind::DocTag,
            Node::Variable { .. } => NodeKind::Variable,
            Node::GlossaryEntry { .. } => NodeKind::GlossaryEntry,
            Node::LearningContent { .. } => NodeKind::LearningContent,
            Node::LearningBody { .. } => NodeKind::LearningBody,
            Node::LearningSummary { .. } => NodeKind::LearningSummary,
            Node::LearningContentBody { .. } => NodeKind::LearningContentBody,
            Node::LearningAssessment { .. } => NodeKind::LearningAssessment,
            Node::Text { .. } => NodeKind::Text,
            Node::Unknown { .. } => NodeKind::Unknown,
        }
    }

    /// The wire tag this node serializes under. `None` for text leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Unknown { tag, .. } => Some(tag.as_str()),
            other => other.kind().wire_tag(),
        }
    }

    /// Child nodes, empty for leaves and atomic kinds.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Concept { children, .. }
            | Node::ConceptBody { children }
            | Node::Task { children, .. }
            | Node::TaskBody { children }
            | Node::Reference { children, .. }
            | Node::ReferenceBody { children }
            | Node::Body { children }
            | Node::Paragraph { children }
            | Node::Title { children, .. }
            | Node::Shortdesc { children }
            | Node::Section { children, .. }
            | Node::Note { children, .. }
            | Node::Example { children, .. }
            | Node::Prolog { children, .. }
            | Node::Steps { children }
            | Node::Step { children }
            | Node::BulletList { children }
            | Node::OrderedList { children }
            | Node::ListItem { children }
            | Node::Question { children, .. }
            | Node::Answer { children, .. }
            | Node::Codeblock { children, .. }
            | Node::Table { children, .. }
            | Node::TableRow { children }
            | Node::TableHeaderCell { children, .. }
            | Node::TableCell { children, .. }
            | Node::Figure { children }
            | Node::DocTag { children, .. }
            | Node::LearningContent { children, .. }
            | Node::LearningBody { children, .. }
            | Node::LearningSummary { children, .. }
            | Node::LearningContentBody { children, .. }
            | Node::LearningAssessment { children, .. }
            | Node::Unknown { children, .. } => children,
            Node::Image { .. }
            | Node::Video { .. }
            | Node::CrossReference { .. }
            | Node::Variable { .. }
            | Node::GlossaryEntry { .. }
            | Node::Text { .. } => &[],
        }
    }

    /// Mutable child list, `None` for leaves and atomic kinds.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Concept { children, .. }
            | Node::ConceptBody { children }
            | Node::Task { children, .. }
            | Node::TaskBody { children }
            | Node::Reference { children, .. }
            | Node::ReferenceBody { children }
            | Node::Body { children }
            | Node::Paragraph { children }
            | Node::Title { children, .. }
            | Node::Shortdesc { children }
            | Node::Section { children, .. }
            | Node::Note { children, .. }
            | Node::Example { children, .. }
            | Node::Prolog { children, .. }
            | Node::Steps { children }
            | Node::Step { children }
            | Node::BulletList { children }
            | Node::OrderedList { children }
            | Node::ListItem { children }
            | Node::Question { children, .. }
            | Node::Answer { children, .. }
            | Node::Codeblock { children, .. }
            | Node::Table { children, .. }
            | Node::TableRow { children }
            | Node::TableHeaderCell { children, .. }
            | Node::TableCell { children, .. }
            | Node::Figure { children }
            | Node::DocTag { children, .. }
            | Node::LearningContent { children, .. }
            | Node::LearningBody { children, .. }
            | Node::LearningSummary { children, .. }
            | Node::LearningContentBody { children, .. }
            | Node::LearningAssessment { children, .. }
            | Node::Unknown { children, .. } => Some(children),
            Node::Image { .. }
            | Node::Video { .. }
            | Node::CrossReference { .. }
            | Node::Variable { .. }
            | Node::GlossaryEntry { .. }
            | Node::Text { .. } => None,
        }
    }

    /// Text content of a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Present attributes as wire-name/value pairs, in the catalog's
    /// emission order. [`Node::Unknown`] attributes are not covered here;
    /// the serializer reads its document-ordered map directly.
    pub fn wire_attributes(&self) -> Vec<(&'static str, &str)> {
        match self {
            Node::Concept { id, .. }
            | Node::Task { id, .. }
            | Node::Reference { id, .. }
            | Node::Title { id, .. }
            | Node::Section { id, .. }
            | Node::Prolog { id, .. }
            | Node::Question { id, .. }
            | Node::LearningContent { id, .. }
            | Node::LearningBody { id, .. }
            | Node::LearningSummary { id, .. }
            | Node::LearningContentBody { id, .. } => present(&[("id", id)]),
            Node::Answer { id, correct, .. } => present(&[("id", id), ("correct", correct)]),
            Node::Note { note_type, .. } => present(&[("type", note_type)]),
            Node::DocTag { tag_type, .. } => present(&[("type", tag_type)]),
            Node::Example { title, .. } => present(&[("title", title)]),
            Node::Codeblock { language, .. } => present(&[("language", language)]),
            Node::Table { xml_id, role, .. } => present(&[("xml:id", xml_id), ("role", role)]),
            Node::TableHeaderCell { align, .. } | Node::TableCell { align, .. } => {
                present(&[("align", align)])
            }
            Node::Image {
                src,
                alt,
                reference,
                width,
                height,
                float,
                role,
            } => present(&[
                ("src", src),
                ("alt", alt),
                ("ref", reference),
                ("width", width),
                ("height", height),
                ("float", float),
                ("role", role),
            ]),
            Node::Video {
                reference,
                src,
                width,
                height,
                poster,
                autoplay,
                controls,
            } => present(&[
                ("ref", reference),
                ("src", src),
                ("width", width),
                ("height", height),
                ("poster", poster),
                ("autoplay", autoplay),
                ("controls", controls),
            ]),
            Node::CrossReference { refid, .. } => present(&[("refid", refid)]),
            Node::Variable { name } => present(&[("name", name)]),
            Node::GlossaryEntry {
                termid,
                term,
                definition,
            } => present(&[("termid", termid), ("term", term), ("definition", definition)]),
            Node::LearningAssessment { id, mode, .. } => {
                present(&[("id", id), ("mode", mode)])
            }
            Node::ConceptBody { .. }
            | Node::TaskBody { .. }
            | Node::ReferenceBody { .. }
            | Node::Body { .. }
            | Node::Paragraph { .. }
            | Node::Shortdesc { .. }
            | Node::Steps { .. }
            | Node::Step { .. }
            | Node::BulletList { .. }
            | Node::OrderedList { .. }
            | Node::ListItem { .. }
            | Node::TableRow { .. }
            | Node::Figure { .. }
            | Node::Text { .. }
            | Node::Unknown { .. } => Vec::new(),
        }
    }
}

fn present<'a>(pairs: &[(&'static str, &'a Option<String>)]) -> Vec<(&'static str, &'a str)> {
    pairs
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (*name, value)))
        .collect()
}
