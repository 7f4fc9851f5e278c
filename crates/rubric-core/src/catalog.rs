//! Static catalog of node kinds
//!
//! Single source of truth for how tree kinds map onto the XML vocabulary:
//! wire tag names in both directions, the broad content category of each
//! kind, and the per-kind attribute whitelist. The whitelist order is the
//! order attributes are emitted in, so the serializer stays deterministic
//! without sorting anything at runtime.

use std::fmt;

/// Discriminant for every node kind the tree model knows about.
///
/// `Text` is the text leaf and `Unknown` the pass-through kind for
/// elements outside the vocabulary; neither has a fixed wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Concept,
    ConceptBody,
    Task,
    TaskBody,
    Reference,
    ReferenceBody,
    Body,
    Paragraph,
    Title,
    Shortdesc,
    Section,
    Note,
    Example,
    Prolog,
    Steps,
    Step,
    BulletList,
    OrderedList,
    ListItem,
    Question,
    Answer,
    Codeblock,
    Table,
    TableRow,
    TableHeaderCell,
    TableCell,
    Figure,
    Image,
    Video,
    CrossReference,
    DocTag,
    Variable,
    GlossaryEntry,
    LearningContent,
    LearningBody,
    LearningSummary,
    LearningContentBody,
    LearningAssessment,
    Text,
    Unknown,
}

/// Broad content shape of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    /// Holds block or mixed children
    BlockContainer,
    /// Appears inside block content, children are inline or text
    Inline,
    /// Self-contained, never has children
    Atomic,
    /// Raw text
    TextLeaf,
}

impl NodeKind {
    /// Every kind, in catalog order. Handy for exhaustive checks in tests.
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::Concept,
        NodeKind::ConceptBody,
        NodeKind::Task,
        NodeKind::TaskBody,
        NodeKind::Reference,
        NodeKind::ReferenceBody,
        NodeKind::Body,
        NodeKind::Paragraph,
        NodeKind::Title,
        NodeKind::Shortdesc,
        NodeKind::Section,
        NodeKind::Note,
        NodeKind::Example,
        NodeKind::Prolog,
        NodeKind::Steps,
        NodeKind::Step,
        NodeKind::BulletList,
        NodeKind::OrderedList,
        NodeKind::ListItem,
        NodeKind::Question,
        NodeKind::Answer,
        NodeKind::Codeblock,
        NodeKind::Table,
        NodeKind::TableRow,
        NodeKind::TableHeaderCell,
        NodeKind::TableCell,
        NodeKind::Figure,
        NodeKind::Image,
        NodeKind::Video,
        NodeKind::CrossReference,
        NodeKind::DocTag,
        NodeKind::Variable,
        NodeKind::GlossaryEntry,
        NodeKind::LearningContent,
        NodeKind::LearningBody,
        NodeKind::LearningSummary,
        NodeKind::LearningContentBody,
        NodeKind::LearningAssessment,
        NodeKind::Text,
        NodeKind::Unknown,
    ];

    /// Resolve a wire tag name to its kind.
    ///
    /// Returns `None` for tags outside the vocabulary; the deserializer
    /// turns those into pass-through [`NodeKind::Unknown`] nodes instead
    /// of failing. Both cell kinds share the `entry` tag, which resolves
    /// to [`NodeKind::TableCell`] here; header cells are recognized by
    /// their position inside `thead` during table parsing.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        let kind = match tag {
            "concept" => NodeKind::Concept,
            "conbody" => NodeKind::ConceptBody,
            "task" => NodeKind::Task,
            "taskbody" => NodeKind::TaskBody,
            "reference" => NodeKind::Reference,
            "refbody" => NodeKind::ReferenceBody,
            "body" => NodeKind::Body,
            "p" => NodeKind::Paragraph,
            "title" => NodeKind::Title,
            "shortdesc" => NodeKind::Shortdesc,
            "section" => NodeKind::Section,
            "note" => NodeKind::Note,
            "example" => NodeKind::Example,
            "prolog" => NodeKind::Prolog,
            "steps" => NodeKind::Steps,
            "step" => NodeKind::Step,
            "itemizedlist" => NodeKind::BulletList,
            "orderedlist" => NodeKind::OrderedList,
            "listitem" => NodeKind::ListItem,
            "question" => NodeKind::Question,
            "answer" => NodeKind::Answer,
            "codeblock" => NodeKind::Codeblock,
            "table" => NodeKind::Table,
            "row" => NodeKind::TableRow,
            "entry" => NodeKind::TableCell,
            "figure" => NodeKind::Figure,
            "image" => NodeKind::Image,
            "video" => NodeKind::Video,
            "xref" => NodeKind::CrossReference,
            "doc-tag" => NodeKind::DocTag,
            "variable" => NodeKind::Variable,
            "glossentry" => NodeKind::GlossaryEntry,
            "learningContent" => NodeKind::LearningContent,
            "learningBody" => NodeKind::LearningBody,
            "learningSummary" => NodeKind::LearningSummary,
            "learningContentBody" => NodeKind::LearningContentBody,
            "learningAssessment" => NodeKind::LearningAssessment,
            _ => return None,
        };
        Some(kind)
    }

    /// The wire tag a kind serializes to. `None` for [`NodeKind::Text`]
    /// and [`NodeKind::Unknown`], which carry no fixed tag.
    pub fn wire_tag(self) -> Option<&'static str> {
        let tag = match self {
            NodeKind::Concept => "concept",
            NodeKind::ConceptBody => "conbody",
            NodeKind::Task => "task",
            NodeKind::TaskBody => "taskbody",
            NodeKind::Reference => "reference",
            NodeKind::ReferenceBody => "refbody",
            NodeKind::Body => "body",
            NodeKind::Paragraph => "p",
            NodeKind::Title => "title",
            NodeKind::Shortdesc => "shortdesc",
            NodeKind::Section => "section",
            NodeKind::Note => "note",
            NodeKind::Example => "example",
            NodeKind::Prolog => "prolog",
            NodeKind::Steps => "steps",
            NodeKind::Step => "step",
            NodeKind::BulletList => "itemizedlist",
            NodeKind::OrderedList => "orderedlist",
            NodeKind::ListItem => "listitem",
            NodeKind::Question => "question",
            NodeKind::Answer => "answer",
            NodeKind::Codeblock => "codeblock",
            NodeKind::Table => "table",
            NodeKind::TableRow => "row",
            NodeKind::TableHeaderCell => "entry",
            NodeKind::TableCell => "entry",
            NodeKind::Figure => "figure",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::CrossReference => "xref",
            NodeKind::DocTag => "doc-tag",
            NodeKind::Variable => "variable",
            NodeKind::GlossaryEntry => "glossentry",
            NodeKind::LearningContent => "learningContent",
            NodeKind::LearningBody => "learningBody",
            NodeKind::LearningSummary => "learningSummary",
            NodeKind::LearningContentBody => "learningContentBody",
            NodeKind::LearningAssessment => "learningAssessment",
            NodeKind::Text | NodeKind::Unknown => return None,
        };
        Some(tag)
    }

    /// Content category of the kind.
    pub fn category(self) -> ContentCategory {
        match self {
            NodeKind::Text => ContentCategory::TextLeaf,
            NodeKind::Image
            | NodeKind::Video
            | NodeKind::Variable
            | NodeKind::GlossaryEntry
            | NodeKind::CrossReference => ContentCategory::Atomic,
            NodeKind::DocTag => ContentCategory::Inline,
            _ => ContentCategory::BlockContainer,
        }
    }

    /// Whether this kind is a topic root that keeps its wrapper on parse.
    pub fn is_structural_root(self) -> bool {
        matches!(self, NodeKind::Concept | NodeKind::Task | NodeKind::Reference)
    }

    /// Whether this kind is a body-like wrapper whose children become the
    /// document roots when it is the outermost recognizable container.
    pub fn is_body_wrapper(self) -> bool {
        matches!(
            self,
            NodeKind::Body | NodeKind::ConceptBody | NodeKind::TaskBody | NodeKind::ReferenceBody
        )
    }

    /// Legal attributes of the kind, in emission order.
    pub fn attributes(self) -> &'static [&'static str] {
        match self {
            NodeKind::Concept
            | NodeKind::Task
            | NodeKind::Reference
            | NodeKind::Title
            | NodeKind::Section
            | NodeKind::Prolog
            | NodeKind::Question
            | NodeKind::LearningContent
            | NodeKind::LearningBody
            | NodeKind::LearningSummary
            | NodeKind::LearningContentBody => &["id"],
            NodeKind::Answer => &["id", "correct"],
            NodeKind::Note | NodeKind::DocTag => &["type"],
            NodeKind::Example => &["title"],
            NodeKind::Codeblock => &["language"],
            NodeKind::Table => &["xml:id", "role"],
            NodeKind::TableHeaderCell | NodeKind::TableCell => &["align"],
            NodeKind::Image => &["src", "alt", "ref", "width", "height", "float", "role"],
            NodeKind::Video => &["ref", "src", "width", "height", "poster", "autoplay", "controls"],
            NodeKind::CrossReference => &["refid"],
            NodeKind::Variable => &["name"],
            NodeKind::GlossaryEntry => &["termid", "term", "definition"],
            NodeKind::LearningAssessment => &["id", "mode"],
            NodeKind::ConceptBody
            | NodeKind::TaskBody
            | NodeKind::ReferenceBody
            | NodeKind::Body
            | NodeKind::Paragraph
            | NodeKind::Shortdesc
            | NodeKind::Steps
            | NodeKind::Step
            | NodeKind::BulletList
            | NodeKind::OrderedList
            | NodeKind::ListItem
            | NodeKind::TableRow
            | NodeKind::Figure
            | NodeKind::Text
            | NodeKind::Unknown => &[],
        }
    }

    /// Map a legacy attribute spelling onto the stored name. Media kinds
    /// accept `href` for what the model stores as `src`.
    pub fn attribute_alias(self, name: &str) -> Option<&'static str> {
        match (self, name) {
            (NodeKind::Image | NodeKind::Video, "href") => Some("src"),
            _ => None,
        }
    }

    /// Stable camel-case name of the kind, used in logs and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Concept => "concept",
            NodeKind::ConceptBody => "conceptBody",
            NodeKind::Task => "task",
            NodeKind::TaskBody => "taskBody",
            NodeKind::Reference => "reference",
            NodeKind::ReferenceBody => "referenceBody",
            NodeKind::Body => "body",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Title => "title",
            NodeKind::Shortdesc => "shortdesc",
            NodeKind::Section => "section",
            NodeKind::Note => "note",
            NodeKind::Example => "example",
            NodeKind::Prolog => "prolog",
            NodeKind::Steps => "steps",
            NodeKind::Step => "step",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::Question => "question",
            NodeKind::Answer => "answer",
            NodeKind::Codeblock => "codeblock",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableHeaderCell => "tableHeaderCell",
            NodeKind::TableCell => "tableCell",
            NodeKind::Figure => "figure",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::CrossReference => "crossReference",
            NodeKind::DocTag => "docTag",
            NodeKind::Variable => "variable",
            NodeKind::GlossaryEntry => "glossaryEntry",
            NodeKind::LearningContent => "learningContent",
            NodeKind::LearningBody => "learningBody",
            NodeKind::LearningSummary => "learningSummary",
            NodeKind::LearningContentBody => "learningContentBody",
            NodeKind::LearningAssessment => "learningAssessment",
            NodeKind::Text => "text",
            NodeKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
