//! Error types for topic XML conversion

use thiserror::Error;

/// Main error type for deserializing topic XML into the editing tree.
///
/// Only malformed XML is fatal. Unknown elements pass through as
/// [`crate::tree::Node::Unknown`] and structural oddities degrade to
/// empty or partial structures, so none of those surface here.
/// Serialization is total and has no error type.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed XML reported by the event reader (mismatched or
    /// unclosed tags, bad entity references)
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax (bad quoting, duplicate names)
    #[error("attribute error: {0}")]
    Attributes(#[from] quick_xml::events::attributes::AttrError),

    /// Document shape the tokenizer accepts but a topic cannot have,
    /// such as multiple root elements or text outside the root
    #[error("unexpected structure: {0}")]
    Structure(String),
}

impl ParseError {
    /// Create a structure error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}
