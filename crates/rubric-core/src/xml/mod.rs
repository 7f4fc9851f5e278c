//! The XML wire format
//!
//! [`parse`] turns topic XML into editing-tree roots, [`serialize`]
//! renders roots back to XML, and [`normalize`] collapses formatting
//! whitespace so the two directions can be compared. Parsing is the
//! only fallible direction; serialization always produces a document.

mod escape;
mod reader;
mod writer;

pub use reader::parse;
pub use writer::{normalize, serialize};
