//! Rubric Core
//!
//! Conversion engine between DITA-style topic XML and a typed editing
//! tree. The crate parses concept, task and reference topics into a
//! closed [`Node`] sum type, lets hosts edit that tree in place, and
//! renders it back to deterministic pretty-printed XML. Both directions
//! are pure and synchronous.
//!
//! Round trips are stable modulo formatting: parsing a document and
//! serializing the result yields XML that is [`normalize`]-equal to the
//! input.
//!
//! ```
//! use rubric_core::{normalize, parse, serialize};
//!
//! let xml = r#"<concept id="c1">
//!     <title>Titre</title>
//!     <conbody>
//!         <p>Hello world</p>
//!     </conbody>
//! </concept>"#;
//!
//! let roots = parse(xml)?;
//! let rendered = serialize(&roots);
//! assert_eq!(normalize(&rendered), normalize(xml));
//! # Ok::<(), rubric_core::ParseError>(())
//! ```

pub mod buffer;
pub mod catalog;
pub mod error;
pub mod result;
pub mod tree;
pub mod xml;

// Re-export the types most hosts need
pub use buffer::{BufferStatus, BufferStore};
pub use catalog::{ContentCategory, NodeKind};
pub use error::ParseError;
pub use result::Result;
pub use tree::Node;
pub use xml::{normalize, parse, serialize};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rubric=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
