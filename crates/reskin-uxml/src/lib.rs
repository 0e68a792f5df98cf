//! reskin UXML - tree exporter and importer
//!
//! Rebuilds a hierarchical document from the container's flat element
//! records and renders it as editable markup; parses edited markup back
//! and flattens it into fresh records ready for reinjection.
//!
//! Every call is purely functional over its own inputs: documents can be
//! converted on independent worker threads with no coordination.

mod error;
mod exporter;
mod flattener;
mod parser;
mod renderer;

pub use error::MarkupError;
pub use exporter::export;
pub use flattener::flatten;
pub use parser::parse;
pub use renderer::render;

use reskin_dom::{ElementRecord, StringTable, StyleBlob, UxmlDocument, UxmlTemplate, Warning};

/// Result of a successful export.
#[derive(Debug)]
pub struct Export {
    pub document: UxmlDocument,
    pub warnings: Vec<Warning>,
}

/// Result of a successful markup parse.
#[derive(Debug)]
pub struct Parsed {
    pub document: UxmlDocument,
    pub warnings: Vec<Warning>,
}

/// Flat output ready for the container writer.
#[derive(Debug)]
pub struct Flattened {
    pub records: Vec<ElementRecord>,
    pub strings: StringTable,
    pub styles: Option<StyleBlob>,
    pub templates: Vec<UxmlTemplate>,
}
