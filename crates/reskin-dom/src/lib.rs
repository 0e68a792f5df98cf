//! reskin DOM - UI document model
//!
//! Flat element records, string table, element tree and style model shared
//! by the exporter and importer crates.

mod document;
mod element;
mod error;
mod records;
mod strings;
mod style;

pub use document::{UxmlDocument, UxmlTemplate};
pub use element::{UxmlAttribute, UxmlElement};
pub use error::{StructuralError, Warning, record_warning};
pub use records::{ElementRecord, RawValue, StyleBlob, StylePropertyBlob, StyleRuleBlob};
pub use strings::{StringInterner, StringTable};
pub use style::{Declaration, Dimension, DimensionUnit, StyleRule, StyleSheet, StyleValue};

/// Reserved parent id marking a root record.
pub const NO_PARENT: i32 = -1;

/// Element kind a record falls back to when its type name is unset.
pub const GENERIC_ELEMENT: &str = "VisualElement";
