//! Flat records exchanged with the asset container
//!
//! One [`ElementRecord`] per tree node, parent linkage by id, plus the
//! embedded style-rule table in its raw on-disk shape. These are the
//! read-only inputs to export and the write-back outputs of import; the
//! container collaborator owns their binary layout and ships them across
//! a JSON boundary, hence the serde derives.

use serde::{Deserialize, Serialize};

use crate::style::DimensionUnit;

/// One row of the container's element table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Unique within one document. -1 is reserved and never a valid id.
    pub id: i32,
    /// `None` or `Some(-1)` marks a root candidate.
    pub parent_id: Option<i32>,
    /// Sibling sort key; absent sorts as 0, ties keep array order.
    pub order_in_document: Option<i32>,
    pub type_name: String,
    pub name_index: Option<u32>,
    pub class_indices: Vec<u32>,
    pub text_index: Option<u32>,
    /// Name of a referenced sub-document, for template-instance elements.
    pub template: Option<String>,
}

impl ElementRecord {
    /// True when this record does not name a parent.
    pub fn is_root(&self) -> bool {
        matches!(self.parent_id, None | Some(crate::NO_PARENT))
    }
}

/// Embedded style-rule table as stored alongside the element table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleBlob {
    pub rules: Vec<StyleRuleBlob>,
}

/// One selector block of the embedded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRuleBlob {
    pub selector: RawValue,
    pub properties: Vec<StylePropertyBlob>,
}

/// One property entry of a rule block. Entry order is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePropertyBlob {
    pub name: String,
    pub values: Vec<RawValue>,
}

/// A raw style value as the container stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// Reference into the owning document's string table.
    Index(u32),
    /// Literal string stored inline.
    Text(String),
    /// Numeric literal with its encoded unit.
    Num { value: f32, unit: DimensionUnit },
}
