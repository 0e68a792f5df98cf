//! Error and warning taxonomy
//!
//! Structural problems are fatal for the document and reported with the
//! offending ids; resolution problems are recovered locally, recorded as
//! warnings and returned alongside the result, never thrown.

use thiserror::Error;

/// Fatal defects in the flat record array. No partial document is
/// returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("no root element: every record names a parent")]
    NoRoot,
    #[error("multiple root candidates: ids {ids:?}")]
    MultipleRoots { ids: Vec<i32> },
    #[error("duplicate element id {id}")]
    DuplicateId { id: i32 },
    #[error("element {child} references unknown parent {parent}")]
    UnknownParent { child: i32, parent: i32 },
    #[error("parent cycle among elements {ids:?}")]
    Cycle { ids: Vec<i32> },
}

/// Recoverable conditions, collected for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("element {id}: {field} index {index} outside string table of {len}")]
    StringIndexOutOfRange { id: i32, field: &'static str, index: u32, len: usize },
    #[error("element {id}: empty type name, defaulting to {generic}", generic = crate::GENERIC_ELEMENT)]
    DefaultedTypeName { id: i32 },
    #[error("style rule `{selector}` skipped: {reason}")]
    MalformedStyleRule { selector: String, reason: String },
    #[error("style rule `{selector}`, property `{property}`: unresolvable value index {index}")]
    UnresolvedStyleValue { selector: String, property: String, index: u32 },
    #[error("style rule `{selector}`: property `{property}` lost all of its values")]
    DroppedStyleProperty { selector: String, property: String },
}

/// Record a recoverable warning: logged immediately, then collected for
/// the caller.
pub fn record_warning(sink: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{warning}");
    sink.push(warning);
}
