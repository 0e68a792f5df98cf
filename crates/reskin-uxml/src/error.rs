//! Markup parse failures
//!
//! All fatal: a half-reconstructed tree would be silently reinjected
//! into the asset, so broken markup is rejected outright.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedTag { expected: String, found: String },
    #[error("stray closing tag </{0}>")]
    StrayClosingTag(String),
    #[error("unterminated element <{0}>")]
    UnterminatedTag(String),
    #[error("markup contains no root element")]
    NoRootElement,
    #[error("markup contains more than one root element: <{first}> and <{second}>")]
    MultipleRootElements { first: String, second: String },
    #[error("text content outside any element")]
    TextOutsideElement,
}
