//! Document - one exported/imported UI layout asset

use serde::{Deserialize, Serialize};

use crate::element::UxmlElement;
use crate::style::StyleSheet;

/// A hierarchical UI document, reconstructed from flat records or parsed
/// from markup. Constructed fresh per conversion call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UxmlDocument {
    pub asset_name: String,
    pub root: Option<UxmlElement>,
    /// Declared sub-document references, not inlined here.
    pub templates: Vec<UxmlTemplate>,
    pub inline_styles: Option<StyleSheet>,
}

impl UxmlDocument {
    pub fn new(asset_name: impl Into<String>) -> Self {
        Self { asset_name: asset_name.into(), ..Default::default() }
    }

    /// Number of elements in the tree.
    pub fn element_count(&self) -> usize {
        self.root.as_ref().map_or(0, UxmlElement::subtree_len)
    }

    /// Structural equality across a round trip: tree shape, template
    /// declarations and style rules. An absent style sheet and an empty
    /// one are equivalent.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        let roots_match = match (&self.root, &other.root) {
            (Some(a), Some(b)) => a.structurally_eq(b),
            (None, None) => true,
            _ => false,
        };
        roots_match
            && self.templates == other.templates
            && sheet_rules(&self.inline_styles) == sheet_rules(&other.inline_styles)
    }
}

fn sheet_rules(styles: &Option<StyleSheet>) -> &[crate::style::StyleRule] {
    styles.as_ref().map_or(&[], |sheet| sheet.rules.as_slice())
}

/// A declared reference to another document, composed by the host at a
/// later stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UxmlTemplate {
    pub name: String,
    /// Conventional relative path, `<name>.uxml`.
    pub src: String,
    pub guid: Option<String>,
    pub file_id: Option<i64>,
}

impl UxmlTemplate {
    /// Declaration for a template known only by name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            src: format!("{name}.uxml"),
            guid: None,
            file_id: None,
        }
    }
}
