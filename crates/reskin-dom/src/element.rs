//! Element tree node

/// A single `name="value"` pair. Insertion order is significant and
/// preserved by every conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UxmlAttribute {
    pub name: String,
    pub value: String,
}

impl UxmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// One node of the document tree.
///
/// Children are exclusively owned; the only link back to the parent is
/// the numeric `parent_id` carried from the source record, never a live
/// reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UxmlElement {
    pub element_type: String,
    /// Id carried from the source record; `None` on parsed elements.
    pub id: Option<i32>,
    pub parent_id: Option<i32>,
    pub order_in_document: Option<i32>,
    pub attributes: Vec<UxmlAttribute>,
    pub text: Option<String>,
    /// Name of the referenced sub-document, for template instances.
    pub template: Option<String>,
    pub children: Vec<UxmlElement>,
}

impl UxmlElement {
    pub fn new(element_type: impl Into<String>) -> Self {
        Self { element_type: element_type.into(), ..Default::default() }
    }

    /// First attribute with the given name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Replace an existing attribute value, or append a new pair.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        for attr in &mut self.attributes {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        self.attributes.push(UxmlAttribute::new(name, value));
    }

    /// The conventional `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.attr("name")
    }

    /// Class names from the conventional `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    /// This node plus every descendant.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(UxmlElement::subtree_len).sum::<usize>()
    }

    /// Structural equality: types, attributes, text, template reference
    /// and child order. The carried record ids and order keys are
    /// bookkeeping, not structure, and are ignored.
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type
            && self.attributes == other.attributes
            && self.text == other.text
            && self.template == other.template
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.structurally_eq(b))
    }
}
