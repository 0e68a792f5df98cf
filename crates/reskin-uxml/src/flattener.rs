//! Document tree → flat records
//!
//! The inverse of export. Ids are reassigned densely in pre-order and
//! the string table is rebuilt from scratch through the interner; only
//! parent/child/order relationships survive a round trip, never the
//! original numeric identities.

use reskin_dom::{ElementRecord, NO_PARENT, StringInterner, UxmlDocument, UxmlElement};

use crate::Flattened;

/// Flatten a document into fresh container records.
pub fn flatten(document: &UxmlDocument) -> Flattened {
    let mut interner = StringInterner::new();
    let mut records = Vec::with_capacity(document.element_count());

    if let Some(root) = &document.root {
        flatten_element(root, NO_PARENT, 0, &mut records, &mut interner);
    }

    let styles = document
        .inline_styles
        .as_ref()
        .filter(|sheet| !sheet.is_empty())
        .map(|sheet| reskin_uss::encode(sheet, &mut interner));

    tracing::debug!(
        records = records.len(),
        strings = interner.len(),
        "flattened document"
    );
    Flattened {
        records,
        strings: interner.into_table(),
        styles,
        templates: document.templates.clone(),
    }
}

fn flatten_element(
    element: &UxmlElement,
    parent_id: i32,
    order: i32,
    records: &mut Vec<ElementRecord>,
    interner: &mut StringInterner,
) {
    let id = records.len() as i32;
    let mut record = ElementRecord {
        id,
        parent_id: Some(parent_id),
        order_in_document: Some(order),
        type_name: element.element_type.clone(),
        template: element.template.clone(),
        ..Default::default()
    };

    for attr in &element.attributes {
        match attr.name.as_str() {
            "name" => record.name_index = Some(interner.intern(&attr.value)),
            "class" => {
                record.class_indices = attr
                    .value
                    .split_whitespace()
                    .map(|class| interner.intern(class))
                    .collect();
            }
            // The record shape only models name/class/text; free-form
            // attributes live in fields owned by the host toolkit.
            _ => {}
        }
    }
    if let Some(text) = &element.text {
        record.text_index = Some(interner.intern(text));
    }

    records.push(record);
    for (index, child) in element.children.iter().enumerate() {
        flatten_element(child, id, index as i32, records, interner);
    }
}
