//! Flat records → document tree
//!
//! Two passes over the record array: materialize every record and index
//! it by id, then link children to parents. The tree is then assembled
//! from the root by claiming each element out of the index exactly once,
//! which doubles as cycle detection, and every sibling list is ordered
//! by its document-order key.

use std::collections::HashMap;

use reskin_dom::{
    ElementRecord, GENERIC_ELEMENT, StringTable, StructuralError, StyleBlob, UxmlAttribute,
    UxmlDocument, UxmlElement, UxmlTemplate, Warning, record_warning,
};

use crate::Export;

/// Rebuild the element hierarchy from the container's flat records.
pub fn export(
    records: &[ElementRecord],
    strings: &StringTable,
    styles: Option<&StyleBlob>,
) -> Result<Export, StructuralError> {
    tracing::debug!(records = records.len(), "exporting element records");
    let mut warnings = Vec::new();

    // Pass 1: materialize every record, indexed by id.
    let mut by_id: HashMap<i32, UxmlElement> = HashMap::with_capacity(records.len());
    for record in records {
        let element = materialize(record, strings, &mut warnings);
        if by_id.insert(record.id, element).is_some() {
            return Err(StructuralError::DuplicateId { id: record.id });
        }
    }

    // Exactly one record may stand without a parent.
    let roots: Vec<i32> = records.iter().filter(|r| r.is_root()).map(|r| r.id).collect();
    let root_id = match roots.as_slice() {
        [] => return Err(StructuralError::NoRoot),
        [id] => *id,
        _ => return Err(StructuralError::MultipleRoots { ids: roots }),
    };

    // Pass 2: parent → children edges, kept in array order so that equal
    // order keys stay stable.
    let mut edges: HashMap<i32, Vec<i32>> = HashMap::new();
    for record in records {
        let Some(parent) = record.parent_id else { continue };
        if record.is_root() {
            continue;
        }
        if !by_id.contains_key(&parent) {
            return Err(StructuralError::UnknownParent { child: record.id, parent });
        }
        edges.entry(parent).or_default().push(record.id);
    }

    // Assembly: each element is re-owned by its parent exactly once.
    let Some(mut root) = claim(root_id, &mut by_id, &edges) else {
        return Err(StructuralError::NoRoot);
    };

    // Every parent resolved above, so anything left unclaimed hangs off
    // a parent cycle rather than the root.
    if !by_id.is_empty() {
        let mut ids: Vec<i32> = by_id.keys().copied().collect();
        ids.sort_unstable();
        return Err(StructuralError::Cycle { ids });
    }

    sort_children(&mut root);

    let mut document = UxmlDocument::new(String::new());
    document.templates = collect_templates(records);
    document.root = Some(root);
    if let Some(blob) = styles {
        let (sheet, style_warnings) = reskin_uss::decode(blob, strings);
        warnings.extend(style_warnings);
        document.inline_styles = Some(sheet);
    }

    tracing::debug!(
        elements = document.element_count(),
        warnings = warnings.len(),
        "export complete"
    );
    Ok(Export { document, warnings })
}

/// Build one element from its record, resolving string indices. A bad
/// index loses that field, not the document.
fn materialize(
    record: &ElementRecord,
    strings: &StringTable,
    warnings: &mut Vec<Warning>,
) -> UxmlElement {
    let element_type = if record.type_name.is_empty() {
        record_warning(warnings, Warning::DefaultedTypeName { id: record.id });
        GENERIC_ELEMENT.to_owned()
    } else {
        record.type_name.clone()
    };
    let mut element = UxmlElement::new(element_type);
    element.id = Some(record.id);
    element.parent_id = record.parent_id;
    element.order_in_document = record.order_in_document;
    element.template = record.template.clone();

    if let Some(index) = record.name_index {
        match strings.get(index) {
            Some(name) if !name.is_empty() => {
                element.attributes.push(UxmlAttribute::new("name", name));
            }
            Some(_) => {}
            None => record_warning(warnings, Warning::StringIndexOutOfRange {
                id: record.id,
                field: "name",
                index,
                len: strings.len(),
            }),
        }
    }

    let mut classes = Vec::with_capacity(record.class_indices.len());
    for &index in &record.class_indices {
        match strings.get(index) {
            Some(class) if !class.is_empty() => classes.push(class),
            Some(_) => {}
            None => record_warning(warnings, Warning::StringIndexOutOfRange {
                id: record.id,
                field: "class",
                index,
                len: strings.len(),
            }),
        }
    }
    if !classes.is_empty() {
        element.attributes.push(UxmlAttribute::new("class", classes.join(" ")));
    }

    if let Some(index) = record.text_index {
        match strings.get(index) {
            Some(text) if !text.is_empty() => element.text = Some(text.to_owned()),
            Some(_) => {}
            None => record_warning(warnings, Warning::StringIndexOutOfRange {
                id: record.id,
                field: "text",
                index,
                len: strings.len(),
            }),
        }
    }

    element
}

/// Move an element out of the index and attach its subtree.
fn claim(
    id: i32,
    by_id: &mut HashMap<i32, UxmlElement>,
    edges: &HashMap<i32, Vec<i32>>,
) -> Option<UxmlElement> {
    let mut element = by_id.remove(&id)?;
    if let Some(children) = edges.get(&id) {
        for &child in children {
            if let Some(child_element) = claim(child, by_id, edges) {
                element.children.push(child_element);
            }
        }
    }
    Some(element)
}

/// Order every sibling list by its document-order key, recursively.
/// Absent keys sort as 0; the sort is stable, so ties keep array order.
fn sort_children(element: &mut UxmlElement) {
    element
        .children
        .sort_by_key(|child| child.order_in_document.unwrap_or(0));
    for child in &mut element.children {
        sort_children(child);
    }
}

/// Template declarations, derived from the records' references in
/// first-reference order.
fn collect_templates(records: &[ElementRecord]) -> Vec<UxmlTemplate> {
    let mut templates: Vec<UxmlTemplate> = Vec::new();
    for record in records {
        if let Some(name) = &record.template {
            if !templates.iter().any(|t| &t.name == name) {
                templates.push(UxmlTemplate::named(name));
            }
        }
    }
    templates
}
