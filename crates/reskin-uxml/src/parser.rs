//! Markup text → document tree
//!
//! Event-driven parse over the editable markup form. Formatting is free;
//! structure is not: anything unbalanced is rejected rather than
//! repaired, since a best-effort tree would be reinjected into the asset
//! as-is. Element kinds are preserved verbatim, the host environment
//! defines the valid set.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reskin_dom::{UxmlAttribute, UxmlDocument, UxmlElement, UxmlTemplate, Warning};

use crate::Parsed;
use crate::error::MarkupError;
use crate::renderer::STYLE_BLOCK_MARKER;

/// Parse markup text into a document.
pub fn parse(markup: &str) -> Result<Parsed, MarkupError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(true);
    // Tag balance is checked below against local names, so that a
    // mismatch reports the element kinds rather than a byte offset.
    config.check_end_names = false;

    let mut document = UxmlDocument::new(String::new());
    let mut warnings: Vec<Warning> = Vec::new();
    let mut stack: Vec<UxmlElement> = Vec::new();
    let mut top: Vec<UxmlElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::DocType(_) | Event::PI(_) => {}
            Event::Comment(comment) => {
                let content = String::from_utf8_lossy(&comment).into_owned();
                if let Some(body) = content.trim_start().strip_prefix(STYLE_BLOCK_MARKER) {
                    let (sheet, style_warnings) = reskin_uss::parse_uss(body);
                    warnings.extend(style_warnings);
                    document.inline_styles = Some(sheet);
                }
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                append_text(&mut stack, &value)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                append_text(&mut stack, &value)?;
            }
            Event::Start(start) => {
                stack.push(element_from(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                attach(element, &mut stack, &mut top);
            }
            Event::End(end) => {
                let name = local_name(end.local_name().as_ref());
                let Some(element) = stack.pop() else {
                    return Err(MarkupError::StrayClosingTag(name));
                };
                if element.element_type != name {
                    return Err(MarkupError::MismatchedTag {
                        expected: element.element_type,
                        found: name,
                    });
                }
                attach(element, &mut stack, &mut top);
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::UnterminatedTag(open.element_type.clone()));
    }

    // Unwrap the conventional document wrapper, when present.
    if top.len() == 1 && top[0].element_type == "UXML" {
        if let Some(wrapper) = top.pop() {
            top = wrapper.children;
        }
    }

    // Template declarations are siblings of the single tree root.
    let mut root: Option<UxmlElement> = None;
    for element in top {
        if element.element_type == "Template" {
            document.templates.push(template_from(&element));
        } else if let Some(first) = &root {
            return Err(MarkupError::MultipleRootElements {
                first: first.element_type.clone(),
                second: element.element_type,
            });
        } else {
            root = Some(element);
        }
    }
    let Some(root) = root else {
        return Err(MarkupError::NoRootElement);
    };
    document.root = Some(root);

    tracing::debug!(
        elements = document.element_count(),
        templates = document.templates.len(),
        "parsed markup"
    );
    Ok(Parsed { document, warnings })
}

fn element_from(start: &BytesStart<'_>) -> Result<UxmlElement, MarkupError> {
    let mut element = UxmlElement::new(local_name(start.local_name().as_ref()));
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        if key == "template" {
            element.template = Some(value);
        } else {
            element.attributes.push(UxmlAttribute { name: key, value });
        }
    }
    Ok(element)
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn append_text(stack: &mut [UxmlElement], value: &str) -> Result<(), MarkupError> {
    match stack.last_mut() {
        Some(element) => {
            match &mut element.text {
                Some(existing) => existing.push_str(value),
                None => element.text = Some(value.to_owned()),
            }
            Ok(())
        }
        None if value.trim().is_empty() => Ok(()),
        None => Err(MarkupError::TextOutsideElement),
    }
}

fn attach(element: UxmlElement, stack: &mut [UxmlElement], top: &mut Vec<UxmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => top.push(element),
    }
}

/// Rebuild a template declaration from its markup element.
fn template_from(element: &UxmlElement) -> UxmlTemplate {
    UxmlTemplate {
        name: element.attr("name").unwrap_or_default().to_owned(),
        src: element.attr("src").unwrap_or_default().to_owned(),
        guid: element.attr("guid").map(str::to_owned),
        file_id: element.attr("file-id").and_then(|v| v.parse().ok()),
    }
}
