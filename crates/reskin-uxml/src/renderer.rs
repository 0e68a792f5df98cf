//! Document tree → markup text
//!
//! Deterministic, indented emission. Everything written here must parse
//! back through [`crate::parse`]; the renderer never fabricates syntax
//! the importer does not recognize.

use std::fmt::Write;

use quick_xml::escape::escape;
use reskin_dom::{UxmlDocument, UxmlElement};

const INDENT: &str = "  ";

pub(crate) const ROOT_TAG: &str = "ui:UXML";
pub(crate) const NAMESPACE_UI: &str = "UnityEngine.UIElements";
pub(crate) const NAMESPACE_EDITOR: &str = "UnityEditor.UIElements";
/// First word of the auxiliary comment block carrying inline styles.
pub(crate) const STYLE_BLOCK_MARKER: &str = "inline-styles";

/// Render a document as indented markup text.
pub fn render(document: &UxmlDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<{ROOT_TAG} xmlns:ui="{NAMESPACE_UI}" xmlns:uie="{NAMESPACE_EDITOR}">"#
    );

    for template in &document.templates {
        let _ = write!(
            out,
            r#"{INDENT}<ui:Template name="{}" src="{}""#,
            escape(&template.name),
            escape(&template.src)
        );
        if let Some(guid) = &template.guid {
            let _ = write!(out, r#" guid="{}""#, escape(guid));
        }
        if let Some(file_id) = template.file_id {
            let _ = write!(out, r#" file-id="{file_id}""#);
        }
        let _ = writeln!(out, "/>");
    }

    if let Some(root) = &document.root {
        render_element(&mut out, root, 1);
    }

    if let Some(styles) = &document.inline_styles {
        if !styles.is_empty() {
            let _ = writeln!(out, "{INDENT}<!-- {STYLE_BLOCK_MARKER}");
            for line in reskin_uss::write_uss(styles).lines() {
                let _ = writeln!(out, "{INDENT}{line}");
            }
            let _ = writeln!(out, "{INDENT}-->");
        }
    }

    let _ = writeln!(out, "</{ROOT_TAG}>");
    out
}

fn render_element(out: &mut String, element: &UxmlElement, depth: usize) {
    let pad = INDENT.repeat(depth);
    let _ = write!(out, "{pad}<ui:{}", element.element_type);
    if let Some(template) = &element.template {
        let _ = write!(out, r#" template="{}""#, escape(template));
    }
    for attr in &element.attributes {
        let _ = write!(out, r#" {}="{}""#, attr.name, escape(&attr.value));
    }

    if element.children.is_empty() && element.text.is_none() {
        let _ = writeln!(out, "/>");
        return;
    }
    let _ = write!(out, ">");
    if let Some(text) = &element.text {
        let _ = write!(out, "{}", escape(text));
    }
    if element.children.is_empty() {
        let _ = writeln!(out, "</ui:{}>", element.element_type);
        return;
    }
    let _ = writeln!(out);
    for child in &element.children {
        render_element(out, child, depth + 1);
    }
    let _ = writeln!(out, "{pad}</ui:{}>", element.element_type);
}
