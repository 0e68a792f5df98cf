//! Edge case tests for reskin-uxml
//!
//! Malformed markup rejection, cosmetic-formatting tolerance, escaping
//! and unusual-but-valid documents.

use reskin_dom::{UxmlAttribute, UxmlDocument, UxmlElement};
use reskin_uxml::{MarkupError, parse, render};

// ============================================================================
// MALFORMED MARKUP - ALWAYS FATAL
// ============================================================================

#[test]
fn test_parse_empty_input() {
    assert!(matches!(parse(""), Err(MarkupError::NoRootElement)));
}

#[test]
fn test_parse_whitespace_only() {
    assert!(matches!(parse("  \n\t\n  "), Err(MarkupError::NoRootElement)));
}

#[test]
fn test_parse_unterminated_tag() {
    let markup = "<ui:UXML><ui:VisualElement><ui:Label/>";
    assert!(matches!(
        parse(markup),
        Err(MarkupError::UnterminatedTag(tag)) if tag == "VisualElement"
    ));
}

#[test]
fn test_parse_mismatched_closing_tag() {
    let markup = "<ui:UXML><ui:Label></ui:Button></ui:UXML>";
    assert!(matches!(
        parse(markup),
        Err(MarkupError::MismatchedTag { expected, found })
            if expected == "Label" && found == "Button"
    ));
}

#[test]
fn test_parse_stray_closing_tag() {
    assert!(matches!(
        parse("</ui:Label>"),
        Err(MarkupError::StrayClosingTag(tag)) if tag == "Label"
    ));
}

#[test]
fn test_parse_multiple_roots() {
    let markup = "<ui:UXML><ui:Label/><ui:Button/></ui:UXML>";
    assert!(matches!(
        parse(markup),
        Err(MarkupError::MultipleRootElements { .. })
    ));
}

#[test]
fn test_parse_text_outside_any_element() {
    assert!(matches!(
        parse("loose text <ui:Label/>"),
        Err(MarkupError::TextOutsideElement)
    ));
}

#[test]
fn test_parse_templates_but_no_tree() {
    let markup = r#"<ui:UXML><ui:Template name="T" src="T.uxml"/></ui:UXML>"#;
    assert!(matches!(parse(markup), Err(MarkupError::NoRootElement)));
}

// ============================================================================
// COSMETIC FORMATTING TOLERANCE
// ============================================================================

#[test]
fn test_parse_messy_whitespace() {
    let markup = "\n\n<ui:UXML>\r\n\t<ui:VisualElement\n      name=\"hud\"\n   >\n\n    <ui:Label/>\r\n  </ui:VisualElement>\n</ui:UXML>\n\n";
    let parsed = parse(markup).expect("formatting is cosmetic");
    let root = parsed.document.root.expect("root");
    assert_eq!(root.name(), Some("hud"));
    assert_eq!(root.children.len(), 1);
}

#[test]
fn test_parse_without_wrapper() {
    let parsed = parse("<ui:Label name=\"lone\"/>").expect("bare fragment");
    assert_eq!(parsed.document.root.expect("root").name(), Some("lone"));
}

#[test]
fn test_parse_xml_declaration_ignored() {
    let markup = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<ui:UXML><ui:Label/></ui:UXML>";
    assert!(parse(markup).is_ok());
}

#[test]
fn test_parse_plain_comment_ignored() {
    let markup = "<ui:UXML><!-- reviewed 2024-03 --><ui:Label/></ui:UXML>";
    let parsed = parse(markup).expect("valid");
    assert!(parsed.document.inline_styles.is_none());
}

// ============================================================================
// PRESERVATION
// ============================================================================

#[test]
fn test_parse_unknown_element_types_preserved() {
    let markup = r#"<ui:UXML><fm:ScoutGrid cols="3"><CustomCell/></fm:ScoutGrid></ui:UXML>"#;
    let parsed = parse(markup).expect("unknown kinds are fine");
    let root = parsed.document.root.expect("root");
    assert_eq!(root.element_type, "ScoutGrid");
    assert_eq!(root.attr("cols"), Some("3"));
    assert_eq!(root.children[0].element_type, "CustomCell");
}

#[test]
fn test_parse_attribute_order_preserved() {
    let markup = r#"<ui:Slider low-value="0" high-value="10" name="volume" tooltip="Volume"/>"#;
    let parsed = parse(markup).expect("valid");
    let root = parsed.document.root.expect("root");
    let names: Vec<_> = root.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["low-value", "high-value", "name", "tooltip"]);
}

#[test]
fn test_parse_template_declaration_fields() {
    let markup = r#"<ui:UXML>
  <ui:Template name="Row" src="Row.uxml" guid="1f2e3d" file-id="42"/>
  <ui:VisualElement/>
</ui:UXML>"#;
    let parsed = parse(markup).expect("valid");
    let template = &parsed.document.templates[0];
    assert_eq!(template.name, "Row");
    assert_eq!(template.src, "Row.uxml");
    assert_eq!(template.guid.as_deref(), Some("1f2e3d"));
    assert_eq!(template.file_id, Some(42));
}

#[test]
fn test_parse_cdata_as_text() {
    let markup = "<ui:Label><![CDATA[1 < 2 && 3 > 2]]></ui:Label>";
    let parsed = parse(markup).expect("valid");
    assert_eq!(
        parsed.document.root.expect("root").text.as_deref(),
        Some("1 < 2 && 3 > 2")
    );
}

// ============================================================================
// ESCAPING AND UNICODE
// ============================================================================

#[test]
fn test_render_escapes_special_characters() {
    let mut root = UxmlElement::new("Label");
    root.attributes.push(UxmlAttribute::new("tooltip", r#"a<b & "c""#));
    root.text = Some("score < 10 & rising".to_owned());
    let mut document = UxmlDocument::new("Test");
    document.root = Some(root);

    let markup = render(&document);
    assert!(!markup.contains(r#"="a<b"#), "raw `<` leaked into markup:\n{markup}");

    let parsed = parse(&markup).expect("escaped markup parses");
    let reparsed = parsed.document.root.expect("root");
    assert_eq!(reparsed.attr("tooltip"), Some(r#"a<b & "c""#));
    assert_eq!(reparsed.text.as_deref(), Some("score < 10 & rising"));
}

#[test]
fn test_unicode_round_trip() {
    let mut root = UxmlElement::new("Label");
    root.attributes.push(UxmlAttribute::new("name", "überschrift"));
    root.text = Some("Славия — 3:0 ⚽".to_owned());
    let mut document = UxmlDocument::new("Test");
    document.root = Some(root);

    let parsed = parse(&render(&document)).expect("unicode survives");
    assert!(document.structurally_eq(&parsed.document));
}

#[test]
fn test_deep_nesting_round_trip() {
    let mut element = UxmlElement::new("Label");
    for depth in 0..64 {
        let mut parent = UxmlElement::new("VisualElement");
        parent.set_attr("name", format!("level-{depth}"));
        parent.children.push(element);
        element = parent;
    }
    let mut document = UxmlDocument::new("Deep");
    document.root = Some(element);

    let parsed = parse(&render(&document)).expect("deep tree parses");
    assert!(document.structurally_eq(&parsed.document));
}

#[test]
fn test_text_with_child_elements() {
    let markup = "<ui:Foldout>Header<ui:Label/></ui:Foldout>";
    let parsed = parse(markup).expect("mixed content");
    let root = parsed.document.root.expect("root");
    assert_eq!(root.text.as_deref(), Some("Header"));
    assert_eq!(root.children.len(), 1);
}
