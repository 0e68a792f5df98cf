//! Embedded rule table decode/encode
//!
//! One bad rule never aborts the sheet: malformed rules are skipped with
//! a warning and the remaining rules decode normally.

use reskin_dom::{
    Declaration, Dimension, RawValue, StringInterner, StringTable, StyleBlob, StylePropertyBlob,
    StyleRule, StyleRuleBlob, StyleSheet, StyleValue, Warning, record_warning,
};

use crate::text::classify;

/// A property value entry with its string indices resolved.
enum Resolved {
    Text(String),
    Dim(Dimension),
}

/// Decode the embedded rule table into the style model.
pub fn decode(blob: &StyleBlob, strings: &StringTable) -> (StyleSheet, Vec<Warning>) {
    tracing::debug!(rules = blob.rules.len(), "decoding style table");
    let mut sheet = StyleSheet::new();
    let mut warnings = Vec::new();

    for rule in &blob.rules {
        let selector = match &rule.selector {
            RawValue::Text(s) => s.clone(),
            RawValue::Index(index) => match strings.get(*index) {
                Some(s) => s.to_owned(),
                None => {
                    record_warning(&mut warnings, Warning::MalformedStyleRule {
                        selector: format!("<string {index}>"),
                        reason: "unresolvable selector index".to_owned(),
                    });
                    continue;
                }
            },
            RawValue::Num { value, .. } => {
                record_warning(&mut warnings, Warning::MalformedStyleRule {
                    selector: value.to_string(),
                    reason: "selector is not a string".to_owned(),
                });
                continue;
            }
        };

        let mut declarations = Vec::with_capacity(rule.properties.len());
        for property in &rule.properties {
            if let Some(declaration) =
                decode_property(property, &selector, strings, &mut warnings)
            {
                declarations.push(declaration);
            }
        }
        sheet.rules.push(StyleRule { selector, declarations });
    }

    (sheet, warnings)
}

fn decode_property(
    property: &StylePropertyBlob,
    selector: &str,
    strings: &StringTable,
    warnings: &mut Vec<Warning>,
) -> Option<Declaration> {
    let mut resolved = Vec::with_capacity(property.values.len());
    for value in &property.values {
        match value {
            RawValue::Index(index) => match strings.get(*index) {
                Some(s) => resolved.push(Resolved::Text(s.to_owned())),
                None => record_warning(warnings, Warning::UnresolvedStyleValue {
                    selector: selector.to_owned(),
                    property: property.name.clone(),
                    index: *index,
                }),
            },
            RawValue::Text(s) => resolved.push(Resolved::Text(s.clone())),
            RawValue::Num { value, unit } => {
                resolved.push(Resolved::Dim(Dimension::new(*value, *unit)));
            }
        }
    }

    if resolved.is_empty() {
        record_warning(warnings, Warning::DroppedStyleProperty {
            selector: selector.to_owned(),
            property: property.name.clone(),
        });
        return None;
    }

    let value = match resolved.as_slice() {
        [Resolved::Dim(dimension)] => StyleValue::Dimension(*dimension),
        [Resolved::Text(s)] => classify(s),
        entries => StyleValue::Tokens(
            entries
                .iter()
                .flat_map(|entry| match entry {
                    Resolved::Text(s) => {
                        s.split_whitespace().map(str::to_owned).collect::<Vec<_>>()
                    }
                    Resolved::Dim(dimension) => vec![dimension.to_string()],
                })
                .collect(),
        ),
    };
    Some(Declaration::new(property.name.clone(), value))
}

/// Encode the style model back into the container's rule-table shape.
///
/// Textual values are interned into the caller's table builder and
/// written as index entries, so style strings and element strings share
/// one table. Declaration and rule order are emitted exactly as stored.
pub fn encode(sheet: &StyleSheet, interner: &mut StringInterner) -> StyleBlob {
    tracing::debug!(rules = sheet.len(), "encoding style table");
    let mut blob = StyleBlob::default();

    for rule in &sheet.rules {
        let mut properties = Vec::with_capacity(rule.declarations.len());
        for declaration in &rule.declarations {
            let values = match &declaration.value {
                StyleValue::Dimension(dimension) => {
                    vec![RawValue::Num { value: dimension.value, unit: dimension.unit }]
                }
                StyleValue::Tokens(tokens) => tokens
                    .iter()
                    .map(|token| RawValue::Index(interner.intern(token)))
                    .collect(),
                // The canonical text form re-classifies to the same value.
                other => vec![RawValue::Index(interner.intern(&other.to_string()))],
            };
            properties.push(StylePropertyBlob { name: declaration.property.clone(), values });
        }
        blob.rules.push(StyleRuleBlob {
            selector: RawValue::Text(rule.selector.clone()),
            properties,
        });
    }

    blob
}
