//! USS rule text
//!
//! `selector { property: value; }` blocks, written deterministically and
//! parsed back tolerantly. This is the form embedded in rendered markup
//! for hand editing; a malformed rule is skipped with a warning while
//! its siblings parse normally.

use std::fmt::Write;

use reskin_dom::{
    Declaration, Dimension, DimensionUnit, StyleRule, StyleSheet, StyleValue, Warning,
    record_warning,
};

/// Classify one value as written. The set of recognized shapes is
/// closed; everything else stays a raw token list.
pub fn classify(text: &str) -> StyleValue {
    let text = text.trim();
    if is_hex_color(text) {
        return StyleValue::Color(text.to_ascii_lowercase());
    }
    if let Some(name) = parse_var_ref(text) {
        return StyleValue::VarRef(name.to_owned());
    }
    if let Some(inner) = text.strip_prefix("url(").and_then(|rest| rest.strip_suffix(')')) {
        let inner = inner.trim();
        return StyleValue::AssetRef(parse_quoted(inner).unwrap_or_else(|| inner.to_owned()));
    }
    if let Some(unquoted) = parse_quoted(text) {
        return StyleValue::Str(unquoted);
    }
    if let Some(dimension) = parse_dimension(text) {
        return StyleValue::Dimension(dimension);
    }
    StyleValue::Tokens(text.split_whitespace().map(str::to_owned).collect())
}

/// `#` followed by 3, 4, 6 or 8 hex digits, nothing else.
fn is_hex_color(text: &str) -> bool {
    match text.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 4 | 6 | 8)
                && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// `var(--name)`, returning the bare name. A fallback clause or spaces
/// inside the name disqualify it; the value then stays raw tokens.
fn parse_var_ref(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("var(")?.strip_suffix(')')?.trim();
    let name = inner.strip_prefix("--")?;
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == ',') {
        return None;
    }
    Some(name)
}

/// A quoted literal, unescaping `\"` and `\\`.
fn parse_quoted(text: &str) -> Option<String> {
    let quote = text.chars().next()?;
    if (quote != '"' && quote != '\'') || text.len() < 2 || !text.ends_with(quote) {
        return None;
    }
    let body = &text[1..text.len() - 1];
    let mut unescaped = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => unescaped.push(escaped),
                None => return None,
            }
        } else if c == quote {
            // An unescaped closing quote mid-string is not one literal.
            return None;
        } else {
            unescaped.push(c);
        }
    }
    Some(unescaped)
}

/// A bare number with a recognized unit suffix.
fn parse_dimension(text: &str) -> Option<Dimension> {
    if text.contains(char::is_whitespace) {
        return None;
    }
    let split = text
        .char_indices()
        .find(|&(_, c)| !c.is_ascii_digit() && !matches!(c, '.' | '-' | '+'))
        .map_or(text.len(), |(i, _)| i);
    let (number, suffix) = text.split_at(split);
    let unit = DimensionUnit::from_suffix(suffix)?;
    let value = number.parse().ok()?;
    Some(Dimension::new(value, unit))
}

/// Write the sheet as USS rule text.
pub fn write_uss(sheet: &StyleSheet) -> String {
    let mut out = String::new();
    for (i, rule) in sheet.rules.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} {{", rule.selector);
        for declaration in &rule.declarations {
            let _ = writeln!(out, "  {}: {};", declaration.property, declaration.value);
        }
        let _ = writeln!(out, "}}");
    }
    out
}

/// Parse USS rule text back into the model. `/* ... */` comments are
/// tolerated and ignored.
pub fn parse_uss(text: &str) -> (StyleSheet, Vec<Warning>) {
    let source = strip_comments(text);
    let mut sheet = StyleSheet::new();
    let mut warnings = Vec::new();
    let mut rest = source.as_str();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let Some(open) = find_unquoted(rest, '{') else {
            record_warning(&mut warnings, Warning::MalformedStyleRule {
                selector: snippet(rest),
                reason: "expected `{`".to_owned(),
            });
            break;
        };
        let selector = rest[..open].trim().to_owned();
        let after = &rest[open + 1..];
        let close = find_unquoted(after, '}');
        let nested = find_unquoted(after, '{');
        let body = match (close, nested) {
            (Some(close), nested) if nested.is_none_or(|n| close < n) => {
                let body = &after[..close];
                rest = &after[close + 1..];
                body
            }
            (Some(close), None) => {
                let body = &after[..close];
                rest = &after[close + 1..];
                body
            }
            (_, Some(nested)) => {
                // The block never closed; what follows the stray open
                // brace belongs to the next rule. Resume at its selector.
                record_warning(&mut warnings, Warning::MalformedStyleRule {
                    selector,
                    reason: "unterminated block".to_owned(),
                });
                let resume = after[..nested].rfind(['\n', ';']).map_or(0, |i| i + 1);
                rest = &after[resume..];
                continue;
            }
            (None, None) => {
                record_warning(&mut warnings, Warning::MalformedStyleRule {
                    selector,
                    reason: "unterminated block".to_owned(),
                });
                break;
            }
        };

        if selector.is_empty() {
            record_warning(&mut warnings, Warning::MalformedStyleRule {
                selector,
                reason: "missing selector".to_owned(),
            });
            continue;
        }

        let mut rule = StyleRule { selector: selector.clone(), declarations: Vec::new() };
        for piece in split_declarations(body) {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            match piece.split_once(':') {
                Some((property, value)) if !property.trim().is_empty() => {
                    rule.declarations
                        .push(Declaration::new(property.trim(), classify(value)));
                }
                _ => record_warning(&mut warnings, Warning::MalformedStyleRule {
                    selector: selector.clone(),
                    reason: format!("bad declaration `{}`", snippet(piece)),
                }),
            }
        }
        sheet.rules.push(rule);
    }

    (sheet, warnings)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the first occurrence outside quoted literals.
fn find_unquoted(text: &str, needle: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => {
                if c == needle {
                    return Some(i);
                }
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
            }
        }
    }
    None
}

/// Split a rule body on `;`, keeping quoted literals intact.
fn split_declarations(body: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = body;
    while let Some(i) = find_unquoted(rest, ';') {
        pieces.push(&rest[..i]);
        rest = &rest[i + 1..];
    }
    pieces.push(rest);
    pieces
}

fn snippet(text: &str) -> String {
    text.trim().chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_color() {
        assert_eq!(classify("#FF00FF"), StyleValue::Color("#ff00ff".into()));
        assert_eq!(classify("#abc"), StyleValue::Color("#abc".into()));
        assert!(matches!(classify("#ff00f"), StyleValue::Tokens(_)));
        assert!(matches!(classify("#ggg"), StyleValue::Tokens(_)));
    }

    #[test]
    fn test_classify_var_ref() {
        assert_eq!(classify("var(--accent)"), StyleValue::VarRef("accent".into()));
        assert_eq!(classify("var( --accent )"), StyleValue::VarRef("accent".into()));
        // A fallback clause is out of model; keep it raw.
        assert!(matches!(classify("var(--accent, #fff)"), StyleValue::Tokens(_)));
    }

    #[test]
    fn test_classify_asset_ref() {
        assert_eq!(
            classify("url(ui/icons/star.png)"),
            StyleValue::AssetRef("ui/icons/star.png".into())
        );
        assert_eq!(
            classify("url(\"ui/icons/star.png\")"),
            StyleValue::AssetRef("ui/icons/star.png".into())
        );
    }

    #[test]
    fn test_classify_dimension() {
        assert_eq!(
            classify("12px"),
            StyleValue::Dimension(Dimension::new(12.0, DimensionUnit::Px))
        );
        assert_eq!(
            classify("-3.5%"),
            StyleValue::Dimension(Dimension::new(-3.5, DimensionUnit::Percent))
        );
        assert_eq!(
            classify("2"),
            StyleValue::Dimension(Dimension::new(2.0, DimensionUnit::Unitless))
        );
        assert!(matches!(classify("12pt"), StyleValue::Tokens(_)));
    }

    #[test]
    fn test_classify_quoted_and_tokens() {
        assert_eq!(classify("\"Main Title\""), StyleValue::Str("Main Title".into()));
        assert_eq!(
            classify("1px solid red"),
            StyleValue::Tokens(vec!["1px".into(), "solid".into(), "red".into()])
        );
    }

    #[test]
    fn test_classify_round_trips_through_display() {
        for text in ["#ff00ff", "var(--accent)", "url(a/b.png)", "12px", "\"x y\""] {
            let value = classify(text);
            assert_eq!(classify(&value.to_string()), value, "{text}");
        }
    }
}
