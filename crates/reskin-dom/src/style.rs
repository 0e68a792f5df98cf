//! Style-sheet model
//!
//! Structured form of the embedded style-rule table. Rule and
//! declaration order carry meaning (later declarations of a property
//! override earlier ones at apply time) and are never reordered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered set of style rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule with the given selector.
    pub fn rule(&self, selector: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.selector == selector)
    }
}

/// One selector block with its declarations, in written order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// `property: value`, with the property name preserved verbatim even
/// when unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: StyleValue,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: StyleValue) -> Self {
        Self { property: property.into(), value }
    }
}

/// Closed set of value shapes the codec models. Anything else stays a
/// raw token list so an edit-and-reimport cycle cannot reinterpret it.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// Strict hex literal, lowercase `#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`.
    Color(String),
    /// Numeric literal with its unit.
    Dimension(Dimension),
    /// Quoted string literal.
    Str(String),
    /// `var(--name)` reference, stored as the bare name.
    VarRef(String),
    /// `url(...)` asset-path reference.
    AssetRef(String),
    /// Whitespace-separated tokens kept as written.
    Tokens(Vec<String>),
}

impl fmt::Display for StyleValue {
    /// Canonical text form, as embedded in rendered markup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(hex) => f.write_str(hex),
            Self::Dimension(dimension) => write!(f, "{dimension}"),
            Self::Str(s) => {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "\"{escaped}\"")
            }
            Self::VarRef(name) => write!(f, "var(--{name})"),
            Self::AssetRef(path) => write!(f, "url({path})"),
            Self::Tokens(tokens) => f.write_str(&tokens.join(" ")),
        }
    }
}

/// A numeric style value with its encoded unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.fract() == 0.0 && self.value.abs() < 1e9 {
            write!(f, "{}{}", self.value as i64, self.unit.suffix())
        } else {
            write!(f, "{}{}", self.value, self.unit.suffix())
        }
    }
}

/// Unit codes the container encodes on numeric values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionUnit {
    #[default]
    Unitless,
    Px,
    Percent,
}

impl DimensionUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Unitless => "",
            Self::Px => "px",
            Self::Percent => "%",
        }
    }

    /// Recognize a unit suffix. The empty string is a unitless number.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Self::Unitless),
            "px" => Some(Self::Px),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::new(12.0, DimensionUnit::Px).to_string(), "12px");
        assert_eq!(Dimension::new(50.0, DimensionUnit::Percent).to_string(), "50%");
        assert_eq!(Dimension::new(1.5, DimensionUnit::Unitless).to_string(), "1.5");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(StyleValue::Color("#ff00ff".into()).to_string(), "#ff00ff");
        assert_eq!(StyleValue::VarRef("accent".into()).to_string(), "var(--accent)");
        assert_eq!(
            StyleValue::AssetRef("ui/icons/star.png".into()).to_string(),
            "url(ui/icons/star.png)"
        );
        assert_eq!(StyleValue::Str("Bold \"title\"".into()).to_string(), "\"Bold \\\"title\\\"\"");
        assert_eq!(
            StyleValue::Tokens(vec!["1px".into(), "solid".into()]).to_string(),
            "1px solid"
        );
    }

    #[test]
    fn test_rule_lookup() {
        let mut sheet = StyleSheet::new();
        sheet.rules.push(StyleRule { selector: ".panel".into(), declarations: Vec::new() });
        assert!(sheet.rule(".panel").is_some());
        assert!(sheet.rule(".missing").is_none());
    }
}
