use serde::Deserialize;

use crate::css::{parse_color, parse_value, serialize_values, ComponentValue, CssToken};

/// Keywords every property accepts.
/// https://www.w3.org/TR/css-values-4/#common-keywords
const CSS_WIDE_KEYWORDS: [&str; 4] = ["inherit", "initial", "unset", "revert"];

/// https://www.w3.org/TR/css-values-3/#lengths
const LENGTH_UNITS: [&str; 15] = [
    "em", "ex", "ch", "rem", "vw", "vh", "vmin", "vmax", "cm", "mm", "q", "in", "pt", "pc", "px",
];

/// Value types a profile can allow for a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Color,
    Length,
    Percentage,
    Number,
    /// Any value that tokenizes cleanly.
    Any,
}

/// What one property accepts in one environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueGrammar {
    keywords: Vec<String>,
    functions: Vec<String>,
    types: Vec<ValueType>,
}

impl ValueGrammar {
    pub fn new(keywords: &[String], functions: &[String], types: &[ValueType]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_ascii_lowercase()).collect(),
            functions: functions.iter().map(|f| f.to_ascii_lowercase()).collect(),
            types: types.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.functions.is_empty() && self.types.is_empty()
    }

    /// Returns the value as the environment would store it, or `None` if rejected.
    pub fn accept(&self, value: &str) -> Option<String> {
        let values = parse_value(value).ok()?;
        let components = values
            .iter()
            .filter(|v| **v != ComponentValue::PreservedToken(CssToken::Whitespace))
            .collect::<Vec<_>>();

        match components.as_slice() {
            [] => None,
            [single] => self.accept_component(single),
            multiple => {
                if self.types.contains(&ValueType::Any) {
                    Some(serialize_values(&values))
                } else if multiple.iter().all(|v| self.is_allowed_function(v)) {
                    // Space-separated function lists, e.g. transforms.
                    Some(serialize_values(&values))
                } else {
                    None
                }
            }
        }
    }

    fn accept_component(&self, value: &ComponentValue) -> Option<String> {
        if let ComponentValue::PreservedToken(CssToken::Ident(ident)) = value {
            let lower = ident.to_ascii_lowercase();
            if CSS_WIDE_KEYWORDS.contains(&lower.as_str()) || self.keywords.contains(&lower) {
                return Some(lower);
            }
        }
        if self.is_allowed_function(value) {
            return Some(value.to_string());
        }
        self.types
            .iter()
            .find_map(|value_type| accept_type(*value_type, value))
    }

    fn is_allowed_function(&self, value: &ComponentValue) -> bool {
        matches!(value, ComponentValue::Function { name, .. }
            if self.functions.contains(&name.to_ascii_lowercase()))
    }
}

fn accept_type(value_type: ValueType, value: &ComponentValue) -> Option<String> {
    match (value_type, value) {
        (ValueType::Color, _) => parse_color(value).ok().map(|c| c.to_string()),
        (ValueType::Length, ComponentValue::PreservedToken(CssToken::Dimension(n, unit))) => {
            let unit = unit.to_ascii_lowercase();
            LENGTH_UNITS
                .contains(&unit.as_str())
                .then(|| format!("{}{}", n, unit))
        }
        // Unitless zero is a valid length and reads back in pixels.
        (ValueType::Length, ComponentValue::PreservedToken(CssToken::Number(n))) if *n == 0.0 => {
            Some("0px".to_string())
        }
        (ValueType::Percentage, ComponentValue::PreservedToken(CssToken::Percentage(n))) => {
            Some(format!("{}%", n))
        }
        (ValueType::Number, ComponentValue::PreservedToken(CssToken::Number(n))) => {
            Some(n.to_string())
        }
        (ValueType::Any, _) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let grammar = ValueGrammar::new(&strings(&["block", "-webkit-box"]), &[], &[]);
        assert_eq!(grammar.accept("BLOCK"), Some("block".to_string()));
        assert_eq!(grammar.accept(" -webkit-box "), Some("-webkit-box".to_string()));
        assert_eq!(grammar.accept("-moz-box"), None);
        assert_eq!(grammar.accept(""), None);
    }

    #[test]
    fn css_wide_keywords() {
        let grammar = ValueGrammar::new(&strings(&["none"]), &[], &[]);
        assert_eq!(grammar.accept("Inherit"), Some("inherit".to_string()));
    }

    #[test]
    fn functions() {
        let grammar = ValueGrammar::new(&[], &strings(&["rotate", "scale"]), &[]);
        assert_eq!(grammar.accept("rotate( 45deg )"), Some("rotate(45deg)".to_string()));
        assert_eq!(
            grammar.accept("rotate(45deg)  scale(2)"),
            Some("rotate(45deg) scale(2)".to_string())
        );
        assert_eq!(grammar.accept("skew(10deg)"), None);
        assert_eq!(grammar.accept("rotate(45deg) none"), None);
    }

    #[test]
    fn typed_values() {
        let grammar = ValueGrammar::new(
            &strings(&["auto"]),
            &[],
            &[ValueType::Length, ValueType::Percentage],
        );
        assert_eq!(grammar.accept("10PX"), Some("10px".to_string()));
        assert_eq!(grammar.accept("0"), Some("0px".to_string()));
        assert_eq!(grammar.accept("50%"), Some("50%".to_string()));
        assert_eq!(grammar.accept("auto"), Some("auto".to_string()));
        assert_eq!(grammar.accept("10deg"), None);
        assert_eq!(grammar.accept("3"), None);

        let grammar = ValueGrammar::new(&[], &[], &[ValueType::Color, ValueType::Number]);
        assert_eq!(grammar.accept("red"), Some("rgb(255, 0, 0)".to_string()));
        assert_eq!(grammar.accept("0.5"), Some("0.5".to_string()));
        assert_eq!(grammar.accept("nocolor"), None);
    }

    #[test]
    fn any_value() {
        let grammar = ValueGrammar::new(&[], &[], &[ValueType::Any]);
        assert_eq!(
            grammar.accept("opacity   1s  ease-in"),
            Some("opacity 1s ease-in".to_string())
        );
        assert_eq!(grammar.accept("rotate(45deg"), None);
    }

    #[test]
    fn empty_grammar() {
        assert!(ValueGrammar::default().is_empty());
        assert!(!ValueGrammar::new(&[], &[], &[ValueType::Any]).is_empty());
    }
}
