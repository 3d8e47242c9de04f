use std::fmt;

use anyhow::{bail, Result};

use crate::css::token::{tokenize_css, CssToken};

/// https://www.w3.org/TR/css-syntax-3/#component-value
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentValue {
    PreservedToken(CssToken),
    Function {
        name: String,
        values: Vec<ComponentValue>,
    },
    SimpleBlock {
        opening: CssToken,
        values: Vec<ComponentValue>,
    },
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ComponentValue::PreservedToken(token) => write!(f, "{}", token),
            ComponentValue::Function { name, values } => {
                write!(f, "{}({})", name, serialize_values(values))
            }
            ComponentValue::SimpleBlock { opening, values } => {
                let closing = match opening {
                    CssToken::OpenParenthesis => ')',
                    CssToken::OpenSquareBracket => ']',
                    _ => '}',
                };
                write!(f, "{}{}{}", opening, serialize_values(values), closing)
            }
        }
    }
}

/// Serializes component values, collapsing whitespace runs and trimming both ends.
pub fn serialize_values(values: &[ComponentValue]) -> String {
    let mut out = String::new();
    for value in trim_whitespace(values) {
        out.push_str(&value.to_string());
    }
    out
}

/// Drops leading and trailing whitespace tokens.
pub fn trim_whitespace(values: &[ComponentValue]) -> &[ComponentValue] {
    let is_ws = |v: &ComponentValue| *v == ComponentValue::PreservedToken(CssToken::Whitespace);
    let start = values.iter().position(|v| !is_ws(v)).unwrap_or(values.len());
    let end = values.iter().rposition(|v| !is_ws(v)).map_or(start, |i| i + 1);
    &values[start..end]
}

/// How unbalanced blocks are handled while consuming component values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Unclosed blocks and stray closing tokens are errors.
    Strict,
    /// The end of input closes every open block and a stray closing token is preserved.
    /// https://www.w3.org/TR/css-syntax-3/#consume-simple-block
    Lenient,
}

/// Parses a declaration value such as `-webkit-linear-gradient(red, blue)`.
pub fn parse_value(value: &str) -> Result<Vec<ComponentValue>> {
    let tokens = tokenize_css(value)?;
    let mut iter = tokens.into_iter();
    let values = consume_component_values(&mut iter, None, Recovery::Strict)?;
    Ok(trim_whitespace(&values).to_vec())
}

/// Consumes component values until `closing` (or the end of input when `None`).
pub fn consume_component_values<I>(
    tokens: &mut I,
    closing: Option<&CssToken>,
    recovery: Recovery,
) -> Result<Vec<ComponentValue>>
where
    I: Iterator<Item = CssToken>,
{
    let mut values = Vec::new();
    loop {
        let Some(token) = tokens.next() else {
            match (closing, recovery) {
                (Some(closing), Recovery::Strict) => {
                    bail!("expected {} but reached the end of input", closing)
                }
                _ => return Ok(values),
            }
        };
        if Some(&token) == closing {
            return Ok(values);
        }
        values.push(consume_component_value(token, tokens, recovery)?);
    }
}

/// https://www.w3.org/TR/css-syntax-3/#consume-component-value
pub fn consume_component_value<I>(
    token: CssToken,
    tokens: &mut I,
    recovery: Recovery,
) -> Result<ComponentValue>
where
    I: Iterator<Item = CssToken>,
{
    Ok(match token {
        CssToken::Function(name) => ComponentValue::Function {
            name,
            values: consume_component_values(tokens, Some(&CssToken::CloseParenthesis), recovery)?,
        },
        CssToken::OpenParenthesis => ComponentValue::SimpleBlock {
            opening: CssToken::OpenParenthesis,
            values: consume_component_values(tokens, Some(&CssToken::CloseParenthesis), recovery)?,
        },
        CssToken::OpenSquareBracket => ComponentValue::SimpleBlock {
            opening: CssToken::OpenSquareBracket,
            values: consume_component_values(
                tokens,
                Some(&CssToken::CloseSquareBracket),
                recovery,
            )?,
        },
        CssToken::OpenCurlyBrace => ComponentValue::SimpleBlock {
            opening: CssToken::OpenCurlyBrace,
            values: consume_component_values(tokens, Some(&CssToken::CloseCurlyBrace), recovery)?,
        },
        CssToken::CloseParenthesis | CssToken::CloseSquareBracket | CssToken::CloseCurlyBrace
            if recovery == Recovery::Strict =>
        {
            bail!("unbalanced {}", token)
        }
        token => ComponentValue::PreservedToken(token),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_function() {
        let values = parse_value(" rotate( 45deg ) ").unwrap();
        assert_eq!(
            values,
            vec![ComponentValue::Function {
                name: "rotate".to_string(),
                values: vec![
                    ComponentValue::PreservedToken(CssToken::Whitespace),
                    ComponentValue::PreservedToken(CssToken::Dimension(45.0, "deg".to_string())),
                    ComponentValue::PreservedToken(CssToken::Whitespace),
                ],
            }]
        );
        assert_eq!(serialize_values(&values), "rotate(45deg)");
    }

    #[test]
    fn serialize_collapses_whitespace() {
        let values = parse_value("1px   solid\n red").unwrap();
        assert_eq!(serialize_values(&values), "1px solid red");
    }

    #[test]
    fn nested_functions() {
        let values = parse_value("-webkit-linear-gradient(top, rgb(0,0,0), red)").unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(
            serialize_values(&values),
            "-webkit-linear-gradient(top, rgb(0,0,0), red)"
        );
    }

    #[test]
    #[should_panic]
    fn unbalanced_function() {
        parse_value("rotate(45deg").unwrap();
    }

    #[test]
    #[should_panic]
    fn stray_closing_parenthesis() {
        parse_value("45deg)").unwrap();
    }

    #[test]
    fn lenient_recovery() {
        let closing = Some(&CssToken::CloseCurlyBrace);
        let mut tokens = tokenize_css("color: rgb(0, 0, 0").unwrap().into_iter();
        let values = consume_component_values(&mut tokens, closing, Recovery::Lenient).unwrap();
        assert_eq!(serialize_values(&values), "color: rgb(0, 0, 0)");

        let mut tokens = tokenize_css("10px) }").unwrap().into_iter();
        let values = consume_component_values(&mut tokens, closing, Recovery::Lenient).unwrap();
        assert_eq!(
            values,
            vec![
                ComponentValue::PreservedToken(CssToken::Dimension(10.0, "px".to_string())),
                ComponentValue::PreservedToken(CssToken::CloseParenthesis),
                ComponentValue::PreservedToken(CssToken::Whitespace),
            ]
        );
        assert_eq!(tokens.next(), None);
    }
}
