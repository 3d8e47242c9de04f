use std::fmt;

use anyhow::{ensure, Result};

use crate::utils::TokenIterator;

/// https://www.w3.org/TR/css-syntax-3/#tokenization
#[derive(Clone, Debug, PartialEq)]
pub enum CssToken {
    Ident(String),
    Function(String),
    AtKeyword(String),
    Hash(String),
    String(String),
    BadString,
    Delim(char),
    Number(f32),
    Percentage(f32),
    Dimension(f32, String),
    Whitespace,
    Colon,
    Semicolon,
    Comma,
    OpenSquareBracket,
    CloseSquareBracket,
    OpenParenthesis,
    CloseParenthesis,
    OpenCurlyBrace,
    CloseCurlyBrace,
}

impl fmt::Display for CssToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CssToken::Ident(v) => write!(f, "{}", v),
            CssToken::Function(name) => write!(f, "{}(", name),
            CssToken::AtKeyword(v) => write!(f, "@{}", v),
            CssToken::Hash(v) => write!(f, "#{}", v),
            CssToken::String(v) => write!(f, "\"{}\"", v),
            CssToken::BadString => write!(f, "\""),
            CssToken::Delim(c) => write!(f, "{}", c),
            CssToken::Number(n) => write!(f, "{}", n),
            CssToken::Percentage(n) => write!(f, "{}%", n),
            CssToken::Dimension(n, unit) => write!(f, "{}{}", n, unit),
            CssToken::Whitespace => write!(f, " "),
            CssToken::Colon => write!(f, ":"),
            CssToken::Semicolon => write!(f, ";"),
            CssToken::Comma => write!(f, ","),
            CssToken::OpenSquareBracket => write!(f, "["),
            CssToken::CloseSquareBracket => write!(f, "]"),
            CssToken::OpenParenthesis => write!(f, "("),
            CssToken::CloseParenthesis => write!(f, ")"),
            CssToken::OpenCurlyBrace => write!(f, "{{"),
            CssToken::CloseCurlyBrace => write!(f, "}}"),
        }
    }
}

/// Tokenizes a stylesheet or a single declaration value. The end of input is not a token.
pub fn tokenize_css(css: &str) -> Result<Vec<CssToken>> {
    let mut chars = TokenIterator::new(&css.chars().collect::<Vec<char>>());
    let mut tokens = Vec::new();
    while let Some(token) = consume_token(&mut chars)? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// https://www.w3.org/TR/css-syntax-3/#consume-token
fn consume_token(chars: &mut TokenIterator<char>) -> Result<Option<CssToken>> {
    consume_comments(chars)?;
    let Some(c) = chars.next() else {
        return Ok(None);
    };
    let token = match c {
        c if is_whitespace(c) => {
            while chars.peek().is_some_and(|c| is_whitespace(*c)) {
                chars.next();
            }
            CssToken::Whitespace
        }
        '"' | '\'' => consume_string_token(chars, c),
        '#' => {
            if chars.peek().is_some_and(|c| is_ident_char(*c)) {
                CssToken::Hash(consume_ident_sequence(chars))
            } else {
                CssToken::Delim(c)
            }
        }
        '(' => CssToken::OpenParenthesis,
        ')' => CssToken::CloseParenthesis,
        '[' => CssToken::OpenSquareBracket,
        ']' => CssToken::CloseSquareBracket,
        '{' => CssToken::OpenCurlyBrace,
        '}' => CssToken::CloseCurlyBrace,
        ',' => CssToken::Comma,
        ':' => CssToken::Colon,
        ';' => CssToken::Semicolon,
        '+' | '.' => {
            chars.rewind(1);
            if starts_number(&chars.peek_chunk(3)) {
                consume_numeric_token(chars)
            } else {
                chars.next();
                CssToken::Delim(c)
            }
        }
        '-' => {
            chars.rewind(1);
            if starts_number(&chars.peek_chunk(3)) {
                consume_numeric_token(chars)
            } else if starts_ident(&chars.peek_chunk(2)) {
                consume_ident_like_token(chars)
            } else {
                chars.next();
                CssToken::Delim(c)
            }
        }
        '@' => {
            if starts_ident(&chars.peek_chunk(2)) {
                CssToken::AtKeyword(consume_ident_sequence(chars))
            } else {
                CssToken::Delim(c)
            }
        }
        '0'..='9' => {
            chars.rewind(1);
            consume_numeric_token(chars)
        }
        c if is_ident_start_char(c) => {
            chars.rewind(1);
            consume_ident_like_token(chars)
        }
        _ => CssToken::Delim(c),
    };
    Ok(Some(token))
}

/// https://www.w3.org/TR/css-syntax-3/#consume-comment
fn consume_comments(chars: &mut TokenIterator<char>) -> Result<()> {
    while chars.peek_chunk(2) == [Some(&'/'), Some(&'*')] {
        chars.next();
        chars.next();
        let mut closed = false;
        let mut consumed_asterisk = false;
        while let Some(c) = chars.next() {
            match c {
                '*' => consumed_asterisk = true,
                '/' if consumed_asterisk => {
                    closed = true;
                    break;
                }
                _ => consumed_asterisk = false,
            }
        }
        ensure!(closed, "unterminated comment at end of input");
    }
    Ok(())
}

/// https://www.w3.org/TR/css-syntax-3/#consume-string-token
fn consume_string_token(chars: &mut TokenIterator<char>, ending: char) -> CssToken {
    let mut string = String::new();
    loop {
        match chars.next() {
            Some(c) if c == ending => return CssToken::String(string),
            Some('\n') => {
                chars.rewind(1);
                return CssToken::BadString;
            }
            Some('\\') => match chars.next() {
                Some('\n') | None => {}
                Some(escaped) => string.push(escaped),
            },
            Some(c) => string.push(c),
            // EOF closes the string.
            None => return CssToken::String(string),
        }
    }
}

/// https://www.w3.org/TR/css-syntax-3/#consume-numeric-token
fn consume_numeric_token(chars: &mut TokenIterator<char>) -> CssToken {
    let number = consume_number(chars);
    if starts_ident(&chars.peek_chunk(2)) {
        CssToken::Dimension(number, consume_ident_sequence(chars))
    } else if chars.peek() == Some(&'%') {
        chars.next();
        CssToken::Percentage(number)
    } else {
        CssToken::Number(number)
    }
}

/// https://www.w3.org/TR/css-syntax-3/#consume-number
fn consume_number(chars: &mut TokenIterator<char>) -> f32 {
    let mut repr = String::new();
    if let Some(sign @ ('+' | '-')) = chars.peek().copied() {
        chars.next();
        repr.push(sign);
    }
    consume_digits(chars, &mut repr);
    if let [Some('.'), Some('0'..='9')] = chars.peek_chunk(2)[..] {
        repr.push('.');
        chars.next();
        consume_digits(chars, &mut repr);
    }
    if let [Some('e' | 'E'), Some('0'..='9')] = chars.peek_chunk(2)[..] {
        repr.push('e');
        chars.next();
        consume_digits(chars, &mut repr);
    } else if let [Some('e' | 'E'), Some(sign @ ('+' | '-')), Some('0'..='9')] =
        chars.peek_chunk(3)[..]
    {
        repr.push('e');
        repr.push(*sign);
        chars.next();
        chars.next();
        consume_digits(chars, &mut repr);
    }
    // The grammar above only admits well-formed numbers.
    repr.parse().unwrap_or_default()
}

fn consume_digits(chars: &mut TokenIterator<char>, repr: &mut String) {
    while let Some(d @ '0'..='9') = chars.peek().copied() {
        chars.next();
        repr.push(d);
    }
}

/// https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token
fn consume_ident_like_token(chars: &mut TokenIterator<char>) -> CssToken {
    let name = consume_ident_sequence(chars);
    if chars.peek() == Some(&'(') {
        chars.next();
        CssToken::Function(name)
    } else {
        CssToken::Ident(name)
    }
}

/// https://www.w3.org/TR/css-syntax-3/#consume-name
fn consume_ident_sequence(chars: &mut TokenIterator<char>) -> String {
    let mut name = String::new();
    while let Some(c) = chars.peek().copied() {
        if is_ident_char(c) {
            chars.next();
            name.push(c);
        } else if c == '\\' && chars.peek_chunk(2)[1].is_some_and(|n| *n != '\n') {
            chars.next();
            if let Some(escaped) = chars.next() {
                name.push(escaped);
            }
        } else {
            break;
        }
    }
    name
}

/// https://www.w3.org/TR/css-syntax-3/#ident-start-code-point
fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c >= '\u{0080}' || c == '_'
}

/// https://www.w3.org/TR/css-syntax-3/#ident-code-point
fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// https://w3.org/TR/css-syntax-3/#whitespace
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\u{000C}')
}

/// Checks whether the next code points would start an ident sequence.
/// https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier
fn starts_ident(chars: &[Option<&char>]) -> bool {
    match chars {
        [Some('-'), Some(c), ..] => **c == '-' || is_ident_start_char(**c),
        [Some(c), ..] => is_ident_start_char(**c),
        _ => false,
    }
}

/// https://www.w3.org/TR/css-syntax-3/#starts-with-a-number
fn starts_number(chars: &[Option<&char>]) -> bool {
    matches!(
        chars,
        [Some('0'..='9'), ..]
            | [Some('+' | '-' | '.'), Some('0'..='9'), ..]
            | [Some('+' | '-'), Some('.'), Some('0'..='9')]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_only() {
        assert_eq!(tokenize_css("/* a */").unwrap(), vec![]);
        assert_eq!(tokenize_css("/* a *//* b */").unwrap(), vec![]);
    }

    #[test]
    #[should_panic]
    fn unterminated_comment() {
        tokenize_css("/* hello").unwrap();
    }

    #[test]
    fn prefixed_idents() {
        assert_eq!(
            tokenize_css("-webkit-flex").unwrap(),
            vec![CssToken::Ident("-webkit-flex".to_string())]
        );
        assert_eq!(
            tokenize_css("-o-linear-gradient(red, blue)").unwrap(),
            vec![
                CssToken::Function("-o-linear-gradient".to_string()),
                CssToken::Ident("red".to_string()),
                CssToken::Comma,
                CssToken::Whitespace,
                CssToken::Ident("blue".to_string()),
                CssToken::CloseParenthesis,
            ]
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(
            tokenize_css("12 -3.5px 50% .5 1e2").unwrap(),
            vec![
                CssToken::Number(12.0),
                CssToken::Whitespace,
                CssToken::Dimension(-3.5, "px".to_string()),
                CssToken::Whitespace,
                CssToken::Percentage(50.0),
                CssToken::Whitespace,
                CssToken::Number(0.5),
                CssToken::Whitespace,
                CssToken::Number(100.0),
            ]
        );
    }

    #[test]
    fn minus_alone_is_delim() {
        assert_eq!(
            tokenize_css("- 1").unwrap(),
            vec![
                CssToken::Delim('-'),
                CssToken::Whitespace,
                CssToken::Number(1.0)
            ]
        );
    }

    #[test]
    fn hash_and_strings() {
        assert_eq!(
            tokenize_css("#375e97 'a b' \"c").unwrap(),
            vec![
                CssToken::Hash("375e97".to_string()),
                CssToken::Whitespace,
                CssToken::String("a b".to_string()),
                CssToken::Whitespace,
                CssToken::String("c".to_string()),
            ]
        );
    }

    #[test]
    fn simple_rule() {
        let css = r#"h1 {
            user-select: none;
            display: -webkit-box;
          }"#;
        assert_eq!(
            tokenize_css(css).unwrap(),
            vec![
                CssToken::Ident("h1".to_string()),
                CssToken::Whitespace,
                CssToken::OpenCurlyBrace,
                CssToken::Whitespace,
                CssToken::Ident("user-select".to_string()),
                CssToken::Colon,
                CssToken::Whitespace,
                CssToken::Ident("none".to_string()),
                CssToken::Semicolon,
                CssToken::Whitespace,
                CssToken::Ident("display".to_string()),
                CssToken::Colon,
                CssToken::Whitespace,
                CssToken::Ident("-webkit-box".to_string()),
                CssToken::Semicolon,
                CssToken::Whitespace,
                CssToken::CloseCurlyBrace,
            ]
        );
    }

    #[test]
    fn at_keyword() {
        assert_eq!(
            tokenize_css("@media").unwrap(),
            vec![CssToken::AtKeyword("media".to_string())]
        );
    }
}
