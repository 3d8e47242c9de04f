use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use terminal_size::{terminal_size, Width};

use crate::app::VerbosityLevel;

/// A trait for printing reports, truncating long lines to the terminal width unless verbose.
pub trait PrintableReport
where
    Self: fmt::Display,
{
    fn print(&self, verbosity: VerbosityLevel) {
        match verbosity {
            VerbosityLevel::Quiet | VerbosityLevel::Normal => {
                if let Some((Width(w), _)) = terminal_size() {
                    for line in self.to_string().lines() {
                        println!("{}", truncate_line(line, w as usize));
                    }
                } else {
                    println!("{}", self);
                }
            }
            VerbosityLevel::Verbose => println!("{}", self),
        }
    }
}

fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width || width < 3 {
        return line.to_string();
    }
    let mut truncated = line.chars().take(width - 3).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Converts a hyphenated name to the camel case used by style object keys.
/// `user-select` becomes `userSelect`; a leading hyphen uppercases the first letter.
pub fn to_camel_case(name: &str) -> String {
    static HYPHENATED: OnceLock<Regex> = OnceLock::new();
    let re = HYPHENATED.get_or_init(|| Regex::new(r"-(\w)").expect("hard-coded pattern"));
    re.replace_all(name, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Uppercases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Peekable and bidirectional iterator for the tokenizer.
#[derive(Debug)]
pub struct TokenIterator<I>
where
    I: Clone,
{
    buf: VecDeque<I>,
    pos: usize,
}

impl<I> TokenIterator<I>
where
    I: Clone,
{
    pub fn new(arr: &[I]) -> Self {
        Self {
            buf: arr.iter().cloned().collect(),
            pos: 0,
        }
    }

    pub fn peek(&self) -> Option<&I> {
        self.buf.get(self.pos)
    }

    pub fn peek_chunk(&self, size: usize) -> Vec<Option<&I>> {
        (0..size).map(|i| self.buf.get(self.pos + i)).collect()
    }

    pub fn rewind(&mut self, steps: usize) {
        self.pos = self.pos.saturating_sub(steps);
    }
}

impl<I> Iterator for TokenIterator<I>
where
    I: Clone,
{
    type Item = I;

    fn next(&mut self) -> Option<I> {
        let item = self.buf.get(self.pos).cloned();
        self.pos += 1;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("transform"), "transform");
        assert_eq!(to_camel_case("user-select"), "userSelect");
        assert_eq!(to_camel_case("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(to_camel_case("-webkit-transform"), "WebkitTransform");
        assert_eq!(to_camel_case("nonexistentProp"), "nonexistentProp");
    }

    #[test]
    fn capitalize_first_char() {
        assert_eq!(capitalize("userSelect"), "UserSelect");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_line("abcdef", 10), "abcdef");
        assert_eq!(truncate_line("abcdefghij", 6), "abc...");
        assert_eq!(truncate_line("äöüäöü", 5), "äö...");
    }

    #[test]
    fn iterate_and_rewind() {
        let arr = vec![1, 2, 3];
        let mut iter = TokenIterator::new(&arr);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.peek(), Some(&2));
        assert_eq!(iter.peek_chunk(3), vec![Some(&2), Some(&3), None]);
        assert_eq!(iter.next(), Some(2));
        iter.rewind(2);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.peek(), None);
    }
}
