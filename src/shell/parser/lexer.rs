use std::iter::Peekable;
use std::str::Chars;

use super::ast::MAX_ARGS;

/// Splits a line into words separated by runs of spaces, tabs and newlines.
///
/// There is no quoting or escaping: every other character belongs to a word.
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
        }
    }

    fn read_char(&mut self) -> Option<char> {
        self.input.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_separator(c) {
                break;
            }
            self.read_char();
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();

        while let Some(c) = self.peek_char() {
            if is_separator(c) {
                break;
            }
            word.push(c);
            self.read_char();
        }

        word
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.skip_whitespace();
        self.peek_char()?;
        Some(self.read_word())
    }
}

pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}

/// Tokenizes a whole line, keeping at most `MAX_ARGS - 1` words.
pub fn tokenize(line: &str) -> Vec<String> {
    Lexer::new(line).take(MAX_ARGS - 1).collect()
}
