//! Component A: tokenizer. Converts raw source text into a stream of
//! `Token`s with line numbers. Spec §4.A.

use serde::{Deserialize, Serialize};

/// A lexical token: its raw text and the (1-based) line it started on.
/// No classification beyond what the collector and rule engine need —
/// they work off the lexeme text itself (spec §3: "no type classification
/// beyond what the collector needs").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, line: u32) -> Self {
        Token { lexeme: lexeme.into(), line }
    }

    pub fn is_preprocessor(&self) -> bool {
        self.lexeme.starts_with('#')
    }

    pub fn is_identifier_like(&self) -> bool {
        let mut chars = self.lexeme.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
            _ => false,
        }
    }
}

const MULTI_CHAR_PUNCTUATORS: &[&str] = &[
    "::", "->", "<<", ">>", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "++", "--", "...",
];

/// Converts a source string into a token stream, tracking line numbers as
/// it goes. `current_line` is always the line of the last character
/// consumed (spec §4.A: "monotonically increasing currentLineCount equal
/// to lines fully consumed").
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
}

impl Tokenizer {
    pub fn new(source: &str) -> Self {
        Tokenizer { chars: source.chars().collect(), pos: 0, line: 1 }
    }

    pub fn current_line(&self) -> u32 {
        self.line
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.peek() {
                        if c == '*' && self.peek_at(1) == Some('/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Consume a `"..."` or `'...'` literal, honoring `\`-escapes. If the
    /// literal never closes (malformed source), take the rest of the line
    /// as a best-effort token rather than failing (spec §4.A: "malformed
    /// literals yield a best-effort token and continue").
    fn read_literal(&mut self, quote: char, start_line: u32) -> Token {
        let mut text = String::new();
        text.push(self.advance().unwrap()); // opening quote
        loop {
            match self.peek() {
                None => break,
                Some('\n') => break,
                Some('\\') => {
                    text.push(self.advance().unwrap());
                    if let Some(c) = self.advance() {
                        text.push(c);
                    }
                }
                Some(c) if c == quote => {
                    text.push(self.advance().unwrap());
                    break;
                }
                Some(_) => {
                    text.push(self.advance().unwrap());
                }
            }
        }
        Token::new(text, start_line)
    }

    fn read_preprocessor_directive(&mut self, start_line: u32) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            if c == '\\' && self.peek_at(1) == Some('\n') {
                text.push(self.advance().unwrap());
                text.push(self.advance().unwrap());
                continue;
            }
            text.push(self.advance().unwrap());
        }
        Token::new(text, start_line)
    }

    fn read_number(&mut self, start_line: u32) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '.' || c == '_' {
                text.push(self.advance().unwrap());
            } else {
                break;
            }
        }
        Token::new(text, start_line)
    }

    fn read_identifier(&mut self, start_line: u32) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(self.advance().unwrap());
            } else {
                break;
            }
        }
        Token::new(text, start_line)
    }

    fn read_punctuator(&mut self, start_line: u32) -> Token {
        for candidate in MULTI_CHAR_PUNCTUATORS {
            let len = candidate.chars().count();
            let matches = candidate.chars().enumerate().all(|(i, c)| self.peek_at(i) == Some(c));
            if matches {
                let mut text = String::new();
                for _ in 0..len {
                    text.push(self.advance().unwrap());
                }
                return Token::new(text, start_line);
            }
        }
        Token::new(self.advance().unwrap().to_string(), start_line)
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();
        let start_line = self.line;
        match self.peek()? {
            '#' => Some(self.read_preprocessor_directive(start_line)),
            '"' => Some(self.read_literal('"', start_line)),
            '\'' => Some(self.read_literal('\'', start_line)),
            c if c.is_ascii_digit() => Some(self.read_number(start_line)),
            c if c.is_alphabetic() || c == '_' => Some(self.read_identifier(start_line)),
            _ => Some(self.read_punctuator(start_line)),
        }
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
