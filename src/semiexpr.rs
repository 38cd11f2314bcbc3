//! Component B: semi-expression collector. Groups a token stream into
//! maximal units terminated by `;`, `{`, `}`, or a preprocessor directive.
//! Spec §4.B.

use std::collections::VecDeque;

use crate::token::Token;

/// An ordered run of tokens terminated by `;`, `{`, `}`, or a preprocessor
/// directive, carrying the line of its first token (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemiExpression {
    pub tokens: Vec<Token>,
    pub start_line: u32,
}

impl SemiExpression {
    /// True if the last token is `{`.
    pub fn opens_scope(&self) -> bool {
        self.tokens.last().is_some_and(|t| t.lexeme == "{")
    }

    /// True if this is the standalone `}` unit that closes a scope.
    pub fn closes_scope(&self) -> bool {
        self.tokens.len() == 1 && self.tokens[0].lexeme == "}"
    }

    pub fn is_preprocessor(&self) -> bool {
        self.tokens.len() == 1 && self.tokens[0].is_preprocessor()
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.tokens.iter().any(|t| t.lexeme == lexeme)
    }

    /// Index of the first token with the given lexeme, if any.
    pub fn find(&self, lexeme: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.lexeme == lexeme)
    }
}

/// Pulls tokens from an inner iterator and groups them into
/// `SemiExpression`s. Exposes `has_more`/`next` per spec §4.B rather than
/// `Iterator`, to keep the pull-based shape the spec names explicit.
pub struct SemiExpressionCollector<I: Iterator<Item = Token>> {
    tokens: I,
    buf: Vec<Token>,
    start_line: Option<u32>,
    paren_depth: i32,
    /// A token already pulled from `tokens` but not yet placed into any
    /// semi-expression — used to hold back a `}` or preprocessor token
    /// that must be delivered on its own, *after* the in-progress buffer
    /// is flushed.
    stash: Option<Token>,
    queue: VecDeque<SemiExpression>,
}

impl<I: Iterator<Item = Token>> SemiExpressionCollector<I> {
    pub fn new(tokens: I) -> Self {
        SemiExpressionCollector {
            tokens,
            buf: Vec::new(),
            start_line: None,
            paren_depth: 0,
            stash: None,
            queue: VecDeque::new(),
        }
    }

    pub fn has_more(&mut self) -> bool {
        self.advance_until_ready();
        !self.queue.is_empty()
    }

    pub fn next(&mut self) -> Option<SemiExpression> {
        self.advance_until_ready();
        self.queue.pop_front()
    }

    fn pull(&mut self) -> Option<Token> {
        self.stash.take().or_else(|| self.tokens.next())
    }

    fn advance_until_ready(&mut self) {
        if !self.queue.is_empty() {
            return;
        }
        loop {
            let tok = match self.pull() {
                Some(t) => t,
                None => {
                    self.flush_buf();
                    return;
                }
            };

            if tok.is_preprocessor() {
                if self.buf.is_empty() {
                    self.queue.push_back(SemiExpression { start_line: tok.line, tokens: vec![tok] });
                } else {
                    self.stash = Some(tok);
                    self.flush_buf();
                }
                return;
            }

            if tok.lexeme == "}" {
                if self.buf.is_empty() {
                    self.queue.push_back(SemiExpression { start_line: tok.line, tokens: vec![tok] });
                } else {
                    self.stash = Some(tok);
                    self.flush_buf();
                }
                return;
            }

            match tok.lexeme.as_str() {
                "(" => self.paren_depth += 1,
                ")" => self.paren_depth -= 1,
                _ => {}
            }

            if self.start_line.is_none() {
                self.start_line = Some(tok.line);
            }
            let is_open = tok.lexeme == "{";
            let is_terminator_semi = tok.lexeme == ";" && self.paren_depth <= 0;
            self.buf.push(tok);

            if is_open || is_terminator_semi {
                self.flush_buf();
                return;
            }
        }
    }

    fn flush_buf(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let start_line = self.start_line.take().unwrap_or(1);
        let tokens = std::mem::take(&mut self.buf);
        self.paren_depth = 0;
        self.queue.push_back(SemiExpression { tokens, start_line });
    }
}

#[cfg(test)]
#[path = "semiexpr_tests.rs"]
mod tests;
