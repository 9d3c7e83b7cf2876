//! Character cursor that keeps document positions up to date.
//!
//! The scanner is [`Copy`], so matchers snapshot it freely and only commit
//! the copy that matched. Offsets are bytes; columns count characters from
//! the start of the line.

use ostw_ir::{DocRange, Position, Token, TokenKind};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Scanner<'a> {
    source: &'a str,
    start: Position,
    position: Position,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(source: &'a str, position: Position) -> Self {
        Scanner {
            source,
            start: position,
            position,
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    #[inline]
    fn rest(&self) -> &'a str {
        self.source.get(self.position.index..).unwrap_or("")
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` characters ahead of the current one.
    #[inline]
    pub(crate) fn peek(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub(crate) fn at(&self, c: char) -> bool {
        self.current() == Some(c)
    }

    #[inline]
    pub(crate) fn at_str(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.position.index >= self.source.len()
    }

    pub(crate) fn at_identifier_char(&self) -> bool {
        self.current().is_some_and(is_identifier_char)
    }

    pub(crate) fn advance(&mut self) {
        let Some(c) = self.current() else {
            return;
        };
        self.position.index += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.at(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if !self.at_str(s) {
            return false;
        }
        for _ in s.chars() {
            self.advance();
        }
        true
    }

    /// Advance while `pred` holds, returning how many characters were eaten.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while self.current().is_some_and(&mut pred) {
            self.advance();
            count += 1;
        }
        count
    }

    /// Advance to the end of the line, leaving the newline unconsumed.
    pub(crate) fn eat_line(&mut self) {
        self.eat_while(|c| c != '\n');
    }

    /// Make the current position the start of the next token.
    pub(crate) fn mark(&mut self) {
        self.start = self.position;
    }

    pub(crate) fn text(&self) -> &'a str {
        self.source
            .get(self.start.index..self.position.index)
            .unwrap_or("")
    }

    pub(crate) fn range(&self) -> DocRange {
        DocRange::new(self.start, self.position)
    }

    pub(crate) fn token(&self, kind: TokenKind) -> Token {
        Token::new(self.text(), self.range(), kind)
    }

    /// Skip whitespace and `//` / `/* */` comments.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            if self.at_str("//") {
                self.eat_line();
            } else if self.at_str("/*") {
                self.eat_str("/*");
                while !self.is_eof() && !self.eat_str("*/") {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests;
