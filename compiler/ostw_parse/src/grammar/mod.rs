//! Grammar productions.
//!
//! - `item`: root elements, declarations, classes and enums
//! - `stmt`: statements and blocks
//! - `expr`: C-style expressions and the operator engine
//! - `ty`: type annotations
//! - `vanilla`: workshop rules, variable collections and lobby settings
//!
//! This module holds the root loop and the list helpers every production
//! uses for error recovery.

mod expr;
mod item;
mod stmt;
mod ty;
mod vanilla;

use ostw_diagnostic::unexpected_token;
use ostw_ir::ast::{Attribute, AttributeKind, MetaComment, RootContext};
use ostw_ir::{ContextKind, DocRange, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Parse every root element up to the end of the document.
    pub(crate) fn parse_root(&mut self) -> RootContext {
        let mut root = RootContext::default();
        while !self.is_at_end() {
            self.commit();
            let start = self.position();
            self.parse_root_element(&mut root);
            if self.position() == start {
                // Nothing took the token; make sure the loop moves on.
                self.unexpected(true);
            }
        }
        root
    }

    /// Report the current token as unexpected and skip it.
    ///
    /// Outside the root only skippable tokens are consumed, so a closing
    /// brace or a statement keyword is left for an enclosing production.
    pub(crate) fn unexpected(&mut self, root: bool) {
        let kind = self.current_kind();
        if kind != TokenKind::Eof && (root || kind.is_skippable()) {
            let found = self.current();
            self.advance();
            self.error(unexpected_token(&found));
        }
    }

    /// Parse elements until `is_terminator` holds or a token that is
    /// neither an element nor skippable shows up.
    pub(crate) fn parse_list<T>(
        &mut self,
        mut is_terminator: impl FnMut(&mut Self) -> bool,
        mut is_element: impl FnMut(&mut Self) -> bool,
        mut parse_element: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        let mut elements = Vec::new();
        while !is_terminator(self) {
            if is_element(self) {
                let start = self.position();
                elements.push(parse_element(self));
                if self.position() == start {
                    if !self.current_kind().is_skippable() {
                        break;
                    }
                    self.advance();
                }
            } else if self.current_kind().is_skippable() {
                self.unexpected(false);
            } else {
                break;
            }
        }
        elements
    }

    /// Parse comma-separated elements until `terminator`. The terminator
    /// itself is left for the caller.
    pub(crate) fn parse_delimited_list<T>(
        &mut self,
        terminator: TokenKind,
        is_element: impl FnMut(&mut Self) -> bool,
        parse_element: impl FnMut(&mut Self) -> T,
    ) -> Vec<T> {
        self.parse_delimited_list_or(terminator, is_element, parse_element, |_| None)
    }

    /// Like [`Parser::parse_delimited_list`], with `on_missing` deciding
    /// what stands in for an element missing after a comma.
    pub(crate) fn parse_delimited_list_or<T>(
        &mut self,
        terminator: TokenKind,
        mut is_element: impl FnMut(&mut Self) -> bool,
        mut parse_element: impl FnMut(&mut Self) -> T,
        mut on_missing: impl FnMut(&mut Self) -> Option<T>,
    ) -> Vec<T> {
        let mut values = Vec::new();
        let mut after_comma = false;
        loop {
            if is_element(self) {
                after_comma = false;
                let start = self.position();
                values.push(parse_element(self));

                if self.parse_optional(TokenKind::Comma).is_some() {
                    after_comma = true;
                    continue;
                }
                if self.check(terminator) {
                    break;
                }
                self.parse_expected(TokenKind::Comma);
                if self.position() == start {
                    if !self.current_kind().is_skippable() {
                        break;
                    }
                    self.advance();
                }
            } else {
                if after_comma {
                    if let Some(missing) = on_missing(self) {
                        values.push(missing);
                    }
                }
                after_comma = false;
                if self.check(terminator) || !self.current_kind().is_skippable() {
                    break;
                }
                self.unexpected(false);
            }
        }
        values
    }

    /// Consecutive `#` action comments.
    pub(crate) fn parse_meta_comment(&mut self) -> Option<MetaComment> {
        if !self.check(TokenKind::ActionComment) {
            return None;
        }
        let start = self.start();
        let mut lines = Vec::new();
        while self.check(TokenKind::ActionComment) {
            if let Some(token) = self.advance() {
                lines.push(token.text);
            }
        }
        Some(MetaComment {
            lines,
            range: self.range_from(start),
        })
    }

    /// Whether a token of `kind` follows, possibly after action comments.
    pub(crate) fn is_after_meta_comment(&mut self, kind: TokenKind) -> bool {
        self.look_ahead(|p| {
            p.parse_meta_comment();
            p.check(kind)
        })
    }

    /// `# comment` then `kind`, or nothing. The outer `Option` says
    /// whether `kind` was found.
    pub(crate) fn parse_optional_with_meta_comment(
        &mut self,
        kind: TokenKind,
    ) -> Option<Option<MetaComment>> {
        if !self.is_after_meta_comment(kind) {
            return None;
        }
        let comment = self.parse_meta_comment();
        self.advance();
        Some(comment)
    }

    pub(crate) fn parse_attributes(&mut self) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        while let Some(kind) = self.match_attribute() {
            let range = self.current_range();
            self.advance();
            attributes.push(Attribute { kind, range });
        }
        attributes
    }

    fn match_attribute(&mut self) -> Option<AttributeKind> {
        let kind = match self.current_kind() {
            TokenKind::Public => AttributeKind::Public,
            TokenKind::Private => AttributeKind::Private,
            TokenKind::Protected => AttributeKind::Protected,
            TokenKind::Static => AttributeKind::Static,
            TokenKind::Override => AttributeKind::Override,
            TokenKind::Virtual => AttributeKind::Virtual,
            TokenKind::Recursive => AttributeKind::Recursive,
            TokenKind::GlobalVar => AttributeKind::GlobalVar,
            TokenKind::PlayerVar => AttributeKind::PlayerVar,
            TokenKind::Ref => AttributeKind::Ref,
            TokenKind::In => AttributeKind::In,
            TokenKind::Persist => AttributeKind::Persist,
            _ => return None,
        };
        Some(kind)
    }

    /// Text of a string token with its quotes removed.
    pub(crate) fn parse_string_value(&mut self) -> Option<String> {
        self.parse_expected(TokenKind::String)
            .map(|token| unquote(&token.text))
    }

    /// Run `parse` with tokens lexed in `context`.
    pub(crate) fn in_context<T>(
        &mut self,
        context: ContextKind,
        parse: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.cursor.push_context(context);
        let value = parse(self);
        self.cursor.pop_context();
        value
    }

    /// Point range at the current token's start, for missing elements.
    pub(crate) fn missing_range(&mut self) -> DocRange {
        DocRange::point(self.start())
    }
}

/// Strip the surrounding quotes from string token text. Unterminated
/// strings lose only the opening quote.
pub(crate) fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let Some(open) = chars.next() else {
        return String::new();
    };
    let inner = chars.as_str();
    inner.strip_suffix(open).unwrap_or(inner).to_string()
}

#[cfg(test)]
mod tests;
