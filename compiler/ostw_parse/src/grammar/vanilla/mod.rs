//! Workshop syntax embedded in a script.
//!
//! A vanilla rule's sections, a `variables`/`subroutines` collection and
//! a lobby `settings` block are written the way the workshop exports them.
//! Their tokens are lexed in the embedded or settings literal context, so
//! `Event Player` is one symbol and `Ongoing - Each Player` a constant.

use ostw_diagnostic::{invalid_expression_term, unexpected_token};
use ostw_ir::ast::{
    CollectionItem, CollectionKind, Ident, LobbySettings, SectionKind, UnaryOp, VanillaExpr,
    VanillaExprKind, VanillaItem, VanillaRule, VanillaSection, VariableCollection,
};
use ostw_ir::{ContextKind, TokenKind};

use super::expr::{match_assign_op, Operand, OperatorStack, OperatorState, StackOperator};
use super::unquote;
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    /// `[disabled] rule (`
    pub(crate) fn is_vanilla_rule(&mut self) -> bool {
        self.look_ahead(|p| {
            p.parse_optional(TokenKind::Disabled);
            p.parse_optional(TokenKind::Rule).is_some() && p.check(TokenKind::OpenParen)
        })
    }

    /// `[disabled] rule("name") { event { } conditions { } actions { } }`
    pub(crate) fn parse_vanilla_rule(&mut self) -> VanillaRule {
        self.incremental_node(|p| {
            let start = p.start();
            let disabled = p.parse_optional(TokenKind::Disabled).is_some();
            p.parse_expected(TokenKind::Rule);
            p.parse_expected(TokenKind::OpenParen);
            let name = p.parse_string_value();
            p.parse_expected(TokenKind::CloseParen);
            p.parse_expected(TokenKind::OpenCurly);

            let mut sections = Vec::new();
            while let Some(kind) = p.in_context(ContextKind::EmbeddedLiteral, |p| {
                match_section(p.current_kind())
            }) {
                let section = p.in_context(ContextKind::EmbeddedLiteral, |p| {
                    p.parse_vanilla_section(kind)
                });
                sections.push(section);
            }

            p.parse_expected(TokenKind::CloseCurly);
            VanillaRule {
                disabled,
                name,
                sections,
                range: p.range_from(start),
            }
        })
    }

    fn parse_vanilla_section(&mut self, kind: SectionKind) -> VanillaSection {
        let start = self.start();
        self.advance();
        self.parse_expected(TokenKind::OpenCurly);

        let items = self.parse_list(
            |p| p.check(TokenKind::CloseCurly),
            |p| {
                let kind = p.current_kind();
                kind.is_workshop_expression()
                    || matches!(kind, TokenKind::Disabled | TokenKind::Semicolon)
            },
            Self::parse_vanilla_item,
        );

        self.parse_expected(TokenKind::CloseCurly);
        VanillaSection {
            kind,
            items: items.into_iter().flatten().collect(),
            range: self.range_from(start),
        }
    }

    /// `["comment"] [disabled] expr;`. A stray `;` is skipped.
    fn parse_vanilla_item(&mut self) -> Option<VanillaItem> {
        if self.parse_optional(TokenKind::Semicolon).is_some() {
            return None;
        }

        let start = self.start();
        // A string is the item's comment only when something follows that
        // could be the item itself.
        let next = self.peek_kind(1);
        let comment = if self.check(TokenKind::String)
            && (next.is_workshop_expression() || next == TokenKind::Disabled)
        {
            self.advance().map(|token| unquote(&token.text))
        } else {
            None
        };
        let disabled = self.parse_optional(TokenKind::Disabled).is_some();
        let expr = self.parse_vanilla_expression();
        self.parse_expected(TokenKind::Semicolon);

        Some(VanillaItem {
            comment,
            disabled,
            expr,
            range: self.range_from(start),
        })
    }

    /// A workshop expression, possibly an assignment.
    pub(crate) fn parse_vanilla_expression(&mut self) -> VanillaExpr {
        ensure_sufficient_stack(|| {
            let mut stack = OperatorStack::new();
            let mut state = OperatorState::default();

            self.parse_vanilla_operand(&mut stack);
            // Workshop member access takes any term on its right.
            while let Some((operator, _)) = self.parse_binary_operator::<VanillaExpr>(&mut state)
            {
                stack.push_operator(operator);
                self.parse_vanilla_operand(&mut stack);
            }
            let target = self.finish_stack(stack);

            let Some(op) = match_assign_op(self.current_kind()) else {
                return target;
            };
            self.advance();
            let value = self.parse_vanilla_expression();
            VanillaExpr {
                range: target.range.merge(value.range),
                kind: VanillaExprKind::Assignment {
                    target: Box::new(target),
                    op,
                    value: Box::new(value),
                },
            }
        })
    }

    fn parse_vanilla_operand(&mut self, stack: &mut OperatorStack<VanillaExpr>) {
        let unary = match self.current_kind() {
            TokenKind::Exclamation => Some(UnaryOp::Not),
            TokenKind::Minus if self.peek_kind(1) != TokenKind::Number => Some(UnaryOp::Negate),
            _ => None,
        };
        if let Some(op) = unary {
            let start = self.start();
            self.advance();
            stack.push_operator(StackOperator::Unary { op, start });
            return ensure_sufficient_stack(|| self.parse_vanilla_operand(stack));
        }

        let term = self.parse_vanilla_term();
        stack.push_operand(term);
        while self.parse_optional(TokenKind::OpenSquare).is_some() {
            let index = self.parse_vanilla_expression();
            self.parse_expected(TokenKind::CloseSquare);
            let end = self.previous_range().end;
            stack.push_operator(StackOperator::Index { index, end });
        }
    }

    /// A literal, a symbol with optional arguments or a group.
    fn parse_vanilla_term(&mut self) -> VanillaExpr {
        let start = self.start();
        let kind = match self.current_kind() {
            TokenKind::Number | TokenKind::Minus => {
                let negative = self.parse_optional(TokenKind::Minus).is_some();
                match self.parse_expected(TokenKind::Number) {
                    Some(number) if negative => VanillaExprKind::Number(format!("-{}", number.text)),
                    Some(number) => VanillaExprKind::Number(number.text),
                    None => VanillaExprKind::Missing,
                }
            }
            TokenKind::String => {
                let text = self.advance().map(|token| unquote(&token.text));
                VanillaExprKind::String(text.unwrap_or_default())
            }
            TokenKind::WorkshopSymbol | TokenKind::WorkshopConstant => {
                let name = self.advance().map(|token| token.text).unwrap_or_default();
                let symbol = VanillaExpr {
                    kind: VanillaExprKind::Symbol(name),
                    range: self.range_from(start),
                };
                if self.parse_optional(TokenKind::OpenParen).is_none() {
                    return symbol;
                }
                let args = self.parse_vanilla_arguments();
                self.parse_expected(TokenKind::CloseParen);
                VanillaExprKind::Invoke {
                    target: Box::new(symbol),
                    args,
                }
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_vanilla_expression();
                self.parse_expected(TokenKind::CloseParen);
                VanillaExprKind::Group(Box::new(inner))
            }
            kind => {
                let found = self.current_or_last();
                self.error(invalid_expression_term(&found));
                if !matches!(
                    kind,
                    TokenKind::Semicolon
                        | TokenKind::CloseCurly
                        | TokenKind::CloseParen
                        | TokenKind::CloseSquare
                        | TokenKind::Comma
                        | TokenKind::Eof
                ) {
                    self.advance();
                }
                return VanillaExpr::missing(self.missing_range());
            }
        };
        VanillaExpr {
            kind,
            range: self.range_from(start),
        }
    }

    /// Arguments of a workshop call. An empty slot after a comma is
    /// reported and kept as a missing value.
    fn parse_vanilla_arguments(&mut self) -> Vec<VanillaExpr> {
        if self.check(TokenKind::CloseParen) {
            return Vec::new();
        }
        self.parse_delimited_list_or(
            TokenKind::CloseParen,
            |p| p.current_kind().is_workshop_expression(),
            Self::parse_vanilla_expression,
            |p| {
                let found = p.current_or_last();
                p.error(unexpected_token(&found));
                Some(VanillaExpr::missing(p.missing_range()))
            },
        )
    }

    /// `variables { global: 0: name player: 0: name }` or the same with
    /// `subroutines`.
    pub(crate) fn parse_variable_collection(&mut self) -> VariableCollection {
        let start = self.start();
        let kind = match self.advance().map(|token| token.kind) {
            Some(TokenKind::WorkshopSubroutines) => CollectionKind::Subroutines,
            _ => CollectionKind::Variables,
        };

        let items = self.in_context(ContextKind::EmbeddedLiteral, |p| {
            p.parse_expected(TokenKind::OpenCurly);
            let mut items = Vec::new();
            loop {
                match p.current_kind() {
                    TokenKind::WorkshopSymbol | TokenKind::WorkshopConstant
                        if p.peek_kind(1) == TokenKind::Colon =>
                    {
                        if let Some(token) = p.advance() {
                            items.push(CollectionItem::Group(Ident::new(token.text, token.range)));
                        }
                        p.advance();
                    }
                    TokenKind::Number => {
                        let id = p.advance().map(|token| token.text).unwrap_or_default();
                        p.parse_expected(TokenKind::Colon);
                        let at = p.start();
                        let name = p
                            .parse_expected_any(&[
                                TokenKind::WorkshopSymbol,
                                TokenKind::WorkshopConstant,
                            ])
                            .map_or_else(
                                || Ident::missing(at),
                                |token| Ident::new(token.text, token.range),
                            );
                        items.push(CollectionItem::Variable { id, name });
                    }
                    TokenKind::CloseCurly | TokenKind::Eof => break,
                    _ => {
                        let found = p.current();
                        p.advance();
                        p.error(unexpected_token(&found));
                    }
                }
            }
            p.parse_expected(TokenKind::CloseCurly);
            items
        });

        VariableCollection {
            kind,
            items,
            range: self.range_from(start),
        }
    }

    /// `settings { ... }`. The body is consumed with its braces balanced.
    pub(crate) fn parse_lobby_settings(&mut self) -> LobbySettings {
        let start = self.start();
        let first = self.position();
        self.advance();

        self.in_context(ContextKind::SettingsLiteral, |p| {
            if p.parse_expected(TokenKind::OpenCurly).is_none() {
                return;
            }
            let mut depth = 1usize;
            while depth > 0 {
                match p.current_kind() {
                    TokenKind::Eof => {
                        p.parse_expected(TokenKind::CloseCurly);
                        return;
                    }
                    TokenKind::OpenCurly => depth += 1,
                    TokenKind::CloseCurly => depth -= 1,
                    _ => {}
                }
                p.advance();
            }
        });

        LobbySettings {
            token_count: self.position() - first,
            range: self.range_from(start),
        }
    }
}

fn match_section(kind: TokenKind) -> Option<SectionKind> {
    match kind {
        TokenKind::WorkshopEvent => Some(SectionKind::Event),
        TokenKind::WorkshopConditions => Some(SectionKind::Conditions),
        TokenKind::WorkshopActions => Some(SectionKind::Actions),
        _ => None,
    }
}
