//! Expressions.
//!
//! An expression is an operand followed by any number of binary operators
//! and their right-hand sides. Operands are a primary term with optional
//! prefix operators (`!`, `-`, `<Type>`) and postfix index and call
//! operators. Everything goes through the [`OperatorStack`], which turns
//! the flat sequence into a tree by precedence.
//!
//! Two things make the operator loop context dependent:
//!
//! - A `:` is only an operator while this expression has an unmatched `?`.
//!   Otherwise it belongs to the enclosing production (a named argument,
//!   a struct field, a switch case).
//! - Inside a formatted string `<"{0}", a>` the closing `>` is not an
//!   operator unless an expression follows it.

mod operators;
mod primary;

pub(crate) use operators::{is_binary_operator, match_assign_op, match_binary_op};
pub(crate) use operators::{Operand, OperatorStack, StackOperator};

use ostw_ir::ast::{Argument, Expr, ExprKind, Ident, Identifier, UnaryOp};
use ostw_ir::TokenKind;

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

/// How the right-hand side of a binary operator is parsed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum RhsMode {
    /// A full operand.
    Operand,
    /// `.`: a member name with its postfixes.
    Member,
    /// `~`: like a member, then everything so far is reduced.
    Squiggle,
}

/// Per-expression operator loop state.
#[derive(Default)]
pub(crate) struct OperatorState {
    pub(crate) in_format: bool,
    pub(crate) open_ternaries: usize,
}

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> Expr {
        self.parse_contained_expression(false)
    }

    /// Parse a complete expression on its own operator stack.
    pub(crate) fn parse_contained_expression(&mut self, in_format: bool) -> Expr {
        ensure_sufficient_stack(|| {
            let mut stack = OperatorStack::new();
            let mut state = OperatorState {
                in_format,
                open_ternaries: 0,
            };

            self.parse_operand_into(&mut stack);
            while let Some((operator, rhs)) = self.parse_binary_operator::<Expr>(&mut state) {
                stack.push_operator(operator);
                match rhs {
                    RhsMode::Operand => self.parse_operand_into(&mut stack),
                    RhsMode::Member | RhsMode::Squiggle => {
                        let member = self.parse_identifier();
                        stack.push_operand(member);
                        self.parse_postfixes(&mut stack);
                        if rhs == RhsMode::Squiggle {
                            stack.pop_all();
                        }
                    }
                }
            }

            self.finish_stack(stack)
        })
    }

    /// Reduce what is left and report the reduction problems.
    pub(crate) fn finish_stack<T: Operand>(&mut self, stack: OperatorStack<T>) -> T {
        let (value, errors) = stack.finish();
        for error in errors {
            self.error(error);
        }
        value
    }

    /// Consume a binary operator if one that applies here is next.
    pub(crate) fn parse_binary_operator<T: Operand>(
        &mut self,
        state: &mut OperatorState,
    ) -> Option<(StackOperator<T>, RhsMode)> {
        let kind = self.current_kind();
        let range = self.current_range();
        let (operator, rhs) = match kind {
            TokenKind::QuestionMark => (StackOperator::Ternary { range }, RhsMode::Operand),
            TokenKind::Colon if state.open_ternaries > 0 => {
                (StackOperator::TernaryElse { range }, RhsMode::Operand)
            }
            TokenKind::GreaterThan
                if state.in_format && !self.peek_kind(1).is_start_of_expression() =>
            {
                return None;
            }
            TokenKind::Dot => (StackOperator::Binary(match_binary_op(kind)?), RhsMode::Member),
            TokenKind::Squiggle => (
                StackOperator::Binary(match_binary_op(kind)?),
                RhsMode::Squiggle,
            ),
            _ => (StackOperator::Binary(match_binary_op(kind)?), RhsMode::Operand),
        };

        match kind {
            TokenKind::QuestionMark => state.open_ternaries += 1,
            TokenKind::Colon => state.open_ternaries -= 1,
            _ => {}
        }
        self.advance();
        Some((operator, rhs))
    }

    /// Push one operand, with its prefix and postfix operators, onto the
    /// stack.
    fn parse_operand_into(&mut self, stack: &mut OperatorStack<Expr>) {
        let unary = match self.current_kind() {
            TokenKind::Minus if self.peek_kind(1) != TokenKind::Number => Some(UnaryOp::Negate),
            TokenKind::Exclamation => Some(UnaryOp::Not),
            TokenKind::LessThan if self.is_type_cast() => {
                let start = self.start();
                self.advance();
                let ty = self.parse_type();
                self.parse_expected(TokenKind::GreaterThan);
                stack.push_operator(StackOperator::Cast { ty, start });
                return ensure_sufficient_stack(|| self.parse_operand_into(stack));
            }
            _ => None,
        };

        if let Some(op) = unary {
            let start = self.start();
            self.advance();
            stack.push_operator(StackOperator::Unary { op, start });
            return ensure_sufficient_stack(|| self.parse_operand_into(stack));
        }

        let operand = self.parse_primary();
        stack.push_operand(operand);
        self.parse_postfixes(stack);
    }

    /// `[index]` and `(args)` after an operand.
    fn parse_postfixes(&mut self, stack: &mut OperatorStack<Expr>) {
        loop {
            if self.parse_optional(TokenKind::OpenSquare).is_some() {
                let index = self.parse_expression();
                self.parse_expected(TokenKind::CloseSquare);
                let end = self.previous_range().end;
                stack.push_operator(StackOperator::Index { index, end });
            } else if self.parse_optional(TokenKind::OpenParen).is_some() {
                let args = self.parse_arguments();
                self.parse_expected(TokenKind::CloseParen);
                let end = self.previous_range().end;
                stack.push_operator(StackOperator::Invoke { args, end });
            } else {
                break;
            }
        }
    }

    /// A name with its own `[index]` list, or generic arguments when it
    /// has none: `a[0][1]`, `f<T>`.
    pub(crate) fn parse_identifier(&mut self) -> Expr {
        let start = self.start();
        let name = match self.parse_expected(TokenKind::Identifier) {
            Some(token) => Ident::new(token.text, token.range),
            None => Ident::missing(start),
        };

        let mut indices = Vec::new();
        while self.parse_optional(TokenKind::OpenSquare).is_some() {
            indices.push(self.parse_expression());
            self.parse_expected(TokenKind::CloseSquare);
        }

        let generics = if indices.is_empty() && self.is_generics() {
            self.parse_generics()
        } else {
            Vec::new()
        };

        Expr::new(
            ExprKind::Identifier(Identifier {
                name,
                indices,
                generics,
            }),
            self.range_from(start),
        )
    }

    /// Call arguments up to, not including, the closing parenthesis.
    pub(crate) fn parse_arguments(&mut self) -> Vec<Argument> {
        if self.check(TokenKind::CloseParen) {
            return Vec::new();
        }
        self.parse_delimited_list(
            TokenKind::CloseParen,
            |p| {
                let kind = p.current_kind();
                kind.is_start_of_expression() || is_binary_operator(kind)
            },
            |p| {
                let name = if p.check(TokenKind::Identifier)
                    && p.peek_kind(1) == TokenKind::Colon
                {
                    let name = p.advance().map(|token| Ident::new(token.text, token.range));
                    p.advance();
                    name
                } else {
                    None
                };
                Argument {
                    name,
                    value: p.parse_expression(),
                }
            },
        )
    }
}

#[cfg(test)]
mod tests;
