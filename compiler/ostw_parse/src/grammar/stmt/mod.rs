//! Statements and blocks.
//!
//! Blocks and the control flow statements are captured for reuse, so an
//! edit inside one branch of an `if` leaves the other statements of the
//! enclosing block to be copied from the previous parse.

use ostw_ir::ast::{
    Block, Else, ElseIf, Expr, For, Foreach, Ident, If, Return, Stmt, StmtKind, Switch,
    SwitchItem, While,
};
use ostw_ir::TokenKind;

use super::expr::match_assign_op;
use crate::stack::ensure_sufficient_stack;
use crate::Parser;

impl Parser<'_> {
    /// `{ statements [# comment] }`
    pub(crate) fn parse_block(&mut self) -> Block {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::OpenCurly);

            let statements = p.parse_list(
                |p| {
                    p.check(TokenKind::CloseCurly)
                        || (p.check(TokenKind::ActionComment)
                            && p.is_after_meta_comment(TokenKind::CloseCurly))
                },
                |p| p.current_kind().is_start_of_statement(),
                |p| p.parse_statement(true),
            );

            let end_comment = p.parse_meta_comment();
            p.parse_expected(TokenKind::CloseCurly);

            Block {
                statements,
                end_comment,
                range: p.range_from(start),
            }
        })
    }

    /// Parse one statement. `semicolon` is false where the statement is
    /// embedded in another construct: `for` headers and lambda bodies.
    pub(crate) fn parse_statement(&mut self, semicolon: bool) -> Stmt {
        ensure_sufficient_stack(|| {
            self.commit();
            let comment = self.parse_meta_comment();
            let mut statement = self.parse_statement_kind(semicolon);
            statement.comment = comment;
            statement
        })
    }

    fn parse_statement_kind(&mut self, semicolon: bool) -> Stmt {
        let start = self.start();
        let kind = match self.current_kind() {
            TokenKind::OpenCurly => {
                let block = self.parse_block();
                let range = block.range;
                return Stmt::new(StmtKind::Block(block), range);
            }
            TokenKind::Break | TokenKind::Continue => {
                let kind = if self.check(TokenKind::Break) {
                    StmtKind::Break
                } else {
                    StmtKind::Continue
                };
                self.advance();
                let range = self.range_from(start);
                self.parse_expected(TokenKind::Semicolon);
                return Stmt::new(kind, range);
            }
            TokenKind::Return => StmtKind::Return(self.parse_return()),
            TokenKind::If => StmtKind::If(self.parse_if()),
            TokenKind::Switch => StmtKind::Switch(self.parse_switch()),
            TokenKind::For => StmtKind::For(self.parse_for()),
            TokenKind::While => StmtKind::While(self.parse_while()),
            TokenKind::Foreach => StmtKind::Foreach(self.parse_foreach()),
            TokenKind::Delete => {
                self.advance();
                let value = self.parse_expression();
                self.parse_expected(TokenKind::Semicolon);
                StmtKind::Delete(value)
            }
            _ if self.is_declaration(false) => {
                let declaration = self.parse_declaration(semicolon);
                let range = declaration.range;
                return Stmt::new(StmtKind::Declaration(Box::new(declaration)), range);
            }
            _ => return self.parse_expression_statement(semicolon),
        };
        Stmt::new(kind, self.range_from(start))
    }

    /// An expression, assignment or increment.
    fn parse_expression_statement(&mut self, semicolon: bool) -> Stmt {
        let start = self.start();
        let target = self.parse_expression();

        let kind = if let Some(op) = match_assign_op(self.current_kind()) {
            self.advance();
            let value = self.parse_expression();
            StmtKind::Assignment { target, op, value }
        } else if self.parse_optional(TokenKind::PlusPlus).is_some() {
            StmtKind::Increment {
                target,
                decrement: false,
            }
        } else if self.parse_optional(TokenKind::MinusMinus).is_some() {
            StmtKind::Increment {
                target,
                decrement: true,
            }
        } else {
            StmtKind::Expression(target)
        };

        let range = self.range_from(start);
        if semicolon {
            self.parse_expected(TokenKind::Semicolon);
        }
        Stmt::new(kind, range)
    }

    fn parse_return(&mut self) -> Return {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::Return);
            let value = if p.check(TokenKind::Semicolon) {
                None
            } else {
                Some(p.parse_expression())
            };
            p.parse_expected(TokenKind::Semicolon);
            Return {
                value,
                range: p.range_from(start),
            }
        })
    }

    /// `( expr )` after a control flow keyword.
    fn parse_condition(&mut self) -> Expr {
        self.parse_expected(TokenKind::OpenParen);
        let condition = self.parse_expression();
        self.parse_expected(TokenKind::CloseParen);
        condition
    }

    fn parse_if(&mut self) -> If {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::If);
            let condition = p.parse_condition();
            let body = Box::new(p.parse_statement(true));

            let mut else_ifs = Vec::new();
            let mut else_branch = None;
            while let Some(comment) = p.parse_optional_with_meta_comment(TokenKind::Else) {
                if p.parse_optional(TokenKind::If).is_some() {
                    let condition = p.parse_condition();
                    let body = Box::new(p.parse_statement(true));
                    else_ifs.push(ElseIf {
                        comment,
                        condition,
                        body,
                    });
                } else {
                    let body = Box::new(p.parse_statement(true));
                    else_branch = Some(Else { comment, body });
                    break;
                }
            }

            If {
                condition,
                body,
                else_ifs,
                else_branch,
                range: p.range_from(start),
            }
        })
    }

    fn parse_switch(&mut self) -> Switch {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::Switch);
            let value = p.parse_condition();
            p.parse_expected(TokenKind::OpenCurly);

            let items = p.parse_list(
                |p| p.check(TokenKind::CloseCurly),
                |p| {
                    let kind = p.current_kind();
                    kind.is_start_of_statement()
                        || matches!(kind, TokenKind::Case | TokenKind::Default)
                },
                Self::parse_switch_item,
            );

            p.parse_expected(TokenKind::CloseCurly);
            Switch {
                value,
                items,
                range: p.range_from(start),
            }
        })
    }

    fn parse_switch_item(&mut self) -> SwitchItem {
        let start = self.start();
        if self.parse_optional(TokenKind::Case).is_some() {
            let value = self.parse_expression();
            self.parse_expected(TokenKind::Colon);
            SwitchItem::Case {
                value,
                range: self.range_from(start),
            }
        } else if self.parse_optional(TokenKind::Default).is_some() {
            self.parse_expected(TokenKind::Colon);
            SwitchItem::Default {
                range: self.range_from(start),
            }
        } else {
            SwitchItem::Statement(self.parse_statement(true))
        }
    }

    /// `for (init; condition; iterator) body`. Each header part may be
    /// empty.
    fn parse_for(&mut self) -> For {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::For);
            p.parse_expected(TokenKind::OpenParen);

            let initializer = if p.parse_optional(TokenKind::Semicolon).is_some() {
                None
            } else {
                let initializer = p.parse_statement(false);
                p.parse_expected(TokenKind::Semicolon);
                Some(Box::new(initializer))
            };

            let condition = if p.parse_optional(TokenKind::Semicolon).is_some() {
                None
            } else {
                let condition = p.parse_expression();
                p.parse_expected(TokenKind::Semicolon);
                Some(condition)
            };

            let iterator = if p.check(TokenKind::CloseParen) {
                None
            } else {
                Some(Box::new(p.parse_statement(false)))
            };
            p.parse_expected(TokenKind::CloseParen);

            let body = Box::new(p.parse_statement(true));
            For {
                initializer,
                condition,
                iterator,
                body,
                range: p.range_from(start),
            }
        })
    }

    fn parse_while(&mut self) -> While {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::While);
            let condition = p.parse_condition();
            let body = Box::new(p.parse_statement(true));
            While {
                condition,
                body,
                range: p.range_from(start),
            }
        })
    }

    /// `foreach (Type name [!] in iterable) body`
    fn parse_foreach(&mut self) -> Foreach {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::Foreach);
            p.parse_expected(TokenKind::OpenParen);

            let ty = p.parse_type();
            let at = p.start();
            let name = p
                .parse_expected(TokenKind::Identifier)
                .map_or_else(|| Ident::missing(at), |token| Ident::new(token.text, token.range));
            let extended = p.parse_optional(TokenKind::Exclamation).is_some();
            p.parse_expected(TokenKind::In);
            let iterable = p.parse_expression();
            p.parse_expected(TokenKind::CloseParen);

            let body = Box::new(p.parse_statement(true));
            Foreach {
                ty,
                name,
                extended,
                iterable,
                body,
                range: p.range_from(start),
            }
        })
    }
}
