//! Operator-precedence engine.
//!
//! Operands and operators go on two stacks. Pushing an operator first
//! reduces every operator below it that binds at least as tightly, so the
//! operand stack always holds the left-hand sides still waiting for their
//! right-hand sides. Each contained expression (a group, an argument, an
//! index) gets a fresh stack; its empty bottom is the sentinel that
//! reductions never cross.
//!
//! | Operator | Precedence |
//! |---|---|
//! | `~` | 1 |
//! | `?` | 2 |
//! | `:` | 3 |
//! | `\|\|` | 4 |
//! | `&&` | 5 |
//! | `==` `!=` | 6 |
//! | `<` `>` `<=` `>=` | 7 |
//! | `+` `-` | 8 |
//! | `*` `/` `%` | 9 |
//! | `^` | 10 |
//! | unary `!` `-`, cast | 11 |
//! | `.`, index | 13 |
//! | invoke | 14 |

use std::convert::Infallible;

use ostw_diagnostic::{missing_ternary_hand, Diagnostic};
use ostw_ir::ast::{
    Argument, AssignOp, BinaryOp, Expr, ExprKind, TypeExpr, UnaryOp, VanillaExpr,
    VanillaExprKind,
};
use ostw_ir::{DocRange, Position, TokenKind};

/// A node the engine can build.
pub(crate) trait Operand: Sized {
    /// Arguments carried by an invoke operator.
    type Args;
    /// Target carried by a cast operator.
    type Cast;

    fn missing(range: DocRange) -> Self;

    fn range(&self) -> DocRange;

    fn unary(op: UnaryOp, start: Position, operand: Self) -> Self;

    fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self;

    fn ternary(condition: Self, consequent: Self, alternative: Self) -> Self;

    fn index(target: Self, index: Self, end: Position) -> Self;

    fn invoke(target: Self, args: Self::Args, end: Position) -> Self;

    fn cast(ty: Self::Cast, start: Position, operand: Self) -> Self;
}

pub(crate) enum StackOperator<T: Operand> {
    Unary { op: UnaryOp, start: Position },
    Binary(BinaryOp),
    /// `?`
    Ternary { range: DocRange },
    /// `:`
    TernaryElse { range: DocRange },
    Index { index: T, end: Position },
    Invoke { args: T::Args, end: Position },
    Cast { ty: T::Cast, start: Position },
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum OperatorClass {
    Unary,
    Ternary,
    TernaryElse,
    Other,
}

impl<T: Operand> StackOperator<T> {
    fn precedence(&self) -> u8 {
        match self {
            StackOperator::Binary(op) => binary_precedence(*op),
            StackOperator::Ternary { .. } => 2,
            StackOperator::TernaryElse { .. } => 3,
            StackOperator::Unary { .. } | StackOperator::Cast { .. } => 11,
            StackOperator::Index { .. } => 13,
            StackOperator::Invoke { .. } => 14,
        }
    }

    fn class(&self) -> OperatorClass {
        match self {
            StackOperator::Unary { .. } | StackOperator::Cast { .. } => OperatorClass::Unary,
            StackOperator::Ternary { .. } => OperatorClass::Ternary,
            StackOperator::TernaryElse { .. } => OperatorClass::TernaryElse,
            StackOperator::Binary(_)
            | StackOperator::Index { .. }
            | StackOperator::Invoke { .. } => OperatorClass::Other,
        }
    }
}

pub(crate) fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Squiggle => 1,
        BinaryOp::Or => 4,
        BinaryOp::And => 5,
        BinaryOp::Equal | BinaryOp::NotEqual => 6,
        BinaryOp::Less | BinaryOp::LessOrEqual | BinaryOp::Greater | BinaryOp::GreaterOrEqual => 7,
        BinaryOp::Add | BinaryOp::Subtract => 8,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 9,
        BinaryOp::Power => 10,
        BinaryOp::Dot => 13,
    }
}

/// Whether `last` must be reduced before `pushing` goes on the stack.
fn should_pop<T: Operand>(last: &StackOperator<T>, pushing: &StackOperator<T>) -> bool {
    use OperatorClass::{Ternary, TernaryElse, Unary};

    match (last.class(), pushing.class()) {
        (Ternary | TernaryElse, Ternary | TernaryElse) => {
            last.class() == TernaryElse && pushing.class() == TernaryElse
        }
        (Unary, Unary) => false,
        _ => last.precedence() >= pushing.precedence(),
    }
}

pub(crate) struct OperatorStack<T: Operand> {
    operators: Vec<StackOperator<T>>,
    operands: Vec<T>,
    errors: Vec<Diagnostic>,
}

impl<T: Operand> OperatorStack<T> {
    pub(crate) fn new() -> Self {
        OperatorStack {
            operators: Vec::new(),
            operands: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn push_operand(&mut self, operand: T) {
        self.operands.push(operand);
    }

    pub(crate) fn push_operator(&mut self, operator: StackOperator<T>) {
        while self
            .operators
            .last()
            .is_some_and(|last| should_pop(last, &operator))
        {
            self.pop_operator();
        }
        self.operators.push(operator);
    }

    /// Reduce everything down to the sentinel.
    pub(crate) fn pop_all(&mut self) {
        while !self.operators.is_empty() {
            self.pop_operator();
        }
    }

    /// The finished expression and the problems found while reducing it.
    pub(crate) fn finish(mut self) -> (T, Vec<Diagnostic>) {
        self.pop_all();
        let value = self.pop_operand();
        (value, self.errors)
    }

    fn pop_operand(&mut self) -> T {
        self.operands
            .pop()
            .unwrap_or_else(|| T::missing(DocRange::default()))
    }

    fn pop_operator(&mut self) {
        let Some(operator) = self.operators.pop() else {
            return;
        };
        let reduced = self.reduce(operator);
        self.operands.push(reduced);
    }

    fn reduce(&mut self, operator: StackOperator<T>) -> T {
        match operator {
            StackOperator::Unary { op, start } => {
                let operand = self.pop_operand();
                T::unary(op, start, operand)
            }
            StackOperator::Binary(op) => {
                let rhs = self.pop_operand();
                let lhs = self.pop_operand();
                T::binary(op, lhs, rhs)
            }
            StackOperator::Ternary { range } => {
                // `?` reduced on its own never met its `:`.
                self.errors.push(missing_ternary_hand(range, ':'));
                let consequent = self.pop_operand();
                let condition = self.pop_operand();
                let alternative = T::missing(DocRange::point(consequent.range().end));
                T::ternary(condition, consequent, alternative)
            }
            StackOperator::TernaryElse { range } => {
                let alternative = self.pop_operand();
                let consequent = self.pop_operand();
                if matches!(self.operators.last(), Some(StackOperator::Ternary { .. })) {
                    self.operators.pop();
                    let condition = self.pop_operand();
                    T::ternary(condition, consequent, alternative)
                } else {
                    self.errors.push(missing_ternary_hand(range, '?'));
                    let condition = T::missing(DocRange::point(consequent.range().start));
                    T::ternary(condition, consequent, alternative)
                }
            }
            StackOperator::Index { index, end } => {
                let target = self.pop_operand();
                T::index(target, index, end)
            }
            StackOperator::Invoke { args, end } => {
                let target = self.pop_operand();
                T::invoke(target, args, end)
            }
            StackOperator::Cast { ty, start } => {
                let operand = self.pop_operand();
                T::cast(ty, start, operand)
            }
        }
    }
}

fn spanning(start: Position, end: Position) -> DocRange {
    DocRange::new(start, end.max(start))
}

impl Operand for Expr {
    type Args = Vec<Argument>;
    type Cast = TypeExpr;

    fn missing(range: DocRange) -> Self {
        Expr::missing(range)
    }

    fn range(&self) -> DocRange {
        self.range
    }

    fn unary(op: UnaryOp, start: Position, operand: Self) -> Self {
        let range = spanning(start, operand.range.end);
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            range,
        )
    }

    fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        let range = lhs.range.merge(rhs.range);
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            range,
        )
    }

    fn ternary(condition: Self, consequent: Self, alternative: Self) -> Self {
        let range = condition.range.merge(alternative.range);
        Expr::new(
            ExprKind::Ternary {
                condition: Box::new(condition),
                consequent: Box::new(consequent),
                alternative: Box::new(alternative),
            },
            range,
        )
    }

    fn index(target: Self, index: Self, end: Position) -> Self {
        let range = spanning(target.range.start, end);
        Expr::new(
            ExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
            range,
        )
    }

    fn invoke(target: Self, args: Vec<Argument>, end: Position) -> Self {
        let range = spanning(target.range.start, end);
        Expr::new(
            ExprKind::Invoke {
                target: Box::new(target),
                args,
            },
            range,
        )
    }

    fn cast(ty: TypeExpr, start: Position, operand: Self) -> Self {
        let range = spanning(start, operand.range.end);
        Expr::new(
            ExprKind::TypeCast {
                ty: Box::new(ty),
                expr: Box::new(operand),
            },
            range,
        )
    }
}

impl Operand for VanillaExpr {
    // Workshop calls are parsed with their target; casts do not exist.
    type Args = Infallible;
    type Cast = Infallible;

    fn missing(range: DocRange) -> Self {
        VanillaExpr {
            kind: VanillaExprKind::Missing,
            range,
        }
    }

    fn range(&self) -> DocRange {
        self.range
    }

    fn unary(op: UnaryOp, start: Position, operand: Self) -> Self {
        VanillaExpr {
            range: spanning(start, operand.range.end),
            kind: VanillaExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        }
    }

    fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        VanillaExpr {
            range: lhs.range.merge(rhs.range),
            kind: VanillaExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        }
    }

    fn ternary(condition: Self, consequent: Self, alternative: Self) -> Self {
        VanillaExpr {
            range: condition.range.merge(alternative.range),
            kind: VanillaExprKind::Ternary {
                condition: Box::new(condition),
                consequent: Box::new(consequent),
                alternative: Box::new(alternative),
            },
        }
    }

    fn index(target: Self, index: Self, end: Position) -> Self {
        VanillaExpr {
            range: spanning(target.range.start, end),
            kind: VanillaExprKind::Index {
                target: Box::new(target),
                index: Box::new(index),
            },
        }
    }

    fn invoke(_target: Self, args: Infallible, _end: Position) -> Self {
        match args {}
    }

    fn cast(ty: Infallible, _start: Position, _operand: Self) -> Self {
        match ty {}
    }
}

pub(crate) fn match_binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Squiggle => BinaryOp::Squiggle,
        TokenKind::Dot => BinaryOp::Dot,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::EqualEqual => BinaryOp::Equal,
        TokenKind::NotEqual => BinaryOp::NotEqual,
        TokenKind::LessThan => BinaryOp::Less,
        TokenKind::LessThanOrEqual => BinaryOp::LessOrEqual,
        TokenKind::GreaterThan => BinaryOp::Greater,
        TokenKind::GreaterThanOrEqual => BinaryOp::GreaterOrEqual,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Subtract,
        TokenKind::Multiply => BinaryOp::Multiply,
        TokenKind::Divide => BinaryOp::Divide,
        TokenKind::Modulo => BinaryOp::Modulo,
        TokenKind::Hat => BinaryOp::Power,
        _ => return None,
    };
    Some(op)
}

pub(crate) fn match_assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Equal => AssignOp::Assign,
        TokenKind::PlusEqual => AssignOp::Add,
        TokenKind::MinusEqual => AssignOp::Subtract,
        TokenKind::MultiplyEqual => AssignOp::Multiply,
        TokenKind::DivideEqual => AssignOp::Divide,
        TokenKind::ModuloEqual => AssignOp::Modulo,
        TokenKind::HatEqual => AssignOp::Power,
        _ => return None,
    };
    Some(op)
}

/// Binary operators including both halves of the ternary.
pub(crate) fn is_binary_operator(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::QuestionMark | TokenKind::Colon) || match_binary_op(kind).is_some()
}
