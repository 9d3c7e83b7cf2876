//! Workshop rules written in the workshop's own syntax.

use super::{AssignOp, BinaryOp, UnaryOp};
use crate::DocRange;

/// `[disabled] rule("name") { event { } conditions { } actions { } }`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VanillaRule {
    pub disabled: bool,
    pub name: Option<String>,
    pub sections: Vec<VanillaSection>,
    pub range: DocRange,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SectionKind {
    Event,
    Conditions,
    Actions,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VanillaSection {
    pub kind: SectionKind,
    pub items: Vec<VanillaItem>,
    pub range: DocRange,
}

/// `["comment"] [disabled] expr;`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VanillaItem {
    pub comment: Option<String>,
    pub disabled: bool,
    pub expr: VanillaExpr,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VanillaExpr {
    pub kind: VanillaExprKind,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum VanillaExprKind {
    Number(String),
    String(String),
    /// A workshop constant or free-form symbol.
    Symbol(String),
    Group(Box<VanillaExpr>),
    Invoke {
        target: Box<VanillaExpr>,
        args: Vec<VanillaExpr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<VanillaExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<VanillaExpr>,
        rhs: Box<VanillaExpr>,
    },
    Ternary {
        condition: Box<VanillaExpr>,
        consequent: Box<VanillaExpr>,
        alternative: Box<VanillaExpr>,
    },
    Index {
        target: Box<VanillaExpr>,
        index: Box<VanillaExpr>,
    },
    Assignment {
        target: Box<VanillaExpr>,
        op: AssignOp,
        value: Box<VanillaExpr>,
    },
    Missing,
}
