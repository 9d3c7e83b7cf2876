//! Expressions.

use std::fmt;

use super::{Ident, Stmt, TypeExpr};
use crate::DocRange;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: DocRange,
}

impl Expr {
    pub fn new(kind: ExprKind, range: DocRange) -> Self {
        Expr { kind, range }
    }

    pub fn missing(range: DocRange) -> Self {
        Expr {
            kind: ExprKind::Missing,
            range,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ExprKind::Missing)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprKind {
    /// Number literal text. Negative literals keep their sign.
    Number(String),
    Boolean(bool),
    Null,
    This,
    Root,
    String(StringLiteral),
    InterpolatedString(InterpolatedString),
    /// `<"text {0}", a>`
    FormattedString(FormattedString),
    Identifier(Identifier),
    New {
        ty: TypeExpr,
        args: Vec<Argument>,
    },
    Array(Vec<Expr>),
    Async {
        ignore_if_running: bool,
        expr: Box<Expr>,
    },
    StructLiteral(StructLiteral),
    Lambda(Lambda),
    Group(Box<Expr>),
    /// `import("file.json")`
    JsonImport(Option<String>),
    TypeCast {
        ty: Box<TypeExpr>,
        expr: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Invoke {
        target: Box<Expr>,
        args: Vec<Argument>,
    },
    /// Placeholder left where an expression was required but absent.
    Missing,
}

/// A string literal. `text` is the raw token text, quotes included.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StringLiteral {
    pub text: String,
    pub localized: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InterpolatedString {
    /// Raw text of the opening token (`$"...{` or a hole-free `$"..."`).
    pub head: String,
    pub parts: Vec<InterpolatedPart>,
}

/// A hole and the string text that follows it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InterpolatedPart {
    pub value: Expr,
    pub text: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FormattedString {
    pub localized: bool,
    pub text: String,
    pub args: Vec<Expr>,
}

/// A name with optional array indices and generic arguments.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Identifier {
    pub name: Ident,
    pub indices: Vec<Expr>,
    pub generics: Vec<TypeExpr>,
}

/// A call argument, optionally named: `f(radius: 3)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Argument {
    pub name: Option<Ident>,
    pub value: Expr,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructLiteral {
    pub single: bool,
    pub fields: Vec<StructField>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StructField {
    Value {
        ty: Option<TypeExpr>,
        name: Ident,
        value: Expr,
        range: DocRange,
    },
    Spread {
        value: Expr,
        range: DocRange,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Lambda {
    pub params: Vec<LambdaParam>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LambdaParam {
    pub ty: Option<TypeExpr>,
    pub name: Ident,
    pub range: DocRange,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnaryOp {
    Not,
    Negate,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    /// `a ~ b`
    Squiggle,
    Dot,
    Or,
    And,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Squiggle => "~",
            BinaryOp::Dot => ".",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compound and plain assignment operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}
