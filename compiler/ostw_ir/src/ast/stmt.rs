//! Statements.

use super::{AssignOp, Expr, Ident, MetaComment, TypeExpr, VariableDeclaration};
use crate::DocRange;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    /// Action comment (`# ...`) written above the statement.
    pub comment: Option<MetaComment>,
    pub range: DocRange,
}

impl Stmt {
    pub fn new(kind: StmtKind, range: DocRange) -> Self {
        Stmt {
            kind,
            comment: None,
            range,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum StmtKind {
    Block(Block),
    Expression(Expr),
    Assignment {
        target: Expr,
        op: AssignOp,
        value: Expr,
    },
    /// `a++` or `a--`
    Increment {
        target: Expr,
        decrement: bool,
    },
    Declaration(Box<VariableDeclaration>),
    If(If),
    Switch(Switch),
    For(For),
    While(While),
    Foreach(Foreach),
    Return(Return),
    Break,
    Continue,
    Delete(Expr),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Block {
    pub statements: Vec<Stmt>,
    /// Action comment written just before the closing brace.
    pub end_comment: Option<MetaComment>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct If {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub else_ifs: Vec<ElseIf>,
    pub else_branch: Option<Else>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElseIf {
    pub comment: Option<MetaComment>,
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Else {
    pub comment: Option<MetaComment>,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Switch {
    pub value: Expr,
    pub items: Vec<SwitchItem>,
    pub range: DocRange,
}

/// Case labels sit in the same list as the statements they guard.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SwitchItem {
    Case { value: Expr, range: DocRange },
    Default { range: DocRange },
    Statement(Stmt),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct For {
    pub initializer: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub iterator: Option<Box<Stmt>>,
    pub body: Box<Stmt>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct While {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Foreach {
    pub ty: TypeExpr,
    pub name: Ident,
    pub extended: bool,
    pub iterable: Expr,
    pub body: Box<Stmt>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Return {
    pub value: Option<Expr>,
    pub range: DocRange,
}
