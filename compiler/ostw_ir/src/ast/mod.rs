//! Syntax tree produced by the parser.
//!
//! Nodes own their children and carry document ranges. Nodes that the
//! incremental parser may reuse (blocks, control flow, rules, classes,
//! enums, type aliases, struct literals) also carry their own `range`
//! field so a reused copy can be re-anchored with [`Relocate`].

mod expr;
mod item;
mod relocate;
mod stmt;
mod ty;
mod vanilla;

pub use expr::{
    Argument, AssignOp, BinaryOp, Expr, ExprKind, FormattedString, Identifier, InterpolatedPart,
    InterpolatedString, Lambda, LambdaParam, StringLiteral, StructField, StructLiteral, UnaryOp,
};
pub use item::{
    Attribute, AttributeKind, Class, ClassKind, CollectionItem, CollectionKind, Constructor,
    Declaration, Enum, EnumValue, FunctionBody, FunctionDeclaration, Hook, Import, LobbySettings,
    Reservation, RootContext, RootItem, Rule, RuleCondition, RuleSetting, Subroutine,
    SubroutineScope, TargetVariable, TypeAlias, VariableCollection, VariableDeclaration,
    WorkshopTarget,
};
pub use relocate::Relocate;
pub use stmt::{Block, Else, ElseIf, For, Foreach, If, Return, Stmt, StmtKind, Switch, SwitchItem, While};
pub use ty::{NamedType, TypeExpr, TypeKind, TypeParam};
pub use vanilla::{SectionKind, VanillaExpr, VanillaExprKind, VanillaItem, VanillaRule, VanillaSection};

use crate::{DocRange, Position};

/// A name as written in the source.
///
/// A missing name (the parser expected one and found something else) has
/// empty text and a point range where it should have been.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ident {
    pub name: String,
    pub range: DocRange,
}

impl Ident {
    pub fn new(name: impl Into<String>, range: DocRange) -> Self {
        Ident {
            name: name.into(),
            range,
        }
    }

    pub fn missing(at: Position) -> Self {
        Ident {
            name: String::new(),
            range: DocRange::point(at),
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.name.is_empty()
    }
}

/// Consecutive `# ...` action comments documenting the next element.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MetaComment {
    pub lines: Vec<String>,
    pub range: DocRange,
}

#[cfg(test)]
mod tests;
