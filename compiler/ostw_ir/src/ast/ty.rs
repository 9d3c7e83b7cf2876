//! Type annotations.

use super::Ident;
use crate::DocRange;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Void,
    Named(NamedType),
    /// `A | B`
    Pipe(Box<TypeExpr>, Box<TypeExpr>),
    /// `(A, B) => R` or `A => R`
    Lambda {
        params: Vec<TypeExpr>,
        is_const: bool,
        ret: Box<TypeExpr>,
    },
    /// `(A)[]`
    Group {
        inner: Box<TypeExpr>,
        array_depth: usize,
    },
}

/// `Name<Args>[]...`, or the untyped declaration keyword.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NamedType {
    pub name: Ident,
    pub is_define: bool,
    pub args: Vec<TypeExpr>,
    pub array_depth: usize,
}

impl TypeExpr {
    /// The bare identifier of a plain named type with no arguments,
    /// arrays or modifiers. Used where a type turns out to be a name.
    pub fn as_plain_name(&self) -> Option<&Ident> {
        match &self.kind {
            TypeKind::Named(named)
                if !named.is_define
                    && named.args.is_empty()
                    && named.array_depth == 0 =>
            {
                Some(&named.name)
            }
            _ => None,
        }
    }
}

/// A generic parameter on a declaration: `<single T>`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeParam {
    pub name: Ident,
    pub single: bool,
}
