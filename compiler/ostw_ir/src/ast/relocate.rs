//! Moving reused syntax trees to their new document positions.

use super::{
    Argument, Attribute, Block, Class, CollectionItem, Constructor, Declaration, Else, ElseIf,
    Enum, EnumValue, Expr, ExprKind, For, Foreach, FormattedString, FunctionBody,
    FunctionDeclaration, Hook, Ident, Identifier, If, Import, InterpolatedPart,
    InterpolatedString, Lambda, LambdaParam, LobbySettings, MetaComment, NamedType, Reservation,
    Return, RootContext, RootItem, Rule, RuleCondition, RuleSetting, Stmt, StmtKind, StructField,
    StructLiteral, Switch, SwitchItem, TargetVariable, TypeAlias, TypeExpr, TypeKind, TypeParam,
    VanillaExpr, VanillaExprKind, VanillaItem, VanillaRule, VanillaSection, VariableCollection,
    VariableDeclaration, While, WorkshopTarget,
};
use crate::{DocRange, Position, PositionShift};

/// Shift every position inside a node.
pub trait Relocate {
    fn relocate(&mut self, shift: PositionShift);
}

impl Relocate for Position {
    #[inline]
    fn relocate(&mut self, shift: PositionShift) {
        *self = self.shifted(shift);
    }
}

impl Relocate for DocRange {
    #[inline]
    fn relocate(&mut self, shift: PositionShift) {
        *self = self.shifted(shift);
    }
}

impl<T: Relocate> Relocate for Vec<T> {
    fn relocate(&mut self, shift: PositionShift) {
        for item in self {
            item.relocate(shift);
        }
    }
}

impl<T: Relocate> Relocate for Option<T> {
    fn relocate(&mut self, shift: PositionShift) {
        if let Some(inner) = self {
            inner.relocate(shift);
        }
    }
}

impl<T: Relocate> Relocate for Box<T> {
    fn relocate(&mut self, shift: PositionShift) {
        (**self).relocate(shift);
    }
}

/// Implement [`Relocate`] for a struct by relocating the listed fields.
macro_rules! relocate_fields {
    ($($ty:ty { $($field:ident),* $(,)? })*) => {
        $(
            impl Relocate for $ty {
                fn relocate(&mut self, shift: PositionShift) {
                    $( self.$field.relocate(shift); )*
                }
            }
        )*
    };
}

relocate_fields! {
    Ident { range }
    MetaComment { range }
    TypeExpr { kind, range }
    NamedType { name, args }
    TypeParam { name }
    Expr { kind, range }
    InterpolatedString { parts }
    InterpolatedPart { value }
    FormattedString { args }
    Identifier { name, indices, generics }
    Argument { name, value }
    StructLiteral { fields, range }
    Lambda { params, body }
    LambdaParam { ty, name, range }
    Stmt { kind, comment, range }
    Block { statements, end_comment, range }
    If { condition, body, else_ifs, else_branch, range }
    ElseIf { comment, condition, body }
    Else { comment, body }
    Switch { value, items, range }
    For { initializer, condition, iterator, body, range }
    While { condition, body, range }
    Foreach { ty, name, iterable, body, range }
    Return { value, range }
    RootContext { items, hooks, globalvar_reservations, playervar_reservations }
    Import { alias, range }
    Rule { order, settings, conditions, body, range }
    RuleSetting { setting, value, range }
    RuleCondition { comment, condition, range }
    Class { comment, name, type_params, inherits, declarations, constructors, range }
    Constructor { attributes, params, body, range }
    Enum { name, values, range }
    EnumValue { name, value, range }
    TypeAlias { name, ty, range }
    Attribute { range }
    VariableDeclaration { comment, attributes, ty, name, target, value, range }
    WorkshopTarget { targets, range }
    TargetVariable { indexer }
    FunctionDeclaration { comment, attributes, return_type, name, type_params, params, body, range }
    Hook { variable, value, range }
    Reservation { range }
    VariableCollection { items, range }
    LobbySettings { range }
    VanillaRule { sections, range }
    VanillaSection { items, range }
    VanillaItem { expr, range }
    VanillaExpr { kind, range }
}

impl Relocate for TypeKind {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            TypeKind::Void => {}
            TypeKind::Named(named) => named.relocate(shift),
            TypeKind::Pipe(left, right) => {
                left.relocate(shift);
                right.relocate(shift);
            }
            TypeKind::Lambda { params, ret, .. } => {
                params.relocate(shift);
                ret.relocate(shift);
            }
            TypeKind::Group { inner, .. } => inner.relocate(shift),
        }
    }
}

impl Relocate for ExprKind {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            ExprKind::Number(_)
            | ExprKind::Boolean(_)
            | ExprKind::Null
            | ExprKind::This
            | ExprKind::Root
            | ExprKind::String(_)
            | ExprKind::JsonImport(_)
            | ExprKind::Missing => {}
            ExprKind::InterpolatedString(interpolated) => interpolated.relocate(shift),
            ExprKind::FormattedString(formatted) => formatted.relocate(shift),
            ExprKind::Identifier(identifier) => identifier.relocate(shift),
            ExprKind::New { ty, args } => {
                ty.relocate(shift);
                args.relocate(shift);
            }
            ExprKind::Array(values) => values.relocate(shift),
            ExprKind::Async { expr, .. } | ExprKind::Group(expr) => expr.relocate(shift),
            ExprKind::StructLiteral(literal) => literal.relocate(shift),
            ExprKind::Lambda(lambda) => lambda.relocate(shift),
            ExprKind::TypeCast { ty, expr } => {
                ty.relocate(shift);
                expr.relocate(shift);
            }
            ExprKind::Unary { operand, .. } => operand.relocate(shift),
            ExprKind::Binary { lhs, rhs, .. } => {
                lhs.relocate(shift);
                rhs.relocate(shift);
            }
            ExprKind::Ternary {
                condition,
                consequent,
                alternative,
            } => {
                condition.relocate(shift);
                consequent.relocate(shift);
                alternative.relocate(shift);
            }
            ExprKind::Index { target, index } => {
                target.relocate(shift);
                index.relocate(shift);
            }
            ExprKind::Invoke { target, args } => {
                target.relocate(shift);
                args.relocate(shift);
            }
        }
    }
}

impl Relocate for StructField {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            StructField::Value {
                ty,
                name,
                value,
                range,
            } => {
                ty.relocate(shift);
                name.relocate(shift);
                value.relocate(shift);
                range.relocate(shift);
            }
            StructField::Spread { value, range } => {
                value.relocate(shift);
                range.relocate(shift);
            }
        }
    }
}

impl Relocate for StmtKind {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            StmtKind::Block(block) => block.relocate(shift),
            StmtKind::Expression(expr) | StmtKind::Delete(expr) => expr.relocate(shift),
            StmtKind::Assignment { target, value, .. } => {
                target.relocate(shift);
                value.relocate(shift);
            }
            StmtKind::Increment { target, .. } => target.relocate(shift),
            StmtKind::Declaration(declaration) => declaration.relocate(shift),
            StmtKind::If(node) => node.relocate(shift),
            StmtKind::Switch(node) => node.relocate(shift),
            StmtKind::For(node) => node.relocate(shift),
            StmtKind::While(node) => node.relocate(shift),
            StmtKind::Foreach(node) => node.relocate(shift),
            StmtKind::Return(node) => node.relocate(shift),
            StmtKind::Break | StmtKind::Continue => {}
        }
    }
}

impl Relocate for SwitchItem {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            SwitchItem::Case { value, range } => {
                value.relocate(shift);
                range.relocate(shift);
            }
            SwitchItem::Default { range } => range.relocate(shift),
            SwitchItem::Statement(stmt) => stmt.relocate(shift),
        }
    }
}

impl Relocate for RootItem {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            RootItem::Import(node) => node.relocate(shift),
            RootItem::Rule(node) => node.relocate(shift),
            RootItem::VanillaRule(node) => node.relocate(shift),
            RootItem::Class(node) => node.relocate(shift),
            RootItem::Enum(node) => node.relocate(shift),
            RootItem::TypeAlias(node) => node.relocate(shift),
            RootItem::Declaration(node) => node.relocate(shift),
            RootItem::VariableCollection(node) => node.relocate(shift),
            RootItem::LobbySettings(node) => node.relocate(shift),
        }
    }
}

impl Relocate for Declaration {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            Declaration::Variable(variable) => variable.relocate(shift),
            Declaration::Function(function) => function.relocate(shift),
        }
    }
}

impl Relocate for FunctionBody {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            FunctionBody::Macro(expr) => expr.relocate(shift),
            FunctionBody::Block { block, .. } => block.relocate(shift),
        }
    }
}

impl Relocate for CollectionItem {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            CollectionItem::Group(name) | CollectionItem::Variable { name, .. } => {
                name.relocate(shift);
            }
        }
    }
}

impl Relocate for VanillaExprKind {
    fn relocate(&mut self, shift: PositionShift) {
        match self {
            VanillaExprKind::Number(_)
            | VanillaExprKind::String(_)
            | VanillaExprKind::Symbol(_)
            | VanillaExprKind::Missing => {}
            VanillaExprKind::Group(inner) => inner.relocate(shift),
            VanillaExprKind::Invoke { target, args } => {
                target.relocate(shift);
                args.relocate(shift);
            }
            VanillaExprKind::Unary { operand, .. } => operand.relocate(shift),
            VanillaExprKind::Binary { lhs, rhs, .. } => {
                lhs.relocate(shift);
                rhs.relocate(shift);
            }
            VanillaExprKind::Ternary {
                condition,
                consequent,
                alternative,
            } => {
                condition.relocate(shift);
                consequent.relocate(shift);
                alternative.relocate(shift);
            }
            VanillaExprKind::Index { target, index } => {
                target.relocate(shift);
                index.relocate(shift);
            }
            VanillaExprKind::Assignment { target, value, .. } => {
                target.relocate(shift);
                value.relocate(shift);
            }
        }
    }
}
