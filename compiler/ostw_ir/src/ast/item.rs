//! Top-level elements and declarations.

use super::{Block, Expr, Ident, MetaComment, Stmt, TypeExpr, TypeParam, VanillaRule};
use crate::DocRange;

/// The parsed document.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RootContext {
    pub items: Vec<RootItem>,
    pub hooks: Vec<Hook>,
    pub globalvar_reservations: Vec<Reservation>,
    pub playervar_reservations: Vec<Reservation>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum RootItem {
    Import(Import),
    Rule(Rule),
    VanillaRule(VanillaRule),
    Class(Class),
    Enum(Enum),
    TypeAlias(TypeAlias),
    Declaration(Declaration),
    VariableCollection(VariableCollection),
    LobbySettings(LobbySettings),
}

/// `import "file" [as name];`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Import {
    pub file: Option<String>,
    pub alias: Option<Ident>,
    pub range: DocRange,
}

/// `[disabled] rule: "name" [order] Setting.Value* [if (cond)]* body`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Rule {
    pub disabled: bool,
    pub name: Option<String>,
    pub order: Option<Expr>,
    pub settings: Vec<RuleSetting>,
    pub conditions: Vec<RuleCondition>,
    pub body: Box<Stmt>,
    pub range: DocRange,
}

/// `Event.OngoingPlayer`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RuleSetting {
    pub setting: Ident,
    pub value: Ident,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RuleCondition {
    pub comment: Option<MetaComment>,
    pub condition: Expr,
    pub range: DocRange,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClassKind {
    Class,
    Struct,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Class {
    pub comment: Option<MetaComment>,
    pub single: bool,
    pub kind: ClassKind,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub inherits: Vec<TypeExpr>,
    pub declarations: Vec<Declaration>,
    pub constructors: Vec<Constructor>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Constructor {
    pub attributes: Vec<Attribute>,
    pub params: Vec<VariableDeclaration>,
    pub subroutine: Option<String>,
    pub body: Block,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Enum {
    pub name: Ident,
    pub values: Vec<EnumValue>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumValue {
    pub name: Ident,
    pub value: Option<Expr>,
    pub range: DocRange,
}

/// `type Name = Type;`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeAlias {
    pub name: Ident,
    pub ty: TypeExpr,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Declaration {
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AttributeKind {
    Public,
    Private,
    Protected,
    Static,
    Override,
    Virtual,
    Recursive,
    GlobalVar,
    PlayerVar,
    Ref,
    In,
    Persist,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VariableDeclaration {
    pub comment: Option<MetaComment>,
    pub attributes: Vec<Attribute>,
    pub ty: TypeExpr,
    pub name: Ident,
    /// Assigned workshop variable id.
    pub workshop_id: Option<String>,
    /// `!` extended collection marker.
    pub extended: bool,
    pub target: Option<WorkshopTarget>,
    pub value: Option<Expr>,
    /// The value was given with `:` instead of `=`.
    pub is_macro: bool,
    pub range: DocRange,
}

/// `{"a"[0], "b"[..]}`: workshop variables a declaration is bound to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WorkshopTarget {
    pub targets: Vec<TargetVariable>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TargetVariable {
    pub name: String,
    /// `None` entries are `[..]` spreads.
    pub indexer: Vec<Option<Expr>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FunctionDeclaration {
    pub comment: Option<MetaComment>,
    pub attributes: Vec<Attribute>,
    pub return_type: TypeExpr,
    pub name: Ident,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<VariableDeclaration>,
    pub body: FunctionBody,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FunctionBody {
    /// `: value;`
    Macro(Expr),
    Block {
        subroutine: Option<Subroutine>,
        block: Block,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SubroutineScope {
    Global,
    Player,
}

/// `[globalvar|playervar] "Name" [: "Target"]` before a function body.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Subroutine {
    pub scope: Option<SubroutineScope>,
    pub name: Option<String>,
    pub target: Option<String>,
}

/// `a.b = value;` at the top level.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Hook {
    pub variable: Expr,
    pub value: Expr,
    pub range: DocRange,
}

/// A reserved workshop variable name or index.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Reservation {
    pub text: String,
    pub range: DocRange,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CollectionKind {
    Variables,
    Subroutines,
}

/// `variables { global: 0: name ... }`
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VariableCollection {
    pub kind: CollectionKind,
    pub items: Vec<CollectionItem>,
    pub range: DocRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CollectionItem {
    Group(Ident),
    Variable { id: String, name: Ident },
}

/// `settings { ... }`, kept as a raw token run.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LobbySettings {
    pub token_count: usize,
    pub range: DocRange,
}
