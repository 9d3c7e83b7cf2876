//! Token kinds and the classification predicates the parser leans on.

use std::fmt;

/// The kind of a lexed token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals and names
    Identifier,
    Number,
    String,
    /// `$"..."` with no holes.
    InterpolatedString,
    /// `$"...{`
    InterpolatedStringHead,
    /// `}...{`
    InterpolatedStringMiddle,
    /// `}..."`
    InterpolatedStringTail,
    /// `# ...` up to the end of the line.
    ActionComment,

    // Brackets and punctuation
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenSquare,
    CloseSquare,
    Colon,
    QuestionMark,
    Semicolon,
    Dot,
    Comma,
    Arrow,
    Spread,
    Squiggle,
    Pipe,
    At,

    // Operators
    Exclamation,
    NotEqual,
    EqualEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Hat,
    PlusPlus,
    MinusMinus,

    // Assignment
    Equal,
    PlusEqual,
    MinusEqual,
    MultiplyEqual,
    DivideEqual,
    ModuloEqual,
    HatEqual,

    // Keywords
    Import,
    For,
    While,
    Foreach,
    In,
    Rule,
    Disabled,
    True,
    False,
    Null,
    If,
    Else,
    Break,
    Continue,
    Return,
    Switch,
    Case,
    Default,
    Class,
    Struct,
    Enum,
    New,
    Delete,
    /// The untyped declaration keyword (`define` or `var`).
    Define,
    Void,
    Public,
    Private,
    Protected,
    Static,
    Override,
    Virtual,
    Recursive,
    GlobalVar,
    PlayerVar,
    Persist,
    Ref,
    This,
    Root,
    Async,
    Constructor,
    As,
    Type,
    Single,
    Const,
    Json,

    // Workshop sections
    WorkshopVariables,
    WorkshopSubroutines,
    WorkshopSettings,
    WorkshopEvent,
    WorkshopConditions,
    WorkshopActions,
    /// A name found in the injected workshop symbol catalog.
    WorkshopConstant,
    /// Free-form workshop text.
    WorkshopSymbol,

    /// A character no rule accepts.
    Unknown,
    /// Past the last token. Never stored in a token list.
    Eof,
}

impl TokenKind {
    /// Can this token begin an expression?
    pub fn is_start_of_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::InterpolatedString
                | TokenKind::InterpolatedStringHead
                | TokenKind::At
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Root
                | TokenKind::New
                | TokenKind::Async
                | TokenKind::Single
                | TokenKind::Import
                | TokenKind::Define
                | TokenKind::OpenParen
                | TokenKind::OpenSquare
                | TokenKind::OpenCurly
                | TokenKind::LessThan
                | TokenKind::Exclamation
                | TokenKind::Minus
        )
    }

    /// Can this token begin a statement?
    pub fn is_start_of_statement(self) -> bool {
        self.is_start_of_expression()
            || self.is_attribute()
            || matches!(
                self,
                TokenKind::If
                    | TokenKind::For
                    | TokenKind::While
                    | TokenKind::Foreach
                    | TokenKind::Switch
                    | TokenKind::Return
                    | TokenKind::Break
                    | TokenKind::Continue
                    | TokenKind::Delete
                    | TokenKind::Void
                    | TokenKind::Const
                    | TokenKind::ActionComment
            )
    }

    /// Tokens an error-recovering list may skip over while looking for
    /// the next element.
    pub fn is_skippable(self) -> bool {
        !matches!(
            self,
            TokenKind::CloseCurly
                | TokenKind::CloseParen
                | TokenKind::CloseSquare
                | TokenKind::Semicolon
                | TokenKind::Eof
        ) && !self.is_start_of_statement()
            && !self.is_root_keyword()
    }

    /// Can this token begin a type?
    pub fn is_start_of_type(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Define
                | TokenKind::Void
                | TokenKind::Const
                | TokenKind::OpenParen
        )
    }

    /// Can this token appear between the angle brackets of type arguments?
    pub fn is_part_of_type_args(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Define
                | TokenKind::Void
                | TokenKind::Const
                | TokenKind::Single
                | TokenKind::Comma
                | TokenKind::OpenSquare
                | TokenKind::CloseSquare
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::Arrow
                | TokenKind::Pipe
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::PlusEqual
                | TokenKind::MinusEqual
                | TokenKind::MultiplyEqual
                | TokenKind::DivideEqual
                | TokenKind::ModuloEqual
                | TokenKind::HatEqual
        )
    }

    /// Declaration attributes (`public`, `static`, ...).
    pub fn is_attribute(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Static
                | TokenKind::Override
                | TokenKind::Virtual
                | TokenKind::Recursive
                | TokenKind::GlobalVar
                | TokenKind::PlayerVar
                | TokenKind::Ref
                | TokenKind::In
                | TokenKind::Persist
        )
    }

    /// Keywords that only open top-level elements.
    pub fn is_root_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Rule
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Type
                | TokenKind::WorkshopVariables
                | TokenKind::WorkshopSubroutines
                | TokenKind::WorkshopSettings
        )
    }

    /// Can this token begin a workshop (embedded literal) expression?
    pub fn is_workshop_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::WorkshopConstant
                | TokenKind::WorkshopSymbol
                | TokenKind::OpenParen
                | TokenKind::Exclamation
                | TokenKind::Minus
        )
    }

    /// Human-readable description used in "expected X" diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::InterpolatedString
            | TokenKind::InterpolatedStringHead
            | TokenKind::InterpolatedStringMiddle
            | TokenKind::InterpolatedStringTail => "interpolated string",
            TokenKind::ActionComment => "action comment",
            TokenKind::OpenCurly => "'{'",
            TokenKind::CloseCurly => "'}'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenSquare => "'['",
            TokenKind::CloseSquare => "']'",
            TokenKind::Colon => "':'",
            TokenKind::QuestionMark => "'?'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Arrow => "'=>'",
            TokenKind::Spread => "'..'",
            TokenKind::Squiggle => "'~'",
            TokenKind::Pipe => "'|'",
            TokenKind::At => "'@'",
            TokenKind::Exclamation => "'!'",
            TokenKind::NotEqual => "'!='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::LessThan => "'<'",
            TokenKind::LessThanOrEqual => "'<='",
            TokenKind::GreaterThan => "'>'",
            TokenKind::GreaterThanOrEqual => "'>='",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::Modulo => "'%'",
            TokenKind::Hat => "'^'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::Equal => "'='",
            TokenKind::PlusEqual => "'+='",
            TokenKind::MinusEqual => "'-='",
            TokenKind::MultiplyEqual => "'*='",
            TokenKind::DivideEqual => "'/='",
            TokenKind::ModuloEqual => "'%='",
            TokenKind::HatEqual => "'^='",
            TokenKind::Import => "'import'",
            TokenKind::For => "'for'",
            TokenKind::While => "'while'",
            TokenKind::Foreach => "'foreach'",
            TokenKind::In => "'in'",
            TokenKind::Rule => "'rule'",
            TokenKind::Disabled => "'disabled'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Return => "'return'",
            TokenKind::Switch => "'switch'",
            TokenKind::Case => "'case'",
            TokenKind::Default => "'default'",
            TokenKind::Class => "'class'",
            TokenKind::Struct => "'struct'",
            TokenKind::Enum => "'enum'",
            TokenKind::New => "'new'",
            TokenKind::Delete => "'delete'",
            TokenKind::Define => "declaration keyword",
            TokenKind::Void => "'void'",
            TokenKind::Public => "'public'",
            TokenKind::Private => "'private'",
            TokenKind::Protected => "'protected'",
            TokenKind::Static => "'static'",
            TokenKind::Override => "'override'",
            TokenKind::Virtual => "'virtual'",
            TokenKind::Recursive => "'recursive'",
            TokenKind::GlobalVar => "'globalvar'",
            TokenKind::PlayerVar => "'playervar'",
            TokenKind::Persist => "'persist'",
            TokenKind::Ref => "'ref'",
            TokenKind::This => "'this'",
            TokenKind::Root => "'root'",
            TokenKind::Async => "'async'",
            TokenKind::Constructor => "'constructor'",
            TokenKind::As => "'as'",
            TokenKind::Type => "'type'",
            TokenKind::Single => "'single'",
            TokenKind::Const => "'const'",
            TokenKind::Json => "'json'",
            TokenKind::WorkshopVariables => "'variables'",
            TokenKind::WorkshopSubroutines => "'subroutines'",
            TokenKind::WorkshopSettings => "'settings'",
            TokenKind::WorkshopEvent => "'event'",
            TokenKind::WorkshopConditions => "'conditions'",
            TokenKind::WorkshopActions => "'actions'",
            TokenKind::WorkshopConstant => "workshop constant",
            TokenKind::WorkshopSymbol => "workshop symbol",
            TokenKind::Unknown => "unknown character",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Keywords of the normal context, in match order. The untyped
/// declaration keyword is configurable and lives in `ParserSettings`.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("import", TokenKind::Import),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("foreach", TokenKind::Foreach),
    ("in", TokenKind::In),
    ("rule", TokenKind::Rule),
    ("disabled", TokenKind::Disabled),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("return", TokenKind::Return),
    ("switch", TokenKind::Switch),
    ("case", TokenKind::Case),
    ("default", TokenKind::Default),
    ("class", TokenKind::Class),
    ("struct", TokenKind::Struct),
    ("enum", TokenKind::Enum),
    ("new", TokenKind::New),
    ("delete", TokenKind::Delete),
    ("void", TokenKind::Void),
    ("public", TokenKind::Public),
    ("private", TokenKind::Private),
    ("protected", TokenKind::Protected),
    ("static", TokenKind::Static),
    ("override", TokenKind::Override),
    ("virtual", TokenKind::Virtual),
    ("recursive", TokenKind::Recursive),
    ("globalvar", TokenKind::GlobalVar),
    ("playervar", TokenKind::PlayerVar),
    ("persist", TokenKind::Persist),
    ("ref", TokenKind::Ref),
    ("this", TokenKind::This),
    ("root", TokenKind::Root),
    ("async", TokenKind::Async),
    ("constructor", TokenKind::Constructor),
    ("as", TokenKind::As),
    ("type", TokenKind::Type),
    ("single", TokenKind::Single),
    ("const", TokenKind::Const),
    ("json", TokenKind::Json),
    ("variables", TokenKind::WorkshopVariables),
    ("subroutines", TokenKind::WorkshopSubroutines),
    ("settings", TokenKind::WorkshopSettings),
];

/// Section keywords of workshop rules.
pub const WORKSHOP_KEYWORDS: &[(&str, TokenKind)] = &[
    ("actions", TokenKind::WorkshopActions),
    ("conditions", TokenKind::WorkshopConditions),
    ("event", TokenKind::WorkshopEvent),
];
