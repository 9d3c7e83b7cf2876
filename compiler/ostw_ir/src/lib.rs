//! Shared types for the OSTW front end.
//!
//! - Positions and ranges ([`Position`], [`DocRange`], [`PositionShift`])
//! - Document versions and edits ([`SourceText`], [`TextEdit`])
//! - Tokens ([`Token`], [`TokenNode`], [`TokenList`])
//! - The syntax tree ([`ast`])
//! - Parser configuration ([`ParserSettings`])

pub mod ast;
mod position;
mod settings;
mod source;
pub mod token;

pub use position::{DocRange, Position, PositionShift};
pub use settings::{DeclarationKeyword, ParserSettings};
pub use source::{EditError, SourceText, TextEdit};
pub use token::{
    ContextKind, LexError, QuoteStyle, Token, TokenFlags, TokenKind, TokenList, TokenNode,
    KEYWORDS, WORKSHOP_KEYWORDS,
};
