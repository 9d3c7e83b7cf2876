//! Tokens produced by the lexer.
//!
//! - [`Token`]: an immutable lexeme (`text`, `range`, `kind`, `flags`)
//! - [`TokenNode`]: a token plus the lexical context that produced it and
//!   any soft lexical error
//! - [`TokenList`]: the ordered, non-overlapping token stream of a document

mod kind;
mod list;

use std::fmt;

pub use kind::{TokenKind, KEYWORDS, WORKSHOP_KEYWORDS};
pub use list::TokenList;

use crate::DocRange;

bitflags::bitflags! {
    /// Variant information orthogonal to [`TokenKind`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct TokenFlags: u8 {
        /// String delimited by `'` instead of `"`.
        const SINGLE_QUOTES = 1 << 0;
    }
}

/// Quote style of a string literal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    #[inline]
    pub fn delimiter(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    #[inline]
    pub fn flags(self) -> TokenFlags {
        match self {
            QuoteStyle::Single => TokenFlags::SINGLE_QUOTES,
            QuoteStyle::Double => TokenFlags::empty(),
        }
    }

    #[inline]
    pub fn from_flags(flags: TokenFlags) -> Self {
        if flags.contains(TokenFlags::SINGLE_QUOTES) {
            QuoteStyle::Single
        } else {
            QuoteStyle::Double
        }
    }
}

/// Which lexical context produced a token.
///
/// The lexer's context type carries borrowed data (symbol catalogs); this
/// is its plain, comparable tag.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextKind {
    #[default]
    Normal,
    /// Workshop rule bodies and variable collections.
    EmbeddedLiteral,
    /// Lobby settings blocks.
    SettingsLiteral,
    /// Continuation of an interpolated string after a `}`.
    InterpolatedString(QuoteStyle),
}

/// A soft lexical error. The token is still produced.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LexError {
    /// `123.`
    MissingFractionalPart,
    /// `.5`
    MissingIntegerPart,
    /// A string with no closing quote before the end of the document.
    UnterminatedString,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::MissingFractionalPart => f.write_str("number is missing its fractional part"),
            LexError::MissingIntegerPart => f.write_str("number is missing its integer part"),
            LexError::UnterminatedString => f.write_str("unterminated string"),
        }
    }
}

/// A lexeme.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub text: String,
    pub range: DocRange,
    pub kind: TokenKind,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(text: impl Into<String>, range: DocRange, kind: TokenKind) -> Self {
        Token {
            text: text.into(),
            range,
            kind,
            flags: TokenFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A token in a [`TokenList`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenNode {
    pub token: Token,
    pub context: ContextKind,
    pub error: Option<LexError>,
}

impl TokenNode {
    pub fn new(token: Token, context: ContextKind) -> Self {
        TokenNode {
            token,
            context,
            error: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: Option<LexError>) -> Self {
        self.error = error;
        self
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    #[inline]
    pub fn range(&self) -> DocRange {
        self.token.range
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.token.text
    }

    #[inline]
    #[must_use]
    pub fn shifted(&self, shift: crate::PositionShift) -> TokenNode {
        let mut node = self.clone();
        node.token.range = node.token.range.shifted(shift);
        node
    }
}

#[cfg(test)]
mod tests;
