//! Core diagnostic type and the constructors the parser reports through.

use ostw_ir::{DocRange, LexError, Token, TokenKind};
use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem found in the document.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    /// Where the problem is. A point range marks a missing element.
    pub range: DocRange,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            range: DocRange::default(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the document range.
    pub fn at(mut self, range: DocRange) -> Self {
        self.range = range;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.range.start, self.message
        )
    }
}

/// Human-readable name of a token for messages.
fn describe_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of file".to_string(),
        TokenKind::Identifier
        | TokenKind::Number
        | TokenKind::WorkshopConstant
        | TokenKind::WorkshopSymbol
        | TokenKind::Unknown => format!("`{}`", token.text),
        kind => kind.describe().to_string(),
    }
}

/// "expected X, got Y" at the token that was found instead.
#[cold]
pub fn expected_token(expected: &str, found: &Token) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1003)
        .with_message(format!("expected {expected}, got {}", describe_token(found)))
        .at(found.range)
}

/// A token that cannot start anything at this point.
///
/// Characters the lexer did not recognize get their own code.
#[cold]
pub fn unexpected_token(found: &Token) -> Diagnostic {
    if found.kind == TokenKind::Unknown {
        return Diagnostic::error(ErrorCode::E0002)
            .with_message(format!("unknown character {}", describe_token(found)))
            .at(found.range);
    }
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected {}", describe_token(found)))
        .at(found.range)
}

#[cold]
pub fn invalid_expression_term(found: &Token) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1002)
        .with_message(format!(
            "invalid expression term {}",
            describe_token(found)
        ))
        .at(found.range)
}

/// A `?` without its `:` (or the reverse).
#[cold]
pub fn missing_ternary_hand(range: DocRange, missing: char) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1004)
        .with_message(format!("missing `{missing}` of ternary expression"))
        .at(range)
}

#[cold]
pub fn missing_interpolation_terminator(range: DocRange) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1005)
        .with_message("interpolated string is missing its terminator")
        .at(range)
}

/// Surface a soft lexical error attached to a token.
#[cold]
pub fn lexical_error(error: LexError, range: DocRange) -> Diagnostic {
    let code = match error {
        LexError::UnterminatedString => ErrorCode::E0001,
        LexError::MissingFractionalPart => ErrorCode::E0003,
        LexError::MissingIntegerPart => ErrorCode::E0004,
    };
    Diagnostic::error(code).with_message(error.to_string()).at(range)
}

#[cfg(test)]
mod tests;
