//! Diagnostics produced while lexing and parsing OSTW scripts.
//!
//! - [`ErrorCode`]: stable identifiers, first digit is the phase
//! - [`Diagnostic`]: code, severity, message and the document range
//! - [`DiagnosticCollector`]: the per-session sink that drops overlapping
//!   errors and ignores everything reported while a lookahead is running
//!
//! Syntax errors are never fatal. The parser records a diagnostic, builds a
//! placeholder node and keeps going.

mod collector;
mod diagnostic;
mod error_code;

pub use collector::{DiagnosticCollector, DiagnosticConfig};
pub use diagnostic::{
    expected_token, invalid_expression_term, lexical_error, missing_interpolation_terminator,
    missing_ternary_hand, unexpected_token, Diagnostic, Severity,
};
pub use error_code::ErrorCode;
