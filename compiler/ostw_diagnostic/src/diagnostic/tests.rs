use super::*;
use ostw_ir::{Position, TokenKind};
use pretty_assertions::assert_eq;

fn range(start: usize, end: usize) -> DocRange {
    DocRange::new(Position::new(start, 0, start), Position::new(end, 0, end))
}

#[test]
fn test_builder_sets_fields() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("boom")
        .at(range(2, 4));
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "boom");
    assert_eq!(diag.range, range(2, 4));
    assert!(diag.is_error());
    assert!(!Diagnostic::warning(ErrorCode::E1001).is_error());
}

#[test]
fn test_expected_token_names_found_token() {
    let found = Token::new("foo", range(0, 3), TokenKind::Identifier);
    let diag = expected_token("`;`", &found);
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.message, "expected `;`, got `foo`");
    assert_eq!(diag.range, range(0, 3));
}

#[test]
fn test_expected_token_at_end_of_file() {
    let found = Token::new("", range(5, 5), TokenKind::Eof);
    assert_eq!(expected_token("`}`", &found).message, "expected `}`, got end of file");
}

#[test]
fn test_unexpected_unknown_character_uses_lexer_code() {
    let found = Token::new("¤", range(0, 2), TokenKind::Unknown);
    let diag = unexpected_token(&found);
    assert_eq!(diag.code, ErrorCode::E0002);
    assert_eq!(diag.message, "unknown character `¤`");
}

#[test]
fn test_lexical_error_codes() {
    assert_eq!(
        lexical_error(LexError::MissingFractionalPart, range(0, 4)).code,
        ErrorCode::E0003
    );
    assert_eq!(
        lexical_error(LexError::MissingIntegerPart, range(0, 2)).code,
        ErrorCode::E0004
    );
    assert_eq!(
        lexical_error(LexError::UnterminatedString, range(0, 2)).code,
        ErrorCode::E0001
    );
}

#[test]
fn test_display_is_one_based() {
    let diag = missing_ternary_hand(range(3, 4), ':');
    assert_eq!(
        diag.to_string(),
        "error[E1004] 1:4: missing `:` of ternary expression"
    );
}
