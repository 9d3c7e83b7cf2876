use ostw_diagnostic::ErrorCode;
use ostw_ir::ast::AttributeKind;
use ostw_ir::{ParserSettings, SourceText, TokenKind};
use ostw_lexer::VanillaSymbols;
use pretty_assertions::assert_eq;

use super::unquote;
use crate::Parser;

fn with_parser<T>(source: &str, run: impl FnOnce(&mut Parser<'_>) -> T) -> (T, Vec<ErrorCode>) {
    let source = SourceText::new(source);
    let symbols = VanillaSymbols::empty();
    let mut parser = Parser::new(&source, ParserSettings::default(), &symbols);
    let value = run(&mut parser);
    let codes = parser.diagnostics.iter().map(|d| d.code).collect();
    (value, codes)
}

fn numbers(parser: &mut Parser<'_>) -> Vec<String> {
    parser.parse_delimited_list(
        TokenKind::CloseParen,
        |p| p.check(TokenKind::Number),
        |p| p.advance().map(|token| token.text).unwrap_or_default(),
    )
}

#[test]
fn test_unquote() {
    assert_eq!(unquote("\"text\""), "text");
    assert_eq!(unquote("'text'"), "text");
    assert_eq!(unquote("\"open"), "open");
    assert_eq!(unquote("\""), "");
    assert_eq!(unquote(""), "");
}

#[test]
fn test_delimited_list() {
    let (values, codes) = with_parser("1, 2, 3)", numbers);
    assert_eq!(values, vec!["1", "2", "3"]);
    assert!(codes.is_empty());
}

#[test]
fn test_delimited_list_missing_comma() {
    let (values, codes) = with_parser("1, 2 3)", numbers);
    assert_eq!(values, vec!["1", "2", "3"]);
    assert_eq!(codes, vec![ErrorCode::E1003]);
}

#[test]
fn test_delimited_list_skips_stray_tokens() {
    let (values, codes) = with_parser("1, + 2)", numbers);
    assert_eq!(values, vec!["1", "2"]);
    assert_eq!(codes, vec![ErrorCode::E1001]);
}

#[test]
fn test_delimited_list_stops_at_closer() {
    let ((values, next), codes) = with_parser("1 ; 2)", |p| {
        let values = numbers(p);
        (values, p.current_kind())
    });
    assert_eq!(values, vec!["1"]);
    assert_eq!(next, TokenKind::Semicolon);
    assert_eq!(codes, vec![ErrorCode::E1003]);
}

#[test]
fn test_delimited_list_missing_element() {
    let (values, _) = with_parser("1, )", |p| {
        p.parse_delimited_list_or(
            TokenKind::CloseParen,
            |p| p.check(TokenKind::Number),
            |p| p.advance().map(|token| token.text).unwrap_or_default(),
            |_| Some("missing".to_string()),
        )
    });
    assert_eq!(values, vec!["1", "missing"]);
}

#[test]
fn test_parse_list_until_terminator() {
    let ((values, next), codes) = with_parser("1 2 + 3 }", |p| {
        let values = p.parse_list(
            |p| p.check(TokenKind::CloseCurly),
            |p| p.check(TokenKind::Number),
            |p| p.advance().map(|token| token.text).unwrap_or_default(),
        );
        (values, p.current_kind())
    });
    assert_eq!(values, vec!["1", "2", "3"]);
    assert_eq!(next, TokenKind::CloseCurly);
    assert_eq!(codes, vec![ErrorCode::E1001]);
}

#[test]
fn test_meta_comment_lines() {
    let ((comment, next), codes) = with_parser("# one\n# two\nx", |p| {
        let comment = p.parse_meta_comment();
        (comment, p.current_kind())
    });
    assert!(codes.is_empty());
    let Some(comment) = comment else {
        panic!("expected a comment");
    };
    assert_eq!(comment.lines, vec!["# one".to_string(), "# two".to_string()]);
    assert_eq!(comment.range.start.index, 0);
    assert_eq!(next, TokenKind::Identifier);
}

#[test]
fn test_optional_with_meta_comment() {
    let (found, _) = with_parser("# why\nif", |p| {
        p.parse_optional_with_meta_comment(TokenKind::If)
    });
    let Some(Some(comment)) = found else {
        panic!("expected `if` with a comment");
    };
    assert_eq!(comment.lines.len(), 1);

    let ((found, next), _) = with_parser("# why\nwhile", |p| {
        let found = p.parse_optional_with_meta_comment(TokenKind::If);
        (found, p.current_kind())
    });
    assert!(found.is_none());
    assert_eq!(next, TokenKind::ActionComment);
}

#[test]
fn test_attributes() {
    let (attributes, codes) = with_parser("public static globalvar Number", |p| {
        p.parse_attributes()
    });
    assert!(codes.is_empty());
    let kinds: Vec<_> = attributes.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AttributeKind::Public, AttributeKind::Static, AttributeKind::GlobalVar]
    );
    assert_eq!(attributes[1].range.start.index, 7);
}

#[test]
fn test_string_value() {
    let (value, codes) = with_parser("\"Main\"", |p| p.parse_string_value());
    assert_eq!(value.as_deref(), Some("Main"));
    assert!(codes.is_empty());

    let (value, codes) = with_parser("Main", |p| p.parse_string_value());
    assert!(value.is_none());
    assert_eq!(codes, vec![ErrorCode::E1003]);
}
