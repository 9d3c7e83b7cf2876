use super::*;
use ostw_ir::{ParserSettings, SourceText};
use ostw_lexer::VanillaSymbols;
use pretty_assertions::assert_eq;

fn cursor<'s>(source: &'s SourceText, symbols: &'s VanillaSymbols) -> TokenCursor<'s> {
    let lexer = LexController::new(source.as_str(), ParserSettings::default(), symbols);
    TokenCursor::new(lexer, source.end_position())
}

#[test]
fn test_advance_walks_tokens_then_eof() {
    let source = SourceText::new("a = 1;");
    let symbols = VanillaSymbols::empty();
    let mut cursor = cursor(&source, &symbols);

    let mut kinds = Vec::new();
    while let Some(node) = cursor.advance() {
        kinds.push(node.kind());
    }
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Semicolon
        ]
    );
    assert!(cursor.is_at_end());
    assert_eq!(cursor.current_kind(), TokenKind::Eof);
    assert_eq!(cursor.current_range().start.index, 6);
    assert_eq!(cursor.previous_range().start.index, 5);
}

#[test]
fn test_peek_extends_horizon() {
    let source = SourceText::new("a b c d");
    let symbols = VanillaSymbols::empty();
    let mut cursor = cursor(&source, &symbols);

    let saved = cursor.begin_horizon(0);
    assert_eq!(saved, 0);
    assert_eq!(cursor.peek_kind(2), TokenKind::Identifier);
    assert_eq!(cursor.horizon(), 3);
    assert_eq!(cursor.peek_kind(9), TokenKind::Eof);
    assert_eq!(cursor.horizon(), 10);

    cursor.begin_horizon(1);
    cursor.extend_horizon(4);
    assert_eq!(cursor.horizon(), 4);
}

#[test]
fn test_context_stack_changes_scanning() {
    let source = SourceText::new("Event Player");
    let symbols = VanillaSymbols::default();
    let mut cursor = cursor(&source, &symbols);

    assert_eq!(cursor.current_kind(), TokenKind::Identifier);
    cursor.push_context(ContextKind::EmbeddedLiteral);
    assert_eq!(cursor.context_depth(), 1);
    assert_eq!(cursor.current_kind(), TokenKind::WorkshopConstant);
    cursor.pop_context();
    assert_eq!(cursor.context(), ContextKind::Normal);
    assert_eq!(cursor.current().text, "Event");
}

#[test]
fn test_previous_range_before_first_token() {
    let source = SourceText::new("x");
    let symbols = VanillaSymbols::empty();
    let cursor = cursor(&source, &symbols);
    assert_eq!(cursor.previous_range(), DocRange::point(Position::ZERO));
}
