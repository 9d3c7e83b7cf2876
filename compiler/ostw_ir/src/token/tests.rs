use super::*;
use crate::Position;

fn node(start: usize, end: usize, kind: TokenKind) -> TokenNode {
    let range = DocRange::new(Position::new(start, 0, start), Position::new(end, 0, end));
    TokenNode::new(Token::new("x", range, kind), ContextKind::Normal)
}

#[test]
fn test_expression_starts() {
    assert!(TokenKind::Identifier.is_start_of_expression());
    assert!(TokenKind::Minus.is_start_of_expression());
    assert!(TokenKind::LessThan.is_start_of_expression());
    assert!(!TokenKind::Semicolon.is_start_of_expression());
    assert!(!TokenKind::If.is_start_of_expression());
}

#[test]
fn test_statement_starts_include_expressions_and_keywords() {
    assert!(TokenKind::If.is_start_of_statement());
    assert!(TokenKind::Number.is_start_of_statement());
    assert!(TokenKind::Public.is_start_of_statement());
    assert!(!TokenKind::CloseCurly.is_start_of_statement());
}

#[test]
fn test_skippable_excludes_closers_and_starts() {
    assert!(TokenKind::Unknown.is_skippable());
    assert!(TokenKind::Comma.is_skippable());
    assert!(!TokenKind::CloseParen.is_skippable());
    assert!(!TokenKind::Semicolon.is_skippable());
    assert!(!TokenKind::Identifier.is_skippable());
    assert!(!TokenKind::Rule.is_skippable());
}

#[test]
fn test_assignment_operators() {
    for kind in [
        TokenKind::Equal,
        TokenKind::PlusEqual,
        TokenKind::MinusEqual,
        TokenKind::MultiplyEqual,
        TokenKind::DivideEqual,
        TokenKind::ModuloEqual,
        TokenKind::HatEqual,
    ] {
        assert!(kind.is_assignment_operator(), "{kind:?}");
    }
    assert!(!TokenKind::EqualEqual.is_assignment_operator());
}

#[test]
fn test_keyword_table_has_no_duplicates() {
    for (i, (text, _)) in KEYWORDS.iter().enumerate() {
        assert!(
            KEYWORDS[i + 1..].iter().all(|(other, _)| other != text),
            "duplicate keyword {text}"
        );
    }
}

#[test]
fn test_quote_style_flags() {
    assert_eq!(QuoteStyle::from_flags(QuoteStyle::Single.flags()), QuoteStyle::Single);
    assert_eq!(QuoteStyle::from_flags(TokenFlags::empty()), QuoteStyle::Double);
    assert_eq!(QuoteStyle::Single.delimiter(), '\'');
}

#[test]
fn test_first_overlap() {
    let ok: TokenList = [
        node(0, 2, TokenKind::Identifier),
        node(2, 3, TokenKind::Semicolon),
        node(5, 6, TokenKind::Identifier),
    ]
    .into_iter()
    .collect();
    assert_eq!(ok.first_overlap(), None);

    let bad: TokenList = [
        node(0, 3, TokenKind::Identifier),
        node(2, 3, TokenKind::Semicolon),
    ]
    .into_iter()
    .collect();
    assert_eq!(bad.first_overlap(), Some(0));
}

#[test]
fn test_splice_replaces_range() {
    let mut list: TokenList = (0..4).map(|i| node(i, i + 1, TokenKind::Identifier)).collect();
    list.splice(1..3, [node(1, 3, TokenKind::Number)]);
    assert_eq!(list.len(), 3);
    assert_eq!(list[1].kind(), TokenKind::Number);
    assert_eq!(list[2].range().start.index, 3);
}

#[test]
fn test_shifted_node_keeps_text_and_context() {
    let original = node(4, 6, TokenKind::Identifier);
    let moved = original.shifted(crate::PositionShift { index: 3, line: 1 });
    assert_eq!(moved.range().start, Position::new(7, 1, 4));
    assert_eq!(moved.text(), original.text());
    assert_eq!(moved.context, original.context);
}
