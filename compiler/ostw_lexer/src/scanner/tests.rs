use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_advance_tracks_lines_and_columns() {
    let mut scanner = Scanner::new("ab\ncé", Position::ZERO);
    scanner.eat_str("ab");
    assert_eq!(scanner.position(), Position::new(2, 0, 2));
    scanner.advance();
    assert_eq!(scanner.position(), Position::new(3, 1, 0));
    scanner.advance();
    scanner.advance();
    // `é` is two bytes but one column
    assert_eq!(scanner.position(), Position::new(6, 1, 2));
    assert!(scanner.is_eof());
}

#[test]
fn test_skip_trivia_handles_comments() {
    let mut scanner = Scanner::new("  // line\n /* block\n */ x", Position::ZERO);
    scanner.skip_trivia();
    assert_eq!(scanner.current(), Some('x'));
    assert_eq!(scanner.position().line, 2);
}

#[test]
fn test_unterminated_block_comment_runs_to_end() {
    let mut scanner = Scanner::new("/* never closed", Position::ZERO);
    scanner.skip_trivia();
    assert!(scanner.is_eof());
}

#[test]
fn test_token_text_spans_from_mark() {
    let mut scanner = Scanner::new("  abc def", Position::ZERO);
    scanner.skip_trivia();
    scanner.mark();
    scanner.eat_while(is_identifier_char);
    let token = scanner.token(TokenKind::Identifier);
    assert_eq!(token.text, "abc");
    assert_eq!(token.range.start.index, 2);
    assert_eq!(token.range.end.index, 5);
}
