use super::*;
use ostw_ir::{DocRange, Position, Token, TokenKind};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

fn node(text: &str, at: usize) -> TokenNode {
    let range = DocRange::new(
        Position::new(at, 0, at),
        Position::new(at + text.len(), 0, at + text.len()),
    );
    TokenNode::new(Token::new(text, range, TokenKind::Identifier), ContextKind::Normal)
}

fn list(tokens: &[(&str, usize)]) -> TokenList {
    tokens.iter().map(|&(text, at)| node(text, at)).collect()
}

fn texts(tokens: &TokenList) -> Vec<&str> {
    tokens.iter().map(TokenNode::text).collect()
}

#[test]
fn test_fresh_batches_append_on_commit() {
    let mut tokens = TokenList::new();
    let mut states = LexerStateManager::new(0, 0);
    states.push_batch(&tokens, smallvec![node("a", 0)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 0);
    assert_eq!(states.frontier(), 0);
    assert_eq!(states.fresh_len(), 2);
    assert!(tokens.is_empty());

    states.commit_all(&mut tokens);
    assert_eq!(texts(&tokens), vec!["a", "b"]);
    assert_eq!(states.frontier(), 2);
    assert!(states.pending().is_empty());
}

#[test]
fn test_matching_old_token_resynchronizes() {
    let mut tokens = list(&[("a", 0), ("b", 2), ("c", 4)]);
    let mut states = LexerStateManager::new(0, 1);
    states.push_batch(&tokens, smallvec![node("x", 0)], ContextKind::Normal, 2);
    assert_eq!(states.current().modification.overwrite, 0..1);
    assert!(!states.is_completed());

    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 2);
    assert!(states.is_completed());
    assert_eq!(states.current().resync_token, Some(1));
    assert_eq!(states.fresh_len(), 1);

    states.commit_all(&mut tokens);
    assert_eq!(texts(&tokens), vec!["x", "b", "c"]);
    assert_eq!(states.commit_shift(), 0);
}

#[test]
fn test_no_resync_before_min_index() {
    let tokens = list(&[("a", 0), ("b", 2), ("c", 4)]);
    let mut states = LexerStateManager::new(0, 1);
    states.push_batch(&tokens, smallvec![node("x", 0)], ContextKind::Normal, 3);
    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 3);
    assert!(!states.is_completed());
    assert_eq!(states.fresh_len(), 2);
    assert_eq!(states.current().modification.overwrite, 1..1);
}

#[test]
fn test_context_is_part_of_the_match() {
    let tokens = list(&[("a", 0), ("b", 2)]);
    let mut states = LexerStateManager::new(1, 1);
    let mut workshop = node("b", 2);
    workshop.context = ContextKind::EmbeddedLiteral;
    states.push_batch(&tokens, smallvec![workshop], ContextKind::EmbeddedLiteral, 0);
    assert!(!states.is_completed());
}

#[test]
fn test_rollback_discards_later_states() {
    let tokens = TokenList::new();
    let mut states = LexerStateManager::new(0, 0);
    states.push_batch(&tokens, smallvec![node("a", 0)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("c", 4)], ContextKind::Normal, 0);
    assert_eq!(states.state_containing(1), Some(1));

    states.rollback_to(1);
    assert_eq!(states.pending().len(), 1);
    assert_eq!(states.fresh_len(), 1);
    assert_eq!(states.state_containing(1), None);
}

#[test]
fn test_partial_commit_shifts_pending_slots() {
    let mut tokens = list(&[("a", 0), ("b", 2), ("c", 4), ("d", 6)]);
    let mut states = LexerStateManager::new(0, 3);
    states.push_batch(&tokens, smallvec![node("x", 0)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("y", 2)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("d", 6)], ContextKind::Normal, 0);
    assert_eq!(states.current().resync_token, Some(3));

    states.commit_through(&mut tokens, 1);
    assert_eq!(texts(&tokens), vec!["x", "d"]);
    assert_eq!(states.commit_shift(), -2);
    assert_eq!(states.frontier(), 1);
    assert_eq!(states.pending()[0].modification.overwrite, 1..1);
    assert_eq!(states.current().resync_token, Some(1));

    states.commit_all(&mut tokens);
    assert_eq!(texts(&tokens), vec!["x", "y", "d"]);
    assert_eq!(states.commit_shift(), -1);
}

#[test]
fn test_end_of_input_drops_old_tail() {
    let mut tokens = list(&[("a", 0), ("b", 2), ("c", 4)]);
    let mut states = LexerStateManager::new(1, 1);
    states.push_end_of_input(tokens.len(), ContextKind::Normal);
    assert!(states.is_completed());
    assert_eq!(states.current().resync_token, None);

    states.commit_all(&mut tokens);
    assert_eq!(texts(&tokens), vec!["a"]);
}

#[test]
fn test_rematerialize_reopens_tail_one_token_at_a_time() {
    let mut tokens = list(&[("a", 0), ("b", 2), ("c", 4)]);
    let mut states = LexerStateManager::new(0, 1);
    states.push_batch(&tokens, smallvec![node("x", 0)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 0);
    assert!(states.is_completed());

    states.rematerialize(&tokens, 2);
    assert!(!states.is_completed());
    assert_eq!(states.fresh_len(), 2);
    assert_eq!(states.current().modification.overwrite, 1..2);
    assert_eq!(states.state_containing(1), Some(3));

    states.commit_all(&mut tokens);
    assert_eq!(texts(&tokens), vec!["x", "b", "c"]);
}

#[test]
fn test_rematerialize_at_resync_slot_only_reopens_scanning() {
    let tokens = list(&[("a", 0), ("b", 2)]);
    let mut states = LexerStateManager::new(0, 1);
    states.push_batch(&tokens, smallvec![node("x", 0)], ContextKind::Normal, 0);
    states.push_batch(&tokens, smallvec![node("b", 2)], ContextKind::Normal, 0);

    states.rematerialize(&tokens, 1);
    assert!(!states.is_completed());
    assert_eq!(states.fresh_len(), 1);
    assert_eq!(states.current().cursor(), 1);
}
