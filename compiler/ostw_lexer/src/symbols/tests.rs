use super::*;
use ostw_ir::Position;
use pretty_assertions::assert_eq;

fn matched(trie: &SymbolTrie, source: &str) -> Option<String> {
    trie.longest_match(Scanner::new(source, Position::ZERO))
        .map(|end| source[..end.position().index].to_string())
}

#[test]
fn test_insert_normalizes_whitespace() {
    let trie: SymbolTrie = ["Event  Player", "Global"].into_iter().collect();
    assert_eq!(trie.len(), 2);
    assert!(trie.contains("Event Player"));
    assert!(!trie.contains("Event"));
}

#[test]
fn test_longest_match_prefers_longer_names() {
    let trie: SymbolTrie = ["Event", "Event Player"].into_iter().collect();
    assert_eq!(matched(&trie, "Event Player)"), Some("Event Player".to_string()));
    assert_eq!(matched(&trie, "Event Was)"), Some("Event".to_string()));
}

#[test]
fn test_whitespace_runs_match_single_space() {
    let trie: SymbolTrie = ["Event Player"].into_iter().collect();
    assert_eq!(
        matched(&trie, "Event \t Player;"),
        Some("Event \t Player".to_string())
    );
}

#[test]
fn test_no_match_inside_a_word() {
    let trie: SymbolTrie = ["Small Message"].into_iter().collect();
    assert_eq!(matched(&trie, "Small Messages()"), None);
    assert_eq!(matched(&trie, "Small Message()"), Some("Small Message".to_string()));
}

#[test]
fn test_default_catalog_is_populated() {
    let symbols = VanillaSymbols::default();
    assert!(symbols.script_symbols.contains("Ongoing - Each Player"));
    assert!(symbols.lobby_settings.contains("Max Team 1 Players"));
    assert!(VanillaSymbols::empty().script_symbols.is_empty());
}
