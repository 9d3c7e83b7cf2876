//! Workshop vocabulary used by the embedded-literal and settings contexts.
//!
//! Workshop names contain spaces (`Event Player`, `Ongoing - Each Player`),
//! so they are matched by walking a character trie instead of by splitting
//! on word boundaries. Runs of spaces and tabs in the source match a single
//! space in the trie.

use rustc_hash::FxHashMap;

use crate::scanner::Scanner;

/// Characters that end a workshop term.
pub(crate) const STRUCTURE_CHARS: &[char] = &[
    '(', ')', '{', '}', '[', ']', ',', ';', ':', '.', '!', '=', '<', '>', '+', '-', '*', '/', '%',
    '^', '?', '&', '|', '"', '\'',
];

#[inline]
pub(crate) fn is_structure_char(c: char) -> bool {
    STRUCTURE_CHARS.contains(&c)
}

#[inline]
fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, usize>,
    terminal: bool,
}

/// A set of workshop names.
#[derive(Clone, Debug)]
pub struct SymbolTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for SymbolTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTrie {
    pub fn new() -> Self {
        SymbolTrie {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Add a name. Inner whitespace runs are stored as one space.
    pub fn insert(&mut self, word: &str) {
        let mut node = 0;
        for c in normalize(word).chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, child);
                    child
                }
            };
        }
        if node != 0 && !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.len += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut node = 0;
        for c in normalize(word).chars() {
            match self.nodes[node].children.get(&c) {
                Some(&child) => node = child,
                None => return false,
            }
        }
        self.nodes[node].terminal
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest name starting at the scanner that ends on a term boundary.
    ///
    /// Returns the scanner advanced past the name. A name followed directly
    /// by more term characters (`Small Messages`) does not match.
    pub(crate) fn longest_match<'a>(&self, scanner: Scanner<'a>) -> Option<Scanner<'a>> {
        let mut walker = scanner;
        let mut node = 0;
        let mut candidates: Vec<Scanner<'a>> = Vec::new();

        while let Some(c) = walker.current() {
            let key = if is_inline_space(c) { ' ' } else { c };
            let Some(&child) = self.nodes[node].children.get(&key) else {
                break;
            };
            if key == ' ' {
                walker.eat_while(is_inline_space);
            } else {
                walker.advance();
            }
            node = child;
            if self.nodes[node].terminal {
                candidates.push(walker);
            }
        }

        candidates
            .into_iter()
            .rev()
            .find(|candidate| at_end_of_term(candidate))
    }
}

impl<'w> FromIterator<&'w str> for SymbolTrie {
    fn from_iter<T: IntoIterator<Item = &'w str>>(iter: T) -> Self {
        let mut trie = SymbolTrie::new();
        for word in iter {
            trie.insert(word);
        }
        trie
    }
}

fn normalize(word: &str) -> String {
    word.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn at_end_of_term(scanner: &Scanner<'_>) -> bool {
    match scanner.current() {
        None => true,
        Some(c) => c.is_whitespace() || is_structure_char(c),
    }
}

/// Workshop names known to the lexer, shared read-only between sessions.
#[derive(Clone, Debug)]
pub struct VanillaSymbols {
    /// Values and actions usable in workshop rules and variable lists.
    pub script_symbols: SymbolTrie,
    /// Names usable inside `settings { }`.
    pub lobby_settings: SymbolTrie,
}

impl VanillaSymbols {
    pub fn new(script_symbols: SymbolTrie, lobby_settings: SymbolTrie) -> Self {
        VanillaSymbols {
            script_symbols,
            lobby_settings,
        }
    }

    /// No workshop names; every workshop word lexes as a free-form symbol.
    pub fn empty() -> Self {
        Self::new(SymbolTrie::new(), SymbolTrie::new())
    }
}

/// A core catalog covering the common event, value and action names.
/// Language servers inject the full localized catalog instead.
impl Default for VanillaSymbols {
    fn default() -> Self {
        Self::new(
            CORE_SCRIPT_SYMBOLS.iter().copied().collect(),
            CORE_LOBBY_SETTINGS.iter().copied().collect(),
        )
    }
}

const CORE_SCRIPT_SYMBOLS: &[&str] = &[
    "Ongoing - Global",
    "Ongoing - Each Player",
    "Player Earned Elimination",
    "Player Dealt Damage",
    "Player Took Damage",
    "Player Died",
    "All",
    "All Teams",
    "Team 1",
    "Team 2",
    "Slot 0",
    "Global",
    "Event Player",
    "Attacker",
    "Victim",
    "True",
    "False",
    "Null",
    "Compare",
    "Number",
    "Vector",
    "Is Alive",
    "Has Spawned",
    "Is Game In Progress",
    "Count Of",
    "All Players",
    "Wait",
    "Ignore Condition",
    "Abort When False",
    "Abort",
    "Loop",
    "Loop If",
    "Skip",
    "Skip If",
    "Small Message",
    "Big Message",
    "Set Global Variable",
    "Set Player Variable",
    "Modify Global Variable",
    "Modify Player Variable",
    "Add",
    "Subtract",
    "Call Subroutine",
    "Start Rule",
    "Do Nothing",
    "Restart Match",
];

const CORE_LOBBY_SETTINGS: &[&str] = &[
    "Main",
    "Lobby",
    "Modes",
    "Heroes",
    "General",
    "All",
    "Description",
    "Mode Name",
    "Game Mode Start",
    "Max Team 1 Players",
    "Max Team 2 Players",
    "Max Spectators",
    "Match Voice Chat",
    "Return To Lobby",
    "Team Deathmatch",
    "Deathmatch",
    "Skirmish",
    "Elimination",
    "Control",
    "Enabled Maps",
    "Disabled Maps",
    "Enabled Heroes",
    "Disabled Heroes",
    "Team 1",
    "Team 2",
    "On",
    "Off",
    "Enabled",
    "Disabled",
];

#[cfg(test)]
mod tests;
