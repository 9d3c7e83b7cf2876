//! Lexical contexts.

use ostw_ir::{ContextKind, QuoteStyle};

use crate::symbols::{SymbolTrie, VanillaSymbols};

/// The rule set the matcher applies at a position, with the vocabulary
/// that rule set needs.
#[derive(Clone, Copy, Debug)]
pub enum LexContext<'s> {
    Normal,
    /// Workshop rules and variable collections, matched against script
    /// symbols.
    EmbeddedLiteral(&'s SymbolTrie),
    /// Lobby settings, matched against setting names.
    SettingsLiteral(&'s SymbolTrie),
    /// Right after the `}` that closes an interpolation hole.
    InterpolatedString(QuoteStyle),
}

impl<'s> LexContext<'s> {
    pub fn resolve(kind: ContextKind, symbols: &'s VanillaSymbols) -> Self {
        match kind {
            ContextKind::Normal => LexContext::Normal,
            ContextKind::EmbeddedLiteral => LexContext::EmbeddedLiteral(&symbols.script_symbols),
            ContextKind::SettingsLiteral => LexContext::SettingsLiteral(&symbols.lobby_settings),
            ContextKind::InterpolatedString(quote) => LexContext::InterpolatedString(quote),
        }
    }

    pub fn kind(&self) -> ContextKind {
        match self {
            LexContext::Normal => ContextKind::Normal,
            LexContext::EmbeddedLiteral(_) => ContextKind::EmbeddedLiteral,
            LexContext::SettingsLiteral(_) => ContextKind::SettingsLiteral,
            LexContext::InterpolatedString(quote) => ContextKind::InterpolatedString(*quote),
        }
    }
}
