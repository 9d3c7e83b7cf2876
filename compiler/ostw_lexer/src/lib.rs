//! Context-sensitive, incremental lexer for OSTW scripts.
//!
//! Which tokens a piece of text produces depends on where it appears:
//! workshop rule bodies, lobby settings and interpolated strings each have
//! their own rules. The parser therefore drives the lexer through a
//! [`LexController`], asking for each token in the context it expects.
//!
//! # Layout
//!
//! - `scanner`: position tracking over the source text
//! - `matcher`: the per-context token rules
//! - `symbols`: workshop symbol catalogs
//! - `affected`: which old tokens an edit invalidates
//! - `state`: pending scan steps layered over the token list
//! - `controller`: the parser-facing driver

mod affected;
mod context;
mod controller;
mod matcher;
mod scanner;
mod state;
mod symbols;

pub use affected::{compute_affected_area, AffectedAreaInfo};
pub use context::LexContext;
pub use controller::{LexController, LexerIncrementalChange, ResyncPoint};
pub use matcher::{Match, Matcher, Matches};
pub use state::{LexerState, LexerStateManager, LexerStateModification, TokenBatch};
pub use symbols::{SymbolTrie, VanillaSymbols};

use ostw_ir::{ParserSettings, TextEdit, TokenList};

/// Lex a whole document in the normal context.
pub fn lex(source: &str, settings: ParserSettings, symbols: &VanillaSymbols) -> TokenList {
    LexController::new(source, settings, symbols).finish()
}

/// Lex an edited document in the normal context, reusing `previous` where
/// the edit left it intact.
pub fn relex(
    source: &str,
    settings: ParserSettings,
    symbols: &VanillaSymbols,
    previous: TokenList,
    edit: &TextEdit,
) -> TokenList {
    let change = LexerIncrementalChange::new(previous, edit);
    LexController::incremental(source, settings, symbols, change).finish()
}
