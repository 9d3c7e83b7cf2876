//! On-demand lexing driven by the parser.
//!
//! The parser asks for tokens by index together with the context it expects
//! them in. Tokens are scanned lazily; a token that was scanned under a
//! different context is thrown away and rescanned. After an edit the
//! controller starts at the affected area and stops scanning as soon as a
//! fresh token equals an old one at a point past the edit, keeping the
//! rest of the old list.

use ostw_ir::{ContextKind, ParserSettings, Position, TextEdit, TokenList, TokenNode};
use tracing::{debug, trace};

use crate::affected::{compute_affected_area, AffectedAreaInfo};
use crate::context::LexContext;
use crate::matcher::Matcher;
use crate::state::{LexerStateManager, TokenBatch};
use crate::symbols::VanillaSymbols;

/// The previous token list prepared for an edit.
#[derive(Clone, Debug)]
pub struct LexerIncrementalChange {
    /// The previous tokens, with every token after the affected area moved
    /// to its post-edit position.
    pub tokens: TokenList,
    pub affected: AffectedAreaInfo,
    /// Fresh tokens starting before this offset never resynchronize.
    pub stop_lexing_at_index: usize,
    pub initial_token_count: usize,
}

impl LexerIncrementalChange {
    pub fn new(mut previous: TokenList, edit: &TextEdit) -> Self {
        let affected = compute_affected_area(&previous, edit);
        let initial_token_count = previous.len();
        let shift = edit.shift();
        previous.update_from(affected.end(), |token| *token = token.shifted(shift));
        let stop_lexing_at_index = previous
            .get(affected.end())
            .map_or(0, |t| t.range().start.index)
            .max(edit.new_end_index());
        LexerIncrementalChange {
            tokens: previous,
            affected,
            stop_lexing_at_index,
            initial_token_count,
        }
    }

    /// Index of the first token that has to be rescanned.
    #[inline]
    pub fn change_start_token(&self) -> usize {
        self.affected.starting_token_index
    }
}

/// Where the old tail resumes after resynchronization.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ResyncPoint {
    /// Index, in the previous token list, of the first reused token.
    pub old_index: usize,
    /// Added to an old index at or past `old_index` to get its new index.
    pub delta: isize,
}

impl ResyncPoint {
    #[inline]
    pub fn new_index(&self, old_index: usize) -> usize {
        old_index.saturating_add_signed(self.delta)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Located {
    Committed,
    Pending { state: usize, offset: usize },
    Tail(usize),
    Unscanned,
}

pub struct LexController<'s> {
    matcher: Matcher<'s>,
    symbols: &'s VanillaSymbols,
    tokens: TokenList,
    states: LexerStateManager,
    change_start: Option<usize>,
    min_resync_index: usize,
    /// Tokens below this view index were committed by the parser.
    committed: usize,
    scanned: usize,
}

impl<'s> LexController<'s> {
    /// Lex `source` from scratch.
    pub fn new(source: &'s str, settings: ParserSettings, symbols: &'s VanillaSymbols) -> Self {
        LexController {
            matcher: Matcher::new(source, settings),
            symbols,
            tokens: TokenList::new(),
            states: LexerStateManager::new(0, 0),
            change_start: None,
            min_resync_index: 0,
            committed: 0,
            scanned: 0,
        }
    }

    /// Relex the edited `source`, reusing what `change` keeps of the
    /// previous tokens.
    pub fn incremental(
        source: &'s str,
        settings: ParserSettings,
        symbols: &'s VanillaSymbols,
        change: LexerIncrementalChange,
    ) -> Self {
        let AffectedAreaInfo {
            starting_token_index,
            ..
        } = change.affected;
        debug!(
            start = starting_token_index,
            stop = change.affected.end(),
            old_len = change.initial_token_count,
            min_resync = change.stop_lexing_at_index,
            "incremental lex"
        );
        LexController {
            matcher: Matcher::new(source, settings),
            symbols,
            tokens: change.tokens,
            states: LexerStateManager::new(starting_token_index, change.affected.end()),
            change_start: Some(starting_token_index),
            min_resync_index: change.stop_lexing_at_index,
            committed: 0,
            scanned: 0,
        }
    }

    /// The token at `index` as seen in context `kind`, scanning as far as
    /// needed. `None` past the end of the document.
    ///
    /// Tokens the parser committed are returned as they are. Tokens kept
    /// from the previous list in front of the edit were scanned for another
    /// parse, so a context mismatch there rescans from that index.
    pub fn scan_token_at(&mut self, index: usize, kind: ContextKind) -> Option<&TokenNode> {
        loop {
            match self.locate(index) {
                Located::Committed => {
                    if index >= self.committed && self.tokens[index].context != kind {
                        self.reopen_prefix(index);
                        continue;
                    }
                    break;
                }
                Located::Pending { state, offset } => {
                    let context = self.states.pending()[state].modification.tokens[offset].context;
                    if offset == 0 && context != kind {
                        self.states.rollback_to(state);
                        continue;
                    }
                    break;
                }
                Located::Tail(slot) => {
                    if self.tokens[slot].context == kind {
                        break;
                    }
                    self.states.rematerialize(&self.tokens, slot);
                }
                Located::Unscanned => {
                    if self.states.is_completed() {
                        break;
                    }
                    self.scan_next(kind);
                }
            }
        }
        self.token_at(index)
    }

    /// The token at `index` if it has been scanned or kept.
    pub fn token_at(&self, index: usize) -> Option<&TokenNode> {
        match self.locate(index) {
            Located::Committed => self.tokens.get(index),
            Located::Pending { state, offset } => {
                self.states.pending()[state].modification.tokens.get(offset)
            }
            Located::Tail(slot) => self.tokens.get(slot),
            Located::Unscanned => None,
        }
    }

    /// Commit every pending token before `index`. The parser will not ask
    /// for them under another context again.
    pub fn progress_to(&mut self, index: usize) {
        self.committed = self.committed.max(index);
        self.states.commit_through(&mut self.tokens, index);
    }

    /// Scan the rest of the document in the normal context and return the
    /// final token list.
    pub fn finish(mut self) -> TokenList {
        while !self.states.is_completed() {
            self.scan_next(ContextKind::Normal);
        }
        self.states.commit_all(&mut self.tokens);
        debug!(
            tokens = self.tokens.len(),
            scanned = self.scanned,
            "lexing finished"
        );
        self.tokens
    }

    #[inline]
    pub fn is_lex_completed(&self) -> bool {
        self.states.is_completed()
    }

    /// First token index the edit may have changed. `None` for a full lex.
    #[inline]
    pub fn change_start(&self) -> Option<usize> {
        self.change_start
    }

    /// Where the old tail resumed, once the lexer has resynchronized.
    pub fn resync_point(&self) -> Option<ResyncPoint> {
        let slot = self.states.current().resync_token?;
        let old_index = slot.checked_add_signed(-self.states.commit_shift())?;
        let fresh = isize::try_from(self.states.fresh_len()).ok()?;
        let slot = isize::try_from(slot).ok()?;
        Some(ResyncPoint {
            old_index,
            delta: fresh + self.states.commit_shift() - slot,
        })
    }

    /// Tokens produced by the matcher so far.
    #[inline]
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Drop the kept prefix from `index` on. Everything from there is
    /// treated as changed by the edit.
    fn reopen_prefix(&mut self, index: usize) {
        self.states.reopen_from(index);
        self.change_start = self.change_start.map(|start| start.min(index));
    }

    fn locate(&self, index: usize) -> Located {
        if index < self.states.frontier() {
            return Located::Committed;
        }
        if let Some(state) = self.states.state_containing(index) {
            let offset = index - self.states.pending()[state].view_start();
            return Located::Pending { state, offset };
        }
        let fresh = self.states.fresh_len();
        match self.states.current().resync_token {
            Some(resync) if index >= fresh => {
                let slot = resync + (index - fresh);
                if slot < self.tokens.len() {
                    Located::Tail(slot)
                } else {
                    Located::Unscanned
                }
            }
            _ => Located::Unscanned,
        }
    }

    fn scan_next(&mut self, kind: ContextKind) {
        let fresh = self.states.fresh_len();
        let position = fresh
            .checked_sub(1)
            .and_then(|last| self.token_at(last))
            .map_or(Position::ZERO, |t| t.range().end);

        let context = LexContext::resolve(kind, self.symbols);
        match self.matcher.match_one(position, context) {
            Some(matches) => {
                let batch: TokenBatch = matches
                    .into_iter()
                    .map(|m| TokenNode::new(m.token, kind).with_error(m.error))
                    .collect();
                self.scanned += batch.len();
                trace!(index = fresh, count = batch.len(), ?kind, "scanned");
                self.states
                    .push_batch(&self.tokens, batch, kind, self.min_resync_index);
            }
            None => self.states.push_end_of_input(self.tokens.len(), kind),
        }
    }
}
