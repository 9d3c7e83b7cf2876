//! Speculative lexer states layered over the committed token list.
//!
//! Every scan step pushes a [`LexerState`] whose [`LexerStateModification`]
//! says which slots of the token list its fresh tokens replace. Nothing
//! touches the list until the parser commits a prefix with
//! [`LexerStateManager::commit_through`]; until then a state can be popped
//! when the parser asks for the same token under another context.
//!
//! Slots index the token list buffer as it currently is. View indices
//! index the token stream the parser sees: the committed prefix, then the
//! pending batches, then (once resynchronized) the untouched old tail.

use std::ops::Range;

use ostw_ir::{ContextKind, TokenList, TokenNode};
use smallvec::SmallVec;
use tracing::debug;

/// Tokens produced by one scan step.
pub type TokenBatch = SmallVec<[TokenNode; 2]>;

/// A pending batch and the slots it overwrites.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerStateModification {
    pub tokens: TokenBatch,
    pub overwrite: Range<usize>,
}

impl LexerStateModification {
    fn empty_at(slot: usize) -> Self {
        LexerStateModification {
            tokens: TokenBatch::new(),
            overwrite: slot..slot,
        }
    }

    fn delta(&self) -> isize {
        signed(self.tokens.len()) - signed(self.overwrite.len())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexerState {
    /// Fresh tokens produced this session, up to and including this step.
    pub relex_span: usize,
    /// Old tokens below this slot are overwritten unconditionally.
    pub stop_relexing_at: usize,
    pub lex_completed: bool,
    /// Slot of the old token the lexer resynchronized with.
    pub resync_token: Option<usize>,
    pub context: ContextKind,
    /// View index just past this step's tokens.
    pub view_end: usize,
    pub modification: LexerStateModification,
}

impl LexerState {
    /// Next old token not yet overwritten.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.modification.overwrite.end
    }

    #[inline]
    pub fn view_start(&self) -> usize {
        self.view_end - self.modification.tokens.len()
    }

    fn shift_slots(&mut self, floor: usize, delta: isize) {
        let overwrite = &mut self.modification.overwrite;
        *overwrite = shift_slot(overwrite.start, floor, delta)..shift_slot(overwrite.end, floor, delta);
        self.stop_relexing_at = shift_slot(self.stop_relexing_at, floor, delta);
        self.resync_token = self.resync_token.map(|slot| shift_slot(slot, floor, delta));
    }
}

/// Move a slot at or past `floor` by `delta`. Slots below `floor` were
/// overwritten already and collapse onto it.
fn shift_slot(slot: usize, floor: usize, delta: isize) -> usize {
    slot.max(floor).saturating_add_signed(delta)
}

fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

/// The chain of pending states on top of the committed state.
#[derive(Clone, Debug)]
pub struct LexerStateManager {
    base: LexerState,
    states: Vec<LexerState>,
    /// Net change in list length from every commit so far.
    commit_shift: isize,
}

impl LexerStateManager {
    /// Start with `frontier` valid tokens, force-overwriting old tokens
    /// below `stop_relexing_at`.
    pub fn new(frontier: usize, stop_relexing_at: usize) -> Self {
        LexerStateManager {
            base: LexerState {
                relex_span: 0,
                stop_relexing_at,
                lex_completed: false,
                resync_token: None,
                context: ContextKind::Normal,
                view_end: frontier,
                modification: LexerStateModification::empty_at(frontier),
            },
            states: Vec::new(),
            commit_shift: 0,
        }
    }

    /// The most recent state.
    #[inline]
    pub fn current(&self) -> &LexerState {
        self.states.last().unwrap_or(&self.base)
    }

    #[inline]
    pub fn pending(&self) -> &[LexerState] {
        &self.states
    }

    /// Number of committed tokens at the front of the list.
    #[inline]
    pub fn frontier(&self) -> usize {
        self.base.view_end
    }

    /// View length of the committed and pending tokens.
    #[inline]
    pub fn fresh_len(&self) -> usize {
        self.current().view_end
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.current().lex_completed
    }

    #[inline]
    pub fn commit_shift(&self) -> isize {
        self.commit_shift
    }

    /// Index of the pending state holding view index `index`.
    pub fn state_containing(&self, index: usize) -> Option<usize> {
        let state = self.states.partition_point(|s| s.view_end <= index);
        (state < self.states.len() && self.states[state].view_start() <= index).then_some(state)
    }

    /// Record a freshly scanned batch.
    ///
    /// Old tokens below the stop slot, and old tokens starting before the
    /// batch, are overwritten. If the old tokens right after that equal the
    /// batch (context included) the lexer has resynchronized and the rest
    /// of the old list is kept.
    pub fn push_batch(
        &mut self,
        tokens: &TokenList,
        batch: TokenBatch,
        context: ContextKind,
        min_resync_index: usize,
    ) {
        let current = self.current();
        let prev = current.cursor();
        let mut stop = current.stop_relexing_at;
        let view_start = current.view_end;
        let relex_span = current.relex_span + batch.len();
        let first_start = batch.first().map_or(0, |t| t.range().start.index);

        let old = tokens.as_slice();
        let mut cursor = prev;
        while cursor < old.len()
            && (cursor < stop || old[cursor].range().start.index < first_start)
        {
            cursor += 1;
        }

        let resynced = !batch.is_empty()
            && cursor >= stop
            && first_start >= min_resync_index
            && old[cursor..].starts_with(&batch);

        let state = if resynced {
            debug!(slot = cursor, relex_span, "lexer resynchronized");
            LexerState {
                relex_span,
                stop_relexing_at: stop,
                lex_completed: true,
                resync_token: Some(cursor),
                context,
                view_end: view_start,
                modification: LexerStateModification {
                    tokens: TokenBatch::new(),
                    overwrite: prev..cursor,
                },
            }
        } else {
            stop = stop.max(cursor);
            LexerState {
                relex_span,
                stop_relexing_at: stop,
                lex_completed: false,
                resync_token: None,
                context,
                view_end: view_start + batch.len(),
                modification: LexerStateModification {
                    tokens: batch,
                    overwrite: prev..cursor,
                },
            }
        };
        self.states.push(state);
    }

    /// End of input: every remaining old token goes.
    pub fn push_end_of_input(&mut self, old_len: usize, context: ContextKind) {
        let current = self.current();
        let state = LexerState {
            relex_span: current.relex_span,
            stop_relexing_at: current.stop_relexing_at,
            lex_completed: true,
            resync_token: None,
            context,
            view_end: current.view_end,
            modification: LexerStateModification {
                tokens: TokenBatch::new(),
                overwrite: current.cursor()..old_len.max(current.cursor()),
            },
        };
        self.states.push(state);
    }

    /// Turn the old tokens between the resync slot and `slot` back into
    /// pending states so scanning can resume at `slot`.
    ///
    /// Each reopened token gets a state of its own, so any of them can be
    /// rolled back individually.
    pub fn rematerialize(&mut self, tokens: &TokenList, slot: usize) {
        let Some(resync) = self.current().resync_token else {
            return;
        };
        debug!(from = resync, to = slot, "reopening resynchronized tokens");
        self.push_reopened(resync, None);
        for (offset, token) in tokens.as_slice()[resync..slot].iter().enumerate() {
            self.push_reopened(resync + offset, Some(token.clone()));
        }
    }

    fn push_reopened(&mut self, slot: usize, token: Option<TokenNode>) {
        let current = self.current();
        let end = slot + usize::from(token.is_some());
        let state = LexerState {
            relex_span: current.relex_span,
            stop_relexing_at: current.stop_relexing_at,
            lex_completed: false,
            resync_token: None,
            context: token.as_ref().map_or(current.context, |t| t.context),
            view_end: current.view_end + end - slot,
            modification: LexerStateModification {
                tokens: token.into_iter().collect(),
                overwrite: slot..end,
            },
        };
        self.states.push(state);
    }

    /// Give up every token from view index `index` on, so scanning resumes
    /// there. Only valid while nothing has been committed past `index`.
    pub fn reopen_from(&mut self, index: usize) {
        debug!(
            index,
            frontier = self.frontier(),
            popped = self.states.len(),
            "reopening carried-over tokens"
        );
        self.states.clear();
        self.base.lex_completed = false;
        self.base.resync_token = None;
        self.base.view_end = index;
        self.base.modification = LexerStateModification::empty_at(index);
    }

    /// Pop pending state `state` and everything after it.
    pub fn rollback_to(&mut self, state: usize) {
        debug!(
            state,
            popped = self.states.len().saturating_sub(state),
            "discarding lexer states"
        );
        self.states.truncate(state);
    }

    /// Apply, in order, every pending state whose tokens all lie below view
    /// index `index`.
    pub fn commit_through(&mut self, tokens: &mut TokenList, index: usize) {
        let count = self.states.partition_point(|s| s.view_end <= index);
        if count == 0 {
            return;
        }
        // One at a time: applying a state shifts the slots of the rest.
        for _ in 0..count {
            let state = self.states.remove(0);
            self.apply(tokens, state);
        }
    }

    pub fn commit_all(&mut self, tokens: &mut TokenList) {
        self.commit_through(tokens, usize::MAX);
    }

    fn apply(&mut self, tokens: &mut TokenList, state: LexerState) {
        let LexerState {
            relex_span,
            mut stop_relexing_at,
            lex_completed,
            mut resync_token,
            context,
            view_end,
            modification,
        } = state;
        let delta = modification.delta();
        let floor = modification.overwrite.end;
        let frontier = modification.overwrite.start + modification.tokens.len();

        stop_relexing_at = shift_slot(stop_relexing_at, floor, delta);
        resync_token = resync_token.map(|slot| shift_slot(slot, floor, delta));
        tokens.splice(modification.overwrite, modification.tokens);

        for pending in &mut self.states {
            pending.shift_slots(floor, delta);
        }
        self.commit_shift += delta;
        self.base = LexerState {
            relex_span,
            stop_relexing_at,
            lex_completed,
            resync_token,
            context,
            view_end,
            modification: LexerStateModification::empty_at(frontier),
        };
    }
}

#[cfg(test)]
mod tests;
