//! Parser checkpoints for speculative parsing.
//!
//! OSTW needs unbounded lookahead in several places: telling a declaration
//! from an expression statement, a lambda from a parenthesized expression,
//! a type cast from a formatted string. The parser runs the real grammar
//! ahead of the cursor and then rewinds.
//!
//! # Lookahead
//!
//! [`Parser::look_ahead`] takes a checkpoint, switches diagnostic
//! recording off, runs the probe, and restores everything. Probes nest:
//! each one restores the recording flag it found. While recording is off
//! the parser also skips captures, reuse and lexer commits, so a probe
//! leaves no trace besides the tokens it caused to be scanned.
//!
//! ```text
//! let is_cast = self.look_ahead(|p| {
//!     p.advance();
//!     p.parse_type_checked().valid && p.check(TokenKind::GreaterThan)
//! });
//! ```
//!
//! # Design Notes
//!
//! A checkpoint only holds the cursor position, the depth of the lexer
//! context stack and the recording flag. Nodes built during a probe are
//! simply dropped.

use crate::Parser;

/// A lightweight snapshot of parser state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    /// Position in the token stream.
    pub(crate) position: usize,
    /// Number of lexer contexts pushed.
    pub(crate) context_depth: usize,
    /// Whether diagnostics were being recorded.
    pub(crate) recording: bool,
}

impl Parser<'_> {
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.cursor.position(),
            context_depth: self.cursor.context_depth(),
            recording: self.diagnostics.is_recording(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor.set_position(checkpoint.position);
        self.cursor.truncate_contexts(checkpoint.context_depth);
        self.diagnostics.set_recording(checkpoint.recording);
    }

    /// Run `probe` without consuming tokens or reporting anything.
    pub(crate) fn look_ahead<T>(&mut self, probe: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        self.diagnostics.set_recording(false);
        let result = probe(self);
        self.restore(checkpoint);
        result
    }

    /// Whether diagnostics, captures and commits are live.
    #[inline]
    pub(crate) fn is_recording(&self) -> bool {
        self.diagnostics.is_recording()
    }
}
