//! Token cursor over the on-demand lexer.
//!
//! The parser never sees a finished token list. Each token is requested
//! from the [`LexController`] in whatever context sits on top of the
//! cursor's context stack, so the same text can read as a C-style token
//! in a rule body and as a workshop constant inside a vanilla rule.

use ostw_ir::{ContextKind, DocRange, Position, Token, TokenKind, TokenList, TokenNode};
use ostw_lexer::{LexController, ResyncPoint};

/// Cursor for navigating tokens.
///
/// Also tracks the lookahead horizon: one past the furthest token index
/// any lookup has requested. Captures record it so a reused node is only
/// trusted when nothing it looked at has changed.
pub struct TokenCursor<'s> {
    lexer: LexController<'s>,
    pos: usize,
    contexts: Vec<ContextKind>,
    /// Synthetic end-of-file token at the end of the document.
    eof: Token,
    horizon: usize,
}

impl<'s> TokenCursor<'s> {
    /// Create a cursor at the first token. `end` is the document's end
    /// position, where the end-of-file token sits.
    pub fn new(lexer: LexController<'s>, end: Position) -> Self {
        TokenCursor {
            lexer,
            pos: 0,
            contexts: Vec::new(),
            eof: Token::new("", DocRange::point(end), TokenKind::Eof),
            horizon: 0,
        }
    }

    /// The context new tokens are requested in.
    #[inline]
    pub fn context(&self) -> ContextKind {
        self.contexts.last().copied().unwrap_or_default()
    }

    pub fn push_context(&mut self, context: ContextKind) {
        self.contexts.push(context);
    }

    pub fn pop_context(&mut self) {
        self.contexts.pop();
    }

    #[inline]
    pub fn context_depth(&self) -> usize {
        self.contexts.len()
    }

    /// Drop contexts pushed after the stack had `depth` entries.
    pub fn truncate_contexts(&mut self, depth: usize) {
        self.contexts.truncate(depth);
    }

    /// The token `offset` places ahead, scanned in the current context.
    pub fn token(&mut self, offset: usize) -> Option<&TokenNode> {
        let index = self.pos + offset;
        self.horizon = self.horizon.max(index + 1);
        let context = self.context();
        self.lexer.scan_token_at(index, context)
    }

    /// The current token, or the end-of-file token.
    pub fn current(&mut self) -> Token {
        match self.token(0) {
            Some(node) => node.token.clone(),
            None => self.eof.clone(),
        }
    }

    #[inline]
    pub fn current_kind(&mut self) -> TokenKind {
        self.peek_kind(0)
    }

    /// Kind of the token `n` places ahead. `Eof` past the end.
    #[inline]
    pub fn peek_kind(&mut self, n: usize) -> TokenKind {
        self.token(n).map_or(TokenKind::Eof, TokenNode::kind)
    }

    #[inline]
    pub fn current_range(&mut self) -> DocRange {
        let eof = self.eof.range;
        self.token(0).map_or(eof, TokenNode::range)
    }

    /// Range of the last consumed token. A point at the document start if
    /// nothing was consumed.
    pub fn previous_range(&self) -> DocRange {
        self.pos
            .checked_sub(1)
            .and_then(|index| self.lexer.token_at(index))
            .map_or(DocRange::point(Position::ZERO), TokenNode::range)
    }

    #[inline]
    pub fn is_at_end(&mut self) -> bool {
        self.token(0).is_none()
    }

    /// Consume the current token. `None` at the end of the document.
    pub fn advance(&mut self) -> Option<TokenNode> {
        let node = self.token(0).cloned();
        if node.is_some() {
            self.pos += 1;
        }
        node
    }

    /// Get the current position in the token stream.
    ///
    /// Used for progress tracking - compare positions before and after
    /// parsing to determine if tokens were consumed.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the cursor position directly.
    ///
    /// Used to restore a checkpoint and to step over a reused node, whose
    /// tokens are known to exist.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Tell the lexer every token before the cursor is final.
    pub fn commit(&mut self) {
        self.lexer.progress_to(self.pos);
    }

    /// Scan whatever the parser did not reach and return the token list.
    pub fn finish(self) -> TokenList {
        self.lexer.finish()
    }

    #[inline]
    pub fn change_start(&self) -> Option<usize> {
        self.lexer.change_start()
    }

    #[inline]
    pub fn resync_point(&self) -> Option<ResyncPoint> {
        self.lexer.resync_point()
    }

    #[inline]
    pub fn is_lex_completed(&self) -> bool {
        self.lexer.is_lex_completed()
    }

    /// Start measuring the horizon from `start`, returning the old value
    /// for [`TokenCursor::extend_horizon`].
    pub fn begin_horizon(&mut self, start: usize) -> usize {
        std::mem::replace(&mut self.horizon, start)
    }

    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn extend_horizon(&mut self, horizon: usize) {
        self.horizon = self.horizon.max(horizon);
    }
}

#[cfg(test)]
mod tests;
