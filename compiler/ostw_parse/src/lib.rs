//! Incremental recursive descent parser for OSTW scripts.
//!
//! The parser pulls tokens from an [`ostw_lexer::LexController`] one at a
//! time, telling it which lexical context each token belongs to. It never
//! fails: malformed input produces diagnostics and placeholder nodes.
//!
//! After an edit, [`reparse`] relexes only the affected area and reuses
//! captured nodes (blocks, control flow, rules, classes, enums, type
//! aliases, struct literals) from the previous [`ParseOutput`] wherever the
//! edit could not have changed them. The result equals what [`parse`]
//! produces for the new text.
//!
//! # Layout
//!
//! - `cursor`: token access in the current lexical context
//! - `snapshot`: checkpoints and side-effect-free lookahead
//! - `capture`: the capture table used for reuse
//! - `grammar`: the productions
//! - `document`: an editable document that reparses on every change

mod capture;
mod cursor;
mod document;
mod grammar;
mod snapshot;
mod stack;

pub use capture::{
    CaptureKind, CaptureRecorder, Capturable, CapturedNode, IncrementalStats, ReuseCache,
    TokenCapture,
};
pub use cursor::TokenCursor;
pub use document::Document;
pub use snapshot::Checkpoint;

use ostw_diagnostic::{
    expected_token, lexical_error, Diagnostic, DiagnosticCollector, DiagnosticConfig,
};
use ostw_ir::ast::{Relocate, RootContext};
use ostw_ir::{
    DocRange, ParserSettings, Position, SourceText, TextEdit, Token, TokenKind, TokenList,
};
use ostw_lexer::{LexController, LexerIncrementalChange, VanillaSymbols};
use tracing::{debug, trace};

/// Everything one parse produces.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub root: RootContext,
    pub tokens: TokenList,
    /// Diagnostics in document order. No two overlap.
    pub diagnostics: Vec<Diagnostic>,
    /// Reusable nodes for the next [`reparse`].
    pub captures: Vec<TokenCapture>,
    pub stats: IncrementalStats,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse a whole document.
pub fn parse(
    source: &SourceText,
    settings: ParserSettings,
    symbols: &VanillaSymbols,
) -> ParseOutput {
    parse_with_config(source, settings, symbols, DiagnosticConfig::default())
}

pub fn parse_with_config(
    source: &SourceText,
    settings: ParserSettings,
    symbols: &VanillaSymbols,
    config: DiagnosticConfig,
) -> ParseOutput {
    Parser::with_config(source, settings, symbols, config).parse_document()
}

/// Parse `source`, the result of applying `edit` to the document
/// `previous` was parsed from.
pub fn reparse(
    previous: ParseOutput,
    source: &SourceText,
    edit: &TextEdit,
    settings: ParserSettings,
    symbols: &VanillaSymbols,
) -> ParseOutput {
    reparse_with_config(
        previous,
        source,
        edit,
        settings,
        symbols,
        DiagnosticConfig::default(),
    )
}

pub fn reparse_with_config(
    previous: ParseOutput,
    source: &SourceText,
    edit: &TextEdit,
    settings: ParserSettings,
    symbols: &VanillaSymbols,
    config: DiagnosticConfig,
) -> ParseOutput {
    Parser::incremental(source, settings, symbols, config, previous, edit).parse_document()
}

/// Initialize tracing for debug output.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=ostw_parse=debug`.
/// Safe to call multiple times.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let filter = EnvFilter::from_default_env();
    // A second call finds the global subscriber already set.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();
}

/// Parser state.
pub struct Parser<'s> {
    cursor: TokenCursor<'s>,
    diagnostics: DiagnosticCollector,
    captures: CaptureRecorder,
    reuse: Option<ReuseCache>,
    stats: IncrementalStats,
}

impl<'s> Parser<'s> {
    /// Create a parser for a fresh document.
    pub fn new(
        source: &'s SourceText,
        settings: ParserSettings,
        symbols: &'s VanillaSymbols,
    ) -> Self {
        Self::with_config(source, settings, symbols, DiagnosticConfig::default())
    }

    pub fn with_config(
        source: &'s SourceText,
        settings: ParserSettings,
        symbols: &'s VanillaSymbols,
        config: DiagnosticConfig,
    ) -> Self {
        let lexer = LexController::new(source.as_str(), settings, symbols);
        Parser {
            cursor: TokenCursor::new(lexer, source.end_position()),
            diagnostics: DiagnosticCollector::with_config(config),
            captures: CaptureRecorder::default(),
            reuse: None,
            stats: IncrementalStats::default(),
        }
    }

    /// Create a parser that reuses the tokens and captures of `previous`.
    pub fn incremental(
        source: &'s SourceText,
        settings: ParserSettings,
        symbols: &'s VanillaSymbols,
        config: DiagnosticConfig,
        previous: ParseOutput,
        edit: &TextEdit,
    ) -> Self {
        let change = LexerIncrementalChange::new(previous.tokens, edit);
        let reuse = ReuseCache::new(previous.captures, change.affected, edit.shift());
        let lexer = LexController::incremental(source.as_str(), settings, symbols, change);
        Parser {
            cursor: TokenCursor::new(lexer, source.end_position()),
            diagnostics: DiagnosticCollector::with_config(config),
            captures: CaptureRecorder::default(),
            reuse: Some(reuse),
            stats: IncrementalStats::default(),
        }
    }

    /// Parse the whole document.
    pub fn parse_document(mut self) -> ParseOutput {
        let root = self.parse_root();
        let Parser {
            cursor,
            diagnostics,
            captures,
            stats,
            ..
        } = self;
        let output = ParseOutput {
            root,
            tokens: cursor.finish(),
            diagnostics: diagnostics.finish(),
            captures: captures.finish(),
            stats,
        };
        debug!(
            tokens = output.tokens.len(),
            diagnostics = output.diagnostics.len(),
            captures = output.captures.len(),
            reused = output.stats.reused_count,
            reparsed = output.stats.reparsed_count,
            "parse finished"
        );
        output
    }

    // Cursor delegation methods.

    #[inline]
    fn current(&mut self) -> Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&mut self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn peek_kind(&mut self, n: usize) -> TokenKind {
        self.cursor.peek_kind(n)
    }

    #[inline]
    fn current_range(&mut self) -> DocRange {
        self.cursor.current_range()
    }

    #[inline]
    fn previous_range(&self) -> DocRange {
        self.cursor.previous_range()
    }

    #[inline]
    fn is_at_end(&mut self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&mut self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Start of the current token, for node ranges.
    #[inline]
    fn start(&mut self) -> Position {
        self.current_range().start
    }

    /// Range from `start` to the end of the last consumed token.
    fn range_from(&self, start: Position) -> DocRange {
        let end = self.previous_range().end.max(start);
        DocRange::new(start, end)
    }

    /// The current token, or at the end of the document the last token,
    /// where errors about the end are reported.
    fn current_or_last(&mut self) -> Token {
        let mut token = self.current();
        if token.kind == TokenKind::Eof && self.position() > 0 {
            token.range = self.previous_range();
        }
        token
    }

    /// Consume the current token, reporting its lexical error if it has
    /// one.
    fn advance(&mut self) -> Option<Token> {
        let node = self.cursor.advance()?;
        trace!(kind = ?node.kind(), at = node.range().start.index, "consumed");
        if let Some(error) = node.error {
            self.error(lexical_error(error, node.range()));
        }
        Some(node.token)
    }

    /// Report a diagnostic. Ignored during lookahead.
    fn error(&mut self, diagnostic: Diagnostic) {
        if !self.is_recording() {
            return;
        }
        self.captures.mark_open_erroneous();
        self.diagnostics.add(diagnostic);
    }

    /// Consume a token of `kind` or report that it is missing.
    fn parse_expected(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            return self.advance();
        }
        let found = self.current_or_last();
        self.error(expected_token(kind.describe(), &found));
        None
    }

    /// Consume a token of any of `kinds` or report that none is there.
    fn parse_expected_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        let current = self.current_kind();
        if kinds.contains(&current) {
            return self.advance();
        }
        let expected = kinds
            .iter()
            .map(|kind| kind.describe())
            .collect::<Vec<_>>()
            .join(" or ");
        let found = self.current_or_last();
        self.error(expected_token(&expected, &found));
        None
    }

    /// Consume a token of `kind` if it is there.
    fn parse_optional(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Tell the lexer the tokens before the cursor are final. Only done
    /// outside lookahead, at the start of statements and root items.
    fn commit(&mut self) {
        if self.is_recording() {
            self.cursor.commit();
        }
    }

    /// Parse a capturable production, reusing the previous parse's node
    /// when possible and recording a capture otherwise.
    fn incremental_node<T: Capturable>(&mut self, parse: impl FnOnce(&mut Self) -> T) -> T {
        if let Some(node) = self.try_reuse::<T>() {
            return node;
        }
        let start_token = self.position();
        let saved_horizon = self.cursor.begin_horizon(start_token);
        let recording = self.start_token_capture();
        let node = parse(self);
        if recording {
            self.end_token_capture(start_token, &node);
        }
        self.cursor.extend_horizon(saved_horizon);
        node
    }

    fn start_token_capture(&mut self) -> bool {
        if !self.is_recording() {
            return false;
        }
        self.captures.open();
        true
    }

    fn end_token_capture<T: Capturable>(&mut self, start_token: usize, node: &T) {
        let length = self.position() - start_token;
        let examined = self.cursor.horizon().saturating_sub(start_token);
        self.captures.close(start_token, length, examined, node);
        self.stats.reparsed_count += 1;
    }

    fn try_reuse<T: Capturable>(&mut self) -> Option<T> {
        if !self.is_recording() {
            return None;
        }
        let index = self.position();
        let change_start = self.cursor.change_start()?;

        // Behind the change start only the old tail is trustworthy, and
        // only once the lexer has found its way back to it.
        let tail = if index < change_start {
            None
        } else {
            if !self.cursor.is_lex_completed() {
                return None;
            }
            let resync = self.cursor.resync_point()?;
            let old_index = index.checked_add_signed(-resync.delta)?;
            if old_index < resync.old_index {
                return None;
            }
            Some(old_index)
        };

        let cache = self.reuse.as_ref()?;
        let slot = cache.find(tail.unwrap_or(index), T::KIND)?;
        let capture = cache.get(slot);
        if !capture.is_valid {
            return None;
        }
        if tail.is_none() && capture.examined_end() > change_start {
            return None;
        }

        let mut node = T::from_node(&capture.node)?.clone();
        let shift = cache.shift();
        let old_start = capture.start_token;
        let (length, examined) = (capture.length, capture.examined);
        if tail.is_some() {
            node.relocate(shift);
        }
        for nested in cache.nested(slot) {
            let mut carried = nested.clone();
            carried.start_token = index + (nested.start_token - old_start);
            if tail.is_some() {
                carried.node.relocate(shift);
            }
            self.captures.record(carried);
        }
        self.captures.record(TokenCapture {
            start_token: index,
            length,
            examined,
            node: node.clone().into_node(),
            is_valid: true,
        });

        debug!(kind = ?T::KIND, old_start, new_start = index, length, "reused node");
        self.cursor.set_position(index + length);
        self.cursor.extend_horizon(index + examined);
        self.stats.reused_count += 1;
        Some(node)
    }
}

#[cfg(test)]
mod tests;
