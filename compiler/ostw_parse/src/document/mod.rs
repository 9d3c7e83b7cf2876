//! An editable document that keeps its last parse.
//!
//! Edits go through the incremental path; a settings change throws the
//! previous parse away, since tokens lexed under the old settings cannot
//! be reused.

use std::sync::Arc;

use ostw_diagnostic::DiagnosticConfig;
use ostw_ir::{EditError, ParserSettings, SourceText, TextEdit};
use ostw_lexer::VanillaSymbols;
use tracing::debug;

use crate::{parse_with_config, reparse_with_config, ParseOutput};

/// One open script.
pub struct Document {
    source: SourceText,
    settings: ParserSettings,
    symbols: Arc<VanillaSymbols>,
    config: DiagnosticConfig,
    output: ParseOutput,
}

impl Document {
    /// Open a document and parse it.
    pub fn new(
        text: impl Into<String>,
        settings: ParserSettings,
        symbols: Arc<VanillaSymbols>,
    ) -> Self {
        Self::with_config(text, settings, symbols, DiagnosticConfig::default())
    }

    pub fn with_config(
        text: impl Into<String>,
        settings: ParserSettings,
        symbols: Arc<VanillaSymbols>,
        config: DiagnosticConfig,
    ) -> Self {
        let source = SourceText::new(text);
        let output = parse_with_config(&source, settings, &symbols, config.clone());
        Document {
            source,
            settings,
            symbols,
            config,
            output,
        }
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn settings(&self) -> ParserSettings {
        self.settings
    }

    /// The result of the latest parse.
    pub fn output(&self) -> &ParseOutput {
        &self.output
    }

    /// Apply one edit and reparse what it affected.
    ///
    /// The edit's positions are recomputed from its byte offsets, so only
    /// the offsets have to be right. On error the document is unchanged.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<(), EditError> {
        let edit = TextEdit::replace(
            &self.source,
            edit.range.start.index..edit.range.end.index,
            edit.text.clone(),
        )?;
        let source = self.source.apply(&edit)?;

        let previous = std::mem::take(&mut self.output);
        self.output = reparse_with_config(
            previous,
            &source,
            &edit,
            self.settings,
            &self.symbols,
            self.config.clone(),
        );
        self.source = source;

        debug!(
            reused = self.output.stats.reused_count,
            reparsed = self.output.stats.reparsed_count,
            "document updated"
        );
        Ok(())
    }

    /// Apply edits in order. Stops at the first invalid one.
    pub fn apply_edits<'e>(
        &mut self,
        edits: impl IntoIterator<Item = &'e TextEdit>,
    ) -> Result<(), EditError> {
        for edit in edits {
            self.apply_edit(edit)?;
        }
        Ok(())
    }

    /// Switch settings. Returns whether the document was reparsed.
    pub fn update_settings(&mut self, settings: ParserSettings) -> bool {
        if settings == self.settings {
            return false;
        }
        debug!(?settings, "settings changed, parsing from scratch");
        self.settings = settings;
        self.output = parse_with_config(
            &self.source,
            self.settings,
            &self.symbols,
            self.config.clone(),
        );
        true
    }
}
