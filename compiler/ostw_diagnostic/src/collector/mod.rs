//! Diagnostic collection for one parse session.
//!
//! # Features
//! - **Overlap dedup**: an error whose range overlaps (inclusively) a stored
//!   error is dropped, so one malformed region reports once
//! - **Recording gate**: lookahead probes switch recording off; anything
//!   reported while it is off is discarded
//! - **Error limit**: optional cap on the number of stored diagnostics
//!
//! # Usage
//!
//! ```text
//! let mut collector = DiagnosticCollector::new();
//! collector.add(expected_token("`;`", &token));
//! let diagnostics = collector.finish();
//! ```

use tracing::trace;

use crate::Diagnostic;

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of diagnostics to keep (0 = unlimited).
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl DiagnosticConfig {
    /// Keep every diagnostic.
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }

    pub fn with_error_limit(limit: usize) -> Self {
        DiagnosticConfig { error_limit: limit }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    recording: bool,
    config: DiagnosticConfig,
}

impl Default for DiagnosticCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticCollector {
            diagnostics: Vec::new(),
            recording: true,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if it was stored, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if !self.recording || self.limit_reached() {
            return false;
        }
        if self.overlaps_existing(&diag) {
            trace!(code = %diag.code, "dropping overlapping diagnostic");
            return false;
        }
        self.diagnostics.push(diag);
        true
    }

    fn overlaps_existing(&self, diag: &Diagnostic) -> bool {
        self.diagnostics
            .iter()
            .any(|existing| existing.range.overlaps(&diag.range))
    }

    /// Switch recording on or off, returning the previous state.
    pub fn set_recording(&mut self, recording: bool) -> bool {
        std::mem::replace(&mut self.recording, recording)
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.diagnostics.len() >= self.config.error_limit
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Consume the collector, returning diagnostics in document order.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|diag| diag.range.start);
        self.diagnostics
    }
}

#[cfg(test)]
mod tests;
