//! Which old tokens an edit invalidates.
//!
//! The window is deliberately wider than the tokens the edit touches. It
//! grows backward over tokens that touch each other (a token's meaning can
//! depend on the character right after it) and to whole lines at both
//! ends, so every token after the window sits on a later line than the
//! edit and keeps its column when it is shifted.

use ostw_ir::{TextEdit, TokenList};
use tracing::debug;

/// A window into the previous token list.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct AffectedAreaInfo {
    pub starting_token_index: usize,
    pub length: usize,
}

impl AffectedAreaInfo {
    /// First token after the window.
    #[inline]
    pub fn end(&self) -> usize {
        self.starting_token_index + self.length
    }
}

pub fn compute_affected_area(tokens: &TokenList, edit: &TextEdit) -> AffectedAreaInfo {
    let tokens = tokens.as_slice();
    let range = edit.range;

    let mut start = tokens
        .iter()
        .position(|t| t.range().overlaps(&range) || t.range().end.line >= range.start.line)
        .unwrap_or(tokens.len());

    if start < tokens.len() {
        loop {
            let before = start;
            while start > 0
                && tokens[start - 1].range().end.index == tokens[start].range().start.index
            {
                start -= 1;
            }
            let line = tokens[start].range().start.line;
            while start > 0 && tokens[start - 1].range().start.line == line {
                start -= 1;
            }
            if start == before {
                break;
            }
        }
    }

    let end = tokens
        .iter()
        .rposition(|t| t.range().overlaps(&range) || t.range().start.line <= range.end.line)
        .map(|mut end| {
            let line = tokens[end].range().end.line;
            while end + 1 < tokens.len() && tokens[end + 1].range().start.line == line {
                end += 1;
            }
            end + 1
        })
        .unwrap_or(0);

    let area = AffectedAreaInfo {
        starting_token_index: start,
        length: end.saturating_sub(start),
    };
    debug!(
        start = area.starting_token_index,
        length = area.length,
        "affected area"
    );
    area
}
