//! Document text and text edits.
//!
//! [`SourceText`] is one version of a document. It precomputes line starts
//! so offset/line/column conversions are cheap. A [`TextEdit`] describes
//! one replacement against a document version and knows how far it moves
//! the text after it.

use std::ops::Range;

use crate::{DocRange, Position, PositionShift};

/// Error for edits or lookups that don't fit the document.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("offset {offset} is past the end of the document ({len} bytes)")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    #[error("edit range {start}..{end} is inverted")]
    InvertedRange { start: usize, end: usize },
    #[error("line {line} is past the last line ({line_count} lines)")]
    LineOutOfBounds { line: usize, line_count: usize },
    #[error("column {column} is past the end of line {line}")]
    ColumnOutOfBounds { line: usize, column: usize },
}

/// One version of a document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        SourceText { text, line_starts }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of the byte offset `offset`.
    pub fn position_at(&self, offset: usize) -> Result<Position, EditError> {
        self.check_offset(offset)?;
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.text[line_start..offset].chars().count();
        Ok(Position::new(offset, line, column))
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> Position {
        let line = self.line_starts.len() - 1;
        let line_start = self.line_starts[line];
        Position::new(self.text.len(), line, self.text[line_start..].chars().count())
    }

    /// Byte offset of a zero-based line and character column.
    pub fn index_of(&self, line: usize, column: usize) -> Result<usize, EditError> {
        let Some(&line_start) = self.line_starts.get(line) else {
            return Err(EditError::LineOutOfBounds {
                line,
                line_count: self.line_count(),
            });
        };
        let line_text = self.text[line_start..].split('\n').next().unwrap_or("");
        if column == 0 {
            return Ok(line_start);
        }
        match line_text.char_indices().nth(column) {
            Some((offset, _)) => Ok(line_start + offset),
            None if line_text.chars().count() == column => Ok(line_start + line_text.len()),
            None => Err(EditError::ColumnOutOfBounds { line, column }),
        }
    }

    /// Build the next document version.
    pub fn apply(&self, edit: &TextEdit) -> Result<SourceText, EditError> {
        let (start, end) = (edit.range.start.index, edit.range.end.index);
        if start > end {
            return Err(EditError::InvertedRange { start, end });
        }
        self.check_offset(start)?;
        self.check_offset(end)?;

        let mut text = String::with_capacity(self.text.len() - (end - start) + edit.text.len());
        text.push_str(&self.text[..start]);
        text.push_str(&edit.text);
        text.push_str(&self.text[end..]);
        Ok(SourceText::new(text))
    }

    fn check_offset(&self, offset: usize) -> Result<(), EditError> {
        if offset > self.text.len() {
            return Err(EditError::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

/// A single replacement against one document version.
///
/// `range` is expressed in the document *before* the edit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEdit {
    pub range: DocRange,
    pub text: String,
}

impl TextEdit {
    pub fn new(range: DocRange, text: impl Into<String>) -> Self {
        TextEdit {
            range,
            text: text.into(),
        }
    }

    /// Replace the byte range `span` of `source` with `text`.
    pub fn replace(
        source: &SourceText,
        span: Range<usize>,
        text: impl Into<String>,
    ) -> Result<Self, EditError> {
        if span.start > span.end {
            return Err(EditError::InvertedRange {
                start: span.start,
                end: span.end,
            });
        }
        let start = source.position_at(span.start)?;
        let end = source.position_at(span.end)?;
        Ok(TextEdit::new(DocRange::new(start, end), text))
    }

    /// Insert `text` at byte offset `at`.
    pub fn insert(source: &SourceText, at: usize, text: impl Into<String>) -> Result<Self, EditError> {
        Self::replace(source, at..at, text)
    }

    /// Delete the byte range `span`.
    pub fn delete(source: &SourceText, span: Range<usize>) -> Result<Self, EditError> {
        Self::replace(source, span, "")
    }

    /// Change in document length.
    pub fn length_delta(&self) -> isize {
        signed(self.text.len()) - signed(self.range.len())
    }

    /// Change in line count.
    pub fn line_delta(&self) -> isize {
        let inserted = self.text.matches('\n').count();
        let removed = self.range.end.line - self.range.start.line;
        signed(inserted) - signed(removed)
    }

    /// How far text after the edit moves.
    pub fn shift(&self) -> PositionShift {
        PositionShift {
            index: self.length_delta(),
            line: self.line_delta(),
        }
    }

    /// Offset in the new document just past the inserted text.
    pub fn new_end_index(&self) -> usize {
        self.range.start.index + self.text.len()
    }
}

#[inline]
fn signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests;
