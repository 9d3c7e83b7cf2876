//! Document positions and ranges.
//!
//! A [`Position`] carries both a byte offset and a zero-based line/column
//! pair. The offset is authoritative for range arithmetic; the line/column
//! pair is what editors and diagnostics talk in.

use std::fmt;

/// A location in a document.
///
/// `column` counts characters (not bytes) from the start of the line.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Start of the document.
    pub const ZERO: Position = Position {
        index: 0,
        line: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(index: usize, line: usize, column: usize) -> Self {
        Position {
            index,
            line,
            column,
        }
    }

    /// Move this position by `shift`. Columns are left untouched; shifted
    /// positions always lie on lines after the edit that caused the shift.
    #[inline]
    #[must_use]
    pub fn shifted(self, shift: PositionShift) -> Position {
        Position {
            index: self.index.saturating_add_signed(shift.index),
            line: self.line.saturating_add_signed(shift.line),
            column: self.column,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.index, self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// The distance positions after an edit move by.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct PositionShift {
    /// Byte offset delta.
    pub index: isize,
    /// Line delta.
    pub line: isize,
}

impl PositionShift {
    pub const NONE: PositionShift = PositionShift { index: 0, line: 0 };

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// A range between two positions. `end` is exclusive for offsets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct DocRange {
    pub start: Position,
    pub end: Position,
}

impl DocRange {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        DocRange { start, end }
    }

    /// An empty range at `at`.
    #[inline]
    pub const fn point(at: Position) -> Self {
        DocRange { start: at, end: at }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.index == self.end.index
    }

    /// Whether two ranges overlap. Both ends are inclusive, so ranges that
    /// merely touch count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &DocRange) -> bool {
        self.start.index <= other.end.index && other.start.index <= self.end.index
    }

    /// Whether `offset` lies inside the range (start inclusive, end exclusive).
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start.index && offset < self.end.index
    }

    /// Smallest range covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: DocRange) -> DocRange {
        DocRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    #[must_use]
    pub fn shifted(self, shift: PositionShift) -> DocRange {
        DocRange {
            start: self.start.shifted(shift),
            end: self.end.shifted(shift),
        }
    }
}

impl fmt::Debug for DocRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}
