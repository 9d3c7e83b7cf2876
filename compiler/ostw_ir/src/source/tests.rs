use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_position_at_tracks_lines_and_columns() {
    let source = SourceText::new("ab\ncdé\n\nx");
    assert_eq!(source.position_at(0), Ok(Position::new(0, 0, 0)));
    assert_eq!(source.position_at(2), Ok(Position::new(2, 0, 2)));
    assert_eq!(source.position_at(3), Ok(Position::new(3, 1, 0)));
    // 'é' is two bytes but one column.
    assert_eq!(source.position_at(7), Ok(Position::new(7, 1, 3)));
    assert_eq!(source.position_at(8), Ok(Position::new(8, 2, 0)));
    assert_eq!(source.position_at(9), Ok(Position::new(9, 3, 0)));
}

#[test]
fn test_position_at_rejects_bad_offsets() {
    let source = SourceText::new("é");
    assert_eq!(source.position_at(1), Err(EditError::NotCharBoundary(1)));
    assert_eq!(
        source.position_at(5),
        Err(EditError::OffsetOutOfBounds { offset: 5, len: 2 })
    );
}

#[test]
fn test_end_position() {
    assert_eq!(SourceText::new("").end_position(), Position::ZERO);
    assert_eq!(
        SourceText::new("a\nbc").end_position(),
        Position::new(4, 1, 2)
    );
}

#[test]
fn test_index_of_round_trips_position_at() {
    let source = SourceText::new("rule: \"x\"\n{\n  a = 1;\n}");
    for offset in 0..=source.len() {
        let pos = source.position_at(offset).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(source.index_of(pos.line, pos.column), Ok(offset));
    }
}

#[test]
fn test_index_of_out_of_bounds() {
    let source = SourceText::new("ab\nc");
    assert_eq!(
        source.index_of(5, 0),
        Err(EditError::LineOutOfBounds {
            line: 5,
            line_count: 2
        })
    );
    assert_eq!(
        source.index_of(0, 3),
        Err(EditError::ColumnOutOfBounds { line: 0, column: 3 })
    );
}

#[test]
fn test_apply_replace() {
    let source = SourceText::new("a = 1;\nb = 2;");
    let Ok(edit) = TextEdit::replace(&source, 4..5, "42") else {
        panic!("valid edit rejected");
    };
    let Ok(next) = source.apply(&edit) else {
        panic!("edit failed to apply");
    };
    assert_eq!(next.as_str(), "a = 42;\nb = 2;");
    assert_eq!(edit.length_delta(), 1);
    assert_eq!(edit.line_delta(), 0);
}

#[test]
fn test_line_delta_counts_inserted_and_removed_lines() {
    let source = SourceText::new("a\nb\nc");
    let Ok(join) = TextEdit::delete(&source, 1..4) else {
        panic!("valid edit rejected");
    };
    assert_eq!(join.line_delta(), -2);
    assert_eq!(join.length_delta(), -3);

    let Ok(split) = TextEdit::insert(&source, 1, "\n\n\n") else {
        panic!("valid edit rejected");
    };
    assert_eq!(split.shift(), PositionShift { index: 3, line: 3 });
    assert_eq!(split.new_end_index(), 4);
}

#[test]
fn test_inverted_edit_is_rejected() {
    let source = SourceText::new("abc");
    assert_eq!(
        TextEdit::replace(&source, 2..1, ""),
        Err(EditError::InvertedRange { start: 2, end: 1 })
    );
}

#[test]
fn test_edit_error_messages() {
    let err = EditError::OffsetOutOfBounds { offset: 9, len: 3 };
    assert_eq!(
        err.to_string(),
        "offset 9 is past the end of the document (3 bytes)"
    );
}
