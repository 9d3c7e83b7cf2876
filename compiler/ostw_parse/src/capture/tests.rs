use super::*;
use ostw_ir::ast::{Block, Relocate};
use ostw_ir::{DocRange, Position};
use pretty_assertions::assert_eq;

fn block(at: usize) -> Block {
    Block {
        statements: Vec::new(),
        end_comment: None,
        range: DocRange::new(Position::new(at, 0, at), Position::new(at + 2, 0, at + 2)),
    }
}

fn capture(start_token: usize, length: usize, examined: usize) -> TokenCapture {
    TokenCapture {
        start_token,
        length,
        examined,
        node: CapturedNode::Block(block(start_token)),
        is_valid: true,
    }
}

fn affected(starting_token_index: usize, length: usize) -> AffectedAreaInfo {
    AffectedAreaInfo {
        starting_token_index,
        length,
    }
}

#[test]
fn test_recorder_drops_erroneous_and_empty() {
    let mut recorder = CaptureRecorder::default();

    recorder.open();
    recorder.open();
    recorder.mark_open_erroneous();
    assert!(!recorder.close(1, 2, 2, &block(1)));
    assert!(!recorder.close(0, 4, 4, &block(0)));

    recorder.open();
    assert!(!recorder.close(5, 0, 1, &block(5)));

    recorder.open();
    assert_eq!(recorder.depth(), 1);
    assert!(recorder.close(6, 2, 3, &block(6)));
    assert_eq!(recorder.finish(), vec![capture(6, 2, 3)]);
}

#[test]
fn test_errors_after_close_do_not_leak() {
    let mut recorder = CaptureRecorder::default();
    recorder.open();
    assert!(recorder.close(0, 2, 2, &block(0)));
    recorder.mark_open_erroneous();
    assert_eq!(recorder.finish().len(), 1);
}

#[test]
fn test_examined_end_counts_stopping_token() {
    assert_eq!(capture(3, 2, 2).examined_end(), 6);
    assert_eq!(capture(3, 2, 5).examined_end(), 8);
    assert_eq!(capture(3, 2, 5).end_token(), 5);
}

#[test]
fn test_cache_invalidates_what_the_edit_touched() {
    let captures = vec![
        capture(0, 3, 3),  // looked at 0..4, edit starts at 5
        capture(2, 2, 4),  // peeked to 6
        capture(5, 1, 1),  // inside the edit
        capture(9, 2, 2),  // behind it
    ];
    let cache = ReuseCache::new(captures, affected(5, 2), PositionShift::NONE);

    let valid: Vec<bool> = (0..cache.len()).map(|slot| cache.get(slot).is_valid).collect();
    assert_eq!(valid, vec![true, false, false, true]);
    assert_eq!(cache.find(9, CaptureKind::Block), Some(3));
    assert_eq!(cache.find(9, CaptureKind::If), None);
}

#[test]
fn test_nested_excludes_outer_and_siblings() {
    let captures = vec![
        capture(0, 10, 10),
        capture(1, 3, 3),
        capture(5, 2, 2),
        capture(9, 4, 4),
        capture(12, 1, 1),
    ];
    let cache = ReuseCache::new(captures, affected(40, 1), PositionShift::NONE);
    let Some(outer) = cache.find(0, CaptureKind::Block) else {
        panic!("outer capture missing");
    };

    let nested: Vec<usize> = cache.nested(outer).map(|c| c.start_token).collect();
    assert_eq!(nested, vec![1, 5]);
}

#[test]
fn test_from_node_checks_kind() {
    let node = CapturedNode::Block(block(0));
    assert_eq!(node.kind(), CaptureKind::Block);
    assert!(Block::from_node(&node).is_some());
    assert!(ostw_ir::ast::Enum::from_node(&node).is_none());
}

#[test]
fn test_relocate_captured_node() {
    let mut node = CapturedNode::Block(block(4));
    node.relocate(PositionShift { index: 3, line: 1 });
    let CapturedNode::Block(moved) = node else {
        panic!("kind changed");
    };
    assert_eq!(moved.range.start, Position::new(7, 1, 4));
}

#[test]
fn test_reuse_rate() {
    let empty = IncrementalStats::default();
    assert!(empty.reuse_rate().abs() < f64::EPSILON);

    let stats = IncrementalStats {
        reused_count: 3,
        reparsed_count: 1,
    };
    assert!((stats.reuse_rate() - 75.0).abs() < f64::EPSILON);
}
