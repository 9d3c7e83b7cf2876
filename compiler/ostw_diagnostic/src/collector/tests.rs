use super::*;
use crate::ErrorCode;
use ostw_ir::{DocRange, Position};
use pretty_assertions::assert_eq;

fn diag_at(start: usize, end: usize, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(message)
        .at(DocRange::new(
            Position::new(start, 0, start),
            Position::new(end, 0, end),
        ))
}

fn messages(collector: DiagnosticCollector) -> Vec<String> {
    collector.finish().into_iter().map(|d| d.message).collect()
}

#[test]
fn test_overlapping_errors_are_dropped() {
    let mut collector = DiagnosticCollector::new();
    assert!(collector.add(diag_at(0, 5, "first")));
    assert!(!collector.add(diag_at(3, 8, "inside")));
    // touching ends count as overlap
    assert!(!collector.add(diag_at(5, 6, "touching")));
    assert!(collector.add(diag_at(7, 9, "separate")));
    assert_eq!(messages(collector), vec!["first", "separate"]);
}

#[test]
fn test_nothing_is_recorded_while_disabled() {
    let mut collector = DiagnosticCollector::new();
    let previous = collector.set_recording(false);
    assert!(previous);
    assert!(!collector.add(diag_at(0, 1, "probe")));
    collector.set_recording(previous);
    assert!(collector.add(diag_at(0, 1, "real")));
    assert_eq!(messages(collector), vec!["real"]);
}

#[test]
fn test_error_limit() {
    let mut collector = DiagnosticCollector::with_config(DiagnosticConfig::with_error_limit(2));
    assert!(collector.add(diag_at(0, 1, "a")));
    assert!(collector.add(diag_at(4, 5, "b")));
    assert!(collector.limit_reached());
    assert!(!collector.add(diag_at(8, 9, "c")));
    assert_eq!(collector.len(), 2);
}

#[test]
fn test_default_is_unlimited() {
    assert_eq!(DiagnosticConfig::default(), DiagnosticConfig::unlimited());
    let mut collector = DiagnosticCollector::new();
    for i in 0..50 {
        assert!(collector.add(diag_at(i * 3, i * 3 + 1, "x")));
    }
    assert!(!collector.limit_reached());
}

#[test]
fn test_finish_sorts_by_position() {
    let mut collector = DiagnosticCollector::new();
    collector.add(diag_at(10, 12, "late"));
    collector.add(diag_at(0, 2, "early"));
    assert!(collector.has_errors());
    assert_eq!(messages(collector), vec!["early", "late"]);
}
