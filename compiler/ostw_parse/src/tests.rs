use ostw_diagnostic::{DiagnosticConfig, ErrorCode};
use ostw_ir::ast::RootItem;
use ostw_ir::{ParserSettings, SourceText, TextEdit};
use ostw_lexer::VanillaSymbols;
use pretty_assertions::assert_eq;

use super::*;

fn parse_text(text: &str) -> ParseOutput {
    parse(
        &SourceText::new(text),
        ParserSettings::default(),
        &VanillaSymbols::empty(),
    )
}

fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn test_empty_document() {
    let output = parse_text("");
    assert!(output.root.items.is_empty());
    assert!(output.tokens.is_empty());
    assert!(!output.has_errors());
    assert_eq!(output.stats, IncrementalStats::default());
}

#[test]
fn test_has_errors() {
    assert!(!parse_text("define x = 1;").has_errors());
    assert!(parse_text("define x = ;").has_errors());
}

#[test]
fn test_lexical_error_reported_once() {
    let output = parse_text("define x = 1.;");
    assert_eq!(codes(&output), vec![ErrorCode::E0003]);
}

#[test]
fn test_diagnostics_are_sorted_and_disjoint() {
    let output = parse_text(") ]\ndefine x = ;\n) enum E { A }");
    assert!(output.diagnostics.len() >= 3);
    for pair in output.diagnostics.windows(2) {
        assert!(pair[0].range.start <= pair[1].range.start);
        assert!(!pair[0].range.overlaps(&pair[1].range));
    }
}

#[test]
fn test_error_limit() {
    let source = SourceText::new(") ] ) ]");
    let symbols = VanillaSymbols::empty();
    let unlimited = parse(&source, ParserSettings::default(), &symbols);
    assert_eq!(unlimited.diagnostics.len(), 4);

    let limited = parse_with_config(
        &source,
        ParserSettings::default(),
        &symbols,
        DiagnosticConfig::with_error_limit(2),
    );
    assert_eq!(limited.diagnostics.len(), 2);
    assert_eq!(limited.diagnostics, unlimited.diagnostics[..2].to_vec());
}

#[test]
fn test_fresh_parse_records_captures() {
    let output = parse_text("rule: \"a\"\n{\n    if (x) { y(); }\n}\nenum E { A }");
    let kinds: Vec<_> = output.captures.iter().map(|c| c.node.kind()).collect();
    assert!(kinds.contains(&CaptureKind::Rule));
    assert!(kinds.contains(&CaptureKind::If));
    assert!(kinds.contains(&CaptureKind::Block));
    assert!(kinds.contains(&CaptureKind::Enum));
    assert_eq!(output.stats.reused_count, 0);
    assert_eq!(output.stats.reparsed_count, output.captures.len());
}

#[test]
fn test_erroneous_nodes_are_not_captured() {
    let output = parse_text("rule: \"a\"\n{\n    x = ;\n}");
    assert!(output
        .captures
        .iter()
        .all(|c| c.node.kind() != CaptureKind::Rule));
}

#[test]
fn test_reparse_reuses_rule_in_front_of_edit() {
    let old = SourceText::new("rule: \"a\"\n{\n    a();\n}\n\nrule: \"b\"\n{\n    b();\n}\n");
    let symbols = VanillaSymbols::empty();
    let previous = parse(&old, ParserSettings::default(), &symbols);

    let at = old.as_str().find("b();").unwrap_or_default();
    let Ok(edit) = TextEdit::replace(&old, at..at + 1, "c") else {
        panic!("edit out of bounds");
    };
    let Ok(new) = old.apply(&edit) else {
        panic!("edit did not apply");
    };
    let output = reparse(previous, &new, &edit, ParserSettings::default(), &symbols);
    let fresh = parse(&new, ParserSettings::default(), &symbols);

    assert_eq!(output.root, fresh.root);
    assert_eq!(output.tokens, fresh.tokens);
    assert!(output.stats.reused_count >= 1);
    let [RootItem::Rule(first), RootItem::Rule(_)] = output.root.items.as_slice() else {
        panic!("expected two rules");
    };
    assert_eq!(first.name.as_deref(), Some("a"));
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
