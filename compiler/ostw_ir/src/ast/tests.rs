use pretty_assertions::assert_eq;

use super::*;
use crate::PositionShift;

fn range(start: usize, end: usize, line: usize) -> DocRange {
    DocRange::new(Position::new(start, line, 0), Position::new(end, line, end - start))
}

#[test]
fn test_missing_ident() {
    let ident = Ident::missing(Position::new(4, 1, 2));
    assert!(ident.is_missing());
    assert!(ident.range.is_empty());
    assert!(!Ident::new("a", range(0, 1, 0)).is_missing());
}

#[test]
fn test_relocate_reaches_nested_ranges() {
    let name = Ident::new("a", range(10, 11, 2));
    let mut block = Block {
        statements: vec![Stmt::new(
            StmtKind::Return(Return {
                value: Some(Expr::new(
                    ExprKind::Identifier(Identifier {
                        name,
                        indices: Vec::new(),
                        generics: Vec::new(),
                    }),
                    range(10, 11, 2),
                )),
                range: range(3, 12, 2),
            }),
            range(3, 12, 2),
        )],
        end_comment: None,
        range: range(0, 14, 2),
    };

    block.relocate(PositionShift { index: 5, line: 1 });

    assert_eq!(block.range, range(0, 14, 2).shifted(PositionShift { index: 5, line: 1 }));
    let StmtKind::Return(ret) = &block.statements[0].kind else {
        panic!("expected return");
    };
    let Some(Expr {
        kind: ExprKind::Identifier(identifier),
        ..
    }) = &ret.value
    else {
        panic!("expected identifier");
    };
    assert_eq!(identifier.name.range.start, Position::new(15, 3, 0));
}

#[test]
fn test_plain_name_type() {
    let plain = TypeExpr {
        kind: TypeKind::Named(NamedType {
            name: Ident::new("Foo", range(0, 3, 0)),
            is_define: false,
            args: Vec::new(),
            array_depth: 0,
        }),
        range: range(0, 3, 0),
    };
    assert_eq!(plain.as_plain_name().map(|n| n.name.as_str()), Some("Foo"));

    let array = TypeExpr {
        kind: TypeKind::Named(NamedType {
            name: Ident::new("Foo", range(0, 3, 0)),
            is_define: false,
            args: Vec::new(),
            array_depth: 1,
        }),
        range: range(0, 5, 0),
    };
    assert_eq!(array.as_plain_name(), None);
}
