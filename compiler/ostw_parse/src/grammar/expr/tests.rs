use ostw_diagnostic::ErrorCode;
use ostw_ir::ast::{Argument, Expr, ExprKind, StmtKind, StructField, TypeKind};
use ostw_ir::{ParserSettings, SourceText};
use ostw_lexer::VanillaSymbols;
use pretty_assertions::assert_eq;

use crate::Parser;

/// Parse one expression and collect the diagnostic codes.
fn parse_expr(source: &str) -> (Expr, Vec<ErrorCode>) {
    let source = SourceText::new(source);
    let symbols = VanillaSymbols::empty();
    let mut parser = Parser::new(&source, ParserSettings::default(), &symbols);
    let expr = parser.parse_expression();
    let codes = parser.diagnostics.iter().map(|d| d.code).collect();
    (expr, codes)
}

/// Render an expression as an s-expression for compact comparisons.
fn show(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Number(text) => text.clone(),
        ExprKind::Boolean(value) => value.to_string(),
        ExprKind::Null => "null".to_string(),
        ExprKind::This => "this".to_string(),
        ExprKind::Root => "root".to_string(),
        ExprKind::String(literal) if literal.localized => format!("@{}", literal.text),
        ExprKind::String(literal) => literal.text.clone(),
        ExprKind::Identifier(identifier) => {
            let mut text = identifier.name.name.clone();
            for index in &identifier.indices {
                text.push_str(&format!("[{}]", show(index)));
            }
            if !identifier.generics.is_empty() {
                text.push_str(&format!("<{}>", identifier.generics.len()));
            }
            text
        }
        ExprKind::Unary { op, operand } => format!("({op:?} {})", show(operand)),
        ExprKind::Binary { op, lhs, rhs } => format!("({op} {} {})", show(lhs), show(rhs)),
        ExprKind::Ternary {
            condition,
            consequent,
            alternative,
        } => format!(
            "(? {} {} {})",
            show(condition),
            show(consequent),
            show(alternative)
        ),
        ExprKind::Index { target, index } => format!("(index {} {})", show(target), show(index)),
        ExprKind::Invoke { target, args } => {
            format!("(call {}{})", show(target), show_args(args))
        }
        ExprKind::Group(inner) => format!("(group {})", show(inner)),
        ExprKind::TypeCast { expr, .. } => format!("(cast {})", show(expr)),
        ExprKind::Array(values) => {
            let values: Vec<_> = values.iter().map(show).collect();
            format!("[{}]", values.join(", "))
        }
        ExprKind::New { args, .. } => format!("(new{})", show_args(args)),
        ExprKind::Missing => "?missing".to_string(),
        other => format!("{other:?}"),
    }
}

fn show_args(args: &[Argument]) -> String {
    args.iter()
        .map(|arg| match &arg.name {
            Some(name) => format!(" {}:{}", name.name, show(&arg.value)),
            None => format!(" {}", show(&arg.value)),
        })
        .collect()
}

#[track_caller]
fn assert_tree(source: &str, expected: &str) {
    let (expr, codes) = parse_expr(source);
    assert_eq!(show(&expr), expected, "source: {source}");
    assert_eq!(codes, Vec::<ErrorCode>::new(), "source: {source}");
}

#[test]
fn test_binary_precedence() {
    assert_tree("a + b * c", "(+ a (* b c))");
    assert_tree("a * b + c", "(+ (* a b) c)");
    assert_tree("a - b - c", "(- (- a b) c)");
    assert_tree("a || b && c", "(|| a (&& b c))");
    assert_tree("a == b < c", "(== a (< b c))");
    assert_tree("a ^ b * c", "(* (^ a b) c)");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_tree("!a && b", "(&& (Not a) b)");
    assert_tree("-a * b", "(* (Negate a) b)");
    assert_tree("!!a", "(Not (Not a))");
}

#[test]
fn test_negative_literal_is_folded() {
    assert_tree("-5", "-5");
    assert_tree("a - -5", "(- a -5)");
}

#[test]
fn test_member_access_and_calls() {
    assert_tree("a.b", "(. a b)");
    assert_tree("a.b.c", "(. (. a b) c)");
    assert_tree("a.b(c)", "(. a (call b c))");
    assert_tree("f(x).y", "(. (call f x) y)");
    assert_tree("!a.b", "(Not (. a b))");
}

#[test]
fn test_indices() {
    assert_tree("x[1]", "x[1]");
    assert_tree("x[1][2]", "x[1][2]");
    assert_tree("f()[0]", "(index (call f) 0)");
}

#[test]
fn test_named_arguments() {
    assert_tree("f(1, radius: 2)", "(call f 1 radius:2)");
}

#[test]
fn test_ternary() {
    assert_tree("a ? b : c", "(? a b c)");
    assert_tree("a ? b : c ? d : e", "(? a b (? c d e))");
    assert_tree("a || b ? c + 1 : d", "(? (|| a b) (+ c 1) d)");
}

#[test]
fn test_ternary_missing_colon() {
    let (expr, codes) = parse_expr("a ? b");
    assert_eq!(show(&expr), "(? a b ?missing)");
    assert_eq!(codes, vec![ErrorCode::E1004]);
}

#[test]
fn test_colon_without_ternary_ends_expression() {
    let (expr, codes) = parse_expr("a : b");
    assert_eq!(show(&expr), "a");
    assert!(codes.is_empty());
}

#[test]
fn test_squiggle_reduces_left_side() {
    assert_tree("a + b ~ c", "(~ (+ a b) c)");
}

#[test]
fn test_literals() {
    assert_tree("true", "true");
    assert_tree("null", "null");
    assert_tree("this", "this");
    assert_tree("\"text\"", "\"text\"");
    assert_tree("@\"Hello\"", "@\"Hello\"");
    assert_tree("[1, 2, 3]", "[1, 2, 3]");
    assert_tree("new Vector(1, 2)", "(new 1 2)");
    assert_tree("(a + b) * c", "(* (group (+ a b)) c)");
}

#[test]
fn test_type_cast() {
    assert_tree("<Player>x", "(cast x)");
    assert_tree("<Player>x.y", "(cast (. x y))");
}

#[test]
fn test_generics_only_without_indices() {
    let (expr, codes) = parse_expr("f<Player>(x)");
    assert!(codes.is_empty());
    let ExprKind::Invoke { target, .. } = &expr.kind else {
        panic!("expected a call, got {expr:?}");
    };
    let ExprKind::Identifier(identifier) = &target.kind else {
        panic!("expected a name, got {target:?}");
    };
    assert_eq!(identifier.generics.len(), 1);
    assert_tree("a < b", "(< a b)");
}

#[test]
fn test_formatted_string() {
    let (expr, codes) = parse_expr("<\"{0} and {1}\", a, b > c>");
    assert!(codes.is_empty());
    let ExprKind::FormattedString(formatted) = &expr.kind else {
        panic!("expected a formatted string, got {expr:?}");
    };
    let args: Vec<_> = formatted.args.iter().map(show).collect();
    assert_eq!(args, vec!["a", "(> b c)"]);
}

#[test]
fn test_interpolated_string() {
    let (expr, codes) = parse_expr("$\"a {x} b {y + 1} c\"");
    assert!(codes.is_empty());
    let ExprKind::InterpolatedString(string) = &expr.kind else {
        panic!("expected an interpolated string, got {expr:?}");
    };
    assert_eq!(string.head, "$\"a {");
    let parts: Vec<_> = string
        .parts
        .iter()
        .map(|part| (show(&part.value), part.text.as_str()))
        .collect();
    assert_eq!(parts, vec![("x".to_string(), "} b {"), ("(+ y 1)".to_string(), "} c\"")]);
}

#[test]
fn test_interpolated_string_without_holes() {
    let (expr, codes) = parse_expr("$\"plain\"");
    assert!(codes.is_empty());
    let ExprKind::InterpolatedString(string) = &expr.kind else {
        panic!("expected an interpolated string, got {expr:?}");
    };
    assert!(string.parts.is_empty());
}

#[test]
fn test_unterminated_interpolation() {
    let (expr, codes) = parse_expr("$\"a {x");
    assert_eq!(codes, vec![ErrorCode::E1005]);
    let ExprKind::InterpolatedString(string) = &expr.kind else {
        panic!("expected an interpolated string, got {expr:?}");
    };
    assert_eq!(string.parts.len(), 1);
    assert_eq!(string.parts[0].text, "");
}

#[test]
fn test_lambdas() {
    let (expr, codes) = parse_expr("x => x + 1");
    assert!(codes.is_empty());
    let ExprKind::Lambda(lambda) = &expr.kind else {
        panic!("expected a lambda, got {expr:?}");
    };
    assert_eq!(lambda.params.len(), 1);
    assert_eq!(lambda.params[0].name.name, "x");
    assert!(lambda.params[0].ty.is_none());
    let StmtKind::Expression(body) = &lambda.body.kind else {
        panic!("expected an expression body");
    };
    assert_eq!(show(body), "(+ x 1)");

    let (expr, codes) = parse_expr("(Player p, count) => p");
    assert!(codes.is_empty());
    let ExprKind::Lambda(lambda) = &expr.kind else {
        panic!("expected a lambda, got {expr:?}");
    };
    let names: Vec<_> = lambda.params.iter().map(|p| p.name.name.as_str()).collect();
    assert_eq!(names, vec!["p", "count"]);
    assert!(lambda.params[0].ty.is_some());
    assert!(lambda.params[1].ty.is_none());
}

#[test]
fn test_struct_literal() {
    let (expr, codes) = parse_expr("{ x: 1, Number y: 2, ..other }");
    assert!(codes.is_empty());
    let ExprKind::StructLiteral(literal) = &expr.kind else {
        panic!("expected a struct literal, got {expr:?}");
    };
    assert!(!literal.single);
    assert_eq!(literal.fields.len(), 3);
    let StructField::Value { ty, name, .. } = &literal.fields[0] else {
        panic!("expected a field");
    };
    assert!(ty.is_none());
    assert_eq!(name.name, "x");
    let StructField::Value { ty: Some(ty), name, .. } = &literal.fields[1] else {
        panic!("expected a typed field");
    };
    assert!(matches!(ty.kind, TypeKind::Named(_)));
    assert_eq!(name.name, "y");
    assert!(matches!(literal.fields[2], StructField::Spread { .. }));
}

#[test]
fn test_json_import_unquotes() {
    let (expr, codes) = parse_expr("import(\"data.json\")");
    assert!(codes.is_empty());
    assert_eq!(expr.kind, ExprKind::JsonImport(Some("data.json".to_string())));
}

#[test]
fn test_missing_term() {
    let (expr, codes) = parse_expr("a + ;");
    assert_eq!(show(&expr), "(+ a ?missing)");
    assert_eq!(codes, vec![ErrorCode::E1002]);
}

#[test]
fn test_ranges_cover_operands() {
    let (expr, _) = parse_expr("a + bc");
    assert_eq!(expr.range.start.index, 0);
    assert_eq!(expr.range.end.index, 6);

    let (expr, _) = parse_expr("f(x)");
    assert_eq!(expr.range.end.index, 4);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 500;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let (_, codes) = parse_expr(&source);
    assert!(codes.is_empty());
}
