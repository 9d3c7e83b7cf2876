use ostw_diagnostic::ErrorCode;
use ostw_ir::ast::{
    AttributeKind, ClassKind, Declaration, FunctionBody, RootContext, RootItem, StmtKind,
    SubroutineScope, TypeKind,
};
use ostw_ir::{DeclarationKeyword, ParserSettings, SourceText};
use ostw_lexer::VanillaSymbols;
use pretty_assertions::assert_eq;

use crate::parse;

fn parse_root_with(source: &str, settings: ParserSettings) -> (RootContext, Vec<ErrorCode>) {
    let output = parse(&SourceText::new(source), settings, &VanillaSymbols::empty());
    let codes = output.diagnostics.iter().map(|d| d.code).collect();
    (output.root, codes)
}

fn parse_root(source: &str) -> (RootContext, Vec<ErrorCode>) {
    parse_root_with(source, ParserSettings::default())
}

fn parse_clean(source: &str) -> RootContext {
    let (root, codes) = parse_root(source);
    assert_eq!(codes, Vec::<ErrorCode>::new(), "source: {source}");
    root
}

#[test]
fn test_import() {
    let root = parse_clean("import \"lib/util.ostw\";\nimport \"other.ostw\" as other;");
    let [RootItem::Import(first), RootItem::Import(second)] = root.items.as_slice() else {
        panic!("expected two imports, got {:?}", root.items);
    };
    assert_eq!(first.file.as_deref(), Some("lib/util.ostw"));
    assert!(first.alias.is_none());
    assert_eq!(
        second.alias.as_ref().map(|alias| alias.name.as_str()),
        Some("other")
    );
}

#[test]
fn test_rule_header() {
    let root = parse_clean(
        "disabled rule: \"Heal\" -1 Event.OngoingPlayer Team.Team1\nif (a)\n# second\nif (b)\n{\n    heal();\n}",
    );
    let [RootItem::Rule(rule)] = root.items.as_slice() else {
        panic!("expected a rule, got {:?}", root.items);
    };
    assert!(rule.disabled);
    assert_eq!(rule.name.as_deref(), Some("Heal"));
    let Some(order) = &rule.order else {
        panic!("expected an order");
    };
    assert_eq!(order.kind, ostw_ir::ast::ExprKind::Number("-1".to_string()));
    let settings: Vec<_> = rule
        .settings
        .iter()
        .map(|s| format!("{}.{}", s.setting.name, s.value.name))
        .collect();
    assert_eq!(settings, vec!["Event.OngoingPlayer", "Team.Team1"]);
    assert_eq!(rule.conditions.len(), 2);
    assert!(rule.conditions[0].comment.is_none());
    assert!(rule.conditions[1].comment.is_some());
    assert!(matches!(rule.body.kind, StmtKind::Block(_)));
}

#[test]
fn test_class_members() {
    let root = parse_clean(
        "class Box<T> : Base, Other {\n    public Number x = 1;\n    constructor(Number a) { }\n    void Print() { }\n    static Number Twice(Number n): n * 2;\n}",
    );
    let [RootItem::Class(class)] = root.items.as_slice() else {
        panic!("expected a class, got {:?}", root.items);
    };
    assert_eq!(class.kind, ClassKind::Class);
    assert_eq!(class.name.name, "Box");
    assert_eq!(class.type_params.len(), 1);
    assert_eq!(class.inherits.len(), 2);
    assert_eq!(class.constructors.len(), 1);
    assert_eq!(class.constructors[0].params.len(), 1);
    assert_eq!(class.declarations.len(), 3);

    let Declaration::Variable(field) = &class.declarations[0] else {
        panic!("expected a field");
    };
    assert_eq!(field.attributes.len(), 1);
    assert_eq!(field.attributes[0].kind, AttributeKind::Public);

    let Declaration::Function(print) = &class.declarations[1] else {
        panic!("expected a method");
    };
    assert!(matches!(print.return_type.kind, TypeKind::Void));
    assert!(matches!(print.body, FunctionBody::Block { subroutine: None, .. }));

    let Declaration::Function(twice) = &class.declarations[2] else {
        panic!("expected a macro");
    };
    assert!(matches!(twice.body, FunctionBody::Macro(_)));
}

#[test]
fn test_single_struct() {
    let root = parse_clean("# A point\nsingle struct Point { Number x; Number y; }");
    let [RootItem::Class(class)] = root.items.as_slice() else {
        panic!("expected a struct, got {:?}", root.items);
    };
    assert!(class.single);
    assert_eq!(class.kind, ClassKind::Struct);
    assert!(class.comment.is_some());
    assert_eq!(class.declarations.len(), 2);
}

#[test]
fn test_enum_and_alias() {
    let root = parse_clean("enum Mode { Off, On = 2 }\ntype Id = Number;");
    let [RootItem::Enum(mode), RootItem::TypeAlias(alias)] = root.items.as_slice() else {
        panic!("expected an enum and an alias, got {:?}", root.items);
    };
    assert_eq!(mode.values.len(), 2);
    assert!(mode.values[0].value.is_none());
    assert!(mode.values[1].value.is_some());
    assert_eq!(alias.name.name, "Id");
}

#[test]
fn test_workshop_variables() {
    let root = parse_clean(
        "globalvar Number score 5;\nplayervar define items!;\nglobalvar define pair {\"a\"[0], \"b\"[..]};",
    );
    let vars: Vec<_> = root
        .items
        .iter()
        .map(|item| match item {
            RootItem::Declaration(Declaration::Variable(var)) => var,
            other => panic!("expected a variable, got {other:?}"),
        })
        .collect();
    assert_eq!(vars[0].workshop_id.as_deref(), Some("5"));
    assert_eq!(vars[0].attributes[0].kind, AttributeKind::GlobalVar);
    assert!(vars[1].extended);

    let Some(target) = &vars[2].target else {
        panic!("expected a target list");
    };
    assert_eq!(target.targets.len(), 2);
    assert_eq!(target.targets[0].name, "a");
    assert!(target.targets[0].indexer[0].is_some());
    assert!(target.targets[1].indexer[0].is_none());
}

#[test]
fn test_subroutine_function() {
    let root = parse_clean("void Reset() playervar \"ResetSub\" : \"Target\" { }\nvoid Named() \"Sub\" { }");
    let subroutines: Vec<_> = root
        .items
        .iter()
        .map(|item| match item {
            RootItem::Declaration(Declaration::Function(function)) => match &function.body {
                FunctionBody::Block { subroutine, .. } => subroutine.clone(),
                FunctionBody::Macro(_) => panic!("expected a block body"),
            },
            other => panic!("expected a function, got {other:?}"),
        })
        .collect();
    let Some(Some(first)) = subroutines.first() else {
        panic!("expected a subroutine");
    };
    assert_eq!(first.scope, Some(SubroutineScope::Player));
    assert_eq!(first.name.as_deref(), Some("ResetSub"));
    assert_eq!(first.target.as_deref(), Some("Target"));
    let Some(Some(second)) = subroutines.get(1) else {
        panic!("expected a subroutine");
    };
    assert!(second.scope.is_none());
    assert_eq!(second.name.as_deref(), Some("Sub"));
}

#[test]
fn test_hooks_and_reservations() {
    let root = parse_clean("a.b = 5;\nglobalvar { \"x\", 3 }\nplayervar { \"y\" }");
    assert!(root.items.is_empty());
    assert_eq!(root.hooks.len(), 1);
    let reserved: Vec<_> = root
        .globalvar_reservations
        .iter()
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(reserved, vec!["x", "3"]);
    assert_eq!(root.playervar_reservations.len(), 1);
}

fn declared_type_is_define(root: &RootContext) -> bool {
    match root.items.as_slice() {
        [RootItem::Declaration(Declaration::Variable(var))] => {
            matches!(&var.ty.kind, TypeKind::Named(named) if named.is_define)
        }
        other => panic!("expected one variable, got {other:?}"),
    }
}

#[test]
fn test_declaration_keyword_setting() {
    let (root, codes) = parse_root_with(
        "var x = 1;",
        ParserSettings::with_declaration_keyword(DeclarationKeyword::Var),
    );
    assert!(codes.is_empty());
    assert!(declared_type_is_define(&root));

    // Under the default keyword `var` is just a type name.
    let root = parse_clean("var x = 1;");
    assert!(!declared_type_is_define(&root));
    assert!(declared_type_is_define(&parse_clean("define x = 1;")));
}

#[test]
fn test_unexpected_root_tokens_are_skipped() {
    let (root, codes) = parse_root(") ] enum E { A }");
    assert_eq!(codes, vec![ErrorCode::E1001, ErrorCode::E1001]);
    assert!(matches!(root.items.as_slice(), [RootItem::Enum(_)]));
}

#[test]
fn test_stray_comment_at_root() {
    let root = parse_clean("# nothing follows\n");
    assert!(root.items.is_empty());
}
