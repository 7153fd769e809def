use pretty_assertions::assert_eq;
use sfe_diagnostic::ErrorCode;
use sfe_ir::NodeKind;

use super::{parse, parse_err};

#[test]
fn test_declarations_render_in_root_order() {
    let ast = parse(
        r#"
        // particle defaults
        var rate = 7;
        class Emitter(h, v = 2) extends Base { size: h * v; }
        class Base { kind = "base" }
        object "smoke" Emitter(h = 1, v = 3);
        object "inline" { x: 1 };
        "#,
    );
    assert_eq!(
        ast.render_root(),
        concat!(
            "(var rate 7)\n",
            "(class Emitter (h v=2) (extends Base) {size: (* h v)})\n",
            "(class Base () {kind: \"base\"})\n",
            "(object \"smoke\" Emitter h=1 v=3)\n",
            "(object \"inline\" {x: 1})\n",
        )
    );
}

#[test]
fn test_class_forms() {
    let ast = parse(
        "class A { v = 1; }\n\
         class B(x,) extends A, C { };\n\
         class D() {}",
    );
    assert_eq!(
        ast.render_root(),
        "(class A () {v: 1})\n(class B (x) (extends A C) {})\n(class D () {})\n"
    );
}

#[test]
fn test_object_with_identifier_head_is_inline() {
    let ast = parse(
        r#"
        object "alias" shared.panel;
        object "pick" debug ? { a: 1 } : { a: 2 };
        object "empty" Base();
        "#,
    );
    assert_eq!(
        ast.render_root(),
        concat!(
            "(object \"alias\" shared.panel)\n",
            "(object \"pick\" (? debug {a: 1} {a: 2}))\n",
            "(object \"empty\" Base)\n",
        )
    );
    let kinds: Vec<_> = ast
        .root()
        .objects
        .iter()
        .map(|&id| ast.kind(id).label())
        .collect();
    assert_eq!(kinds, ["ObjInl", "ObjInl", "ObjInst"]);
}

#[test]
fn test_declaration_positions() {
    let ast = parse("var a = 1;\n  class C { }\nobject \"o\" C();");
    let var = ast.pos(ast.root().vars[0]);
    let class = ast.pos(ast.root().classes[0]);
    let object = ast.pos(ast.root().objects[0]);
    assert_eq!((var.line, var.column), (1, 1));
    assert_eq!((class.line, class.column), (2, 3));
    assert_eq!((object.line, object.column), (3, 1));
}

#[test]
fn test_param_defaults_are_recorded() {
    let ast = parse("class P(a, b = 1 + 1) {}");
    let NodeKind::Class { params, .. } = *ast.kind(ast.root().classes[0]) else {
        panic!("expected class");
    };
    let params = ast.params(params);
    assert_eq!(params.len(), 2);
    assert!(!params[0].default.is_valid());
    assert_eq!(ast.render(params[1].default), "(+ 1 1)");
    assert_eq!((params[1].pos.line, params[1].pos.column), (1, 12));
}

#[test]
fn test_empty_unit() {
    let ast = parse("  /* nothing */ // here\n");
    assert!(ast.root().is_empty());
    assert_eq!(ast.sources().len(), 1);
}

#[test]
fn test_missing_semicolon() {
    let err = parse_err("var a = 1\nvar b = 2;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `;`, found `var`");
    assert_eq!((err.pos.line, err.pos.column), (2, 1));
}

#[test]
fn test_unexpected_top_level_token() {
    let err = parse_err("a = 1;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(
        err.message,
        "expected `var`, `class`, `object` or `include`, found identifier `a`"
    );
}

#[test]
fn test_expected_identifier() {
    let err = parse_err("var 1 = 2;");
    assert_eq!(err.code, ErrorCode::E1004);
    assert_eq!(err.message, "expected identifier, found number");

    let err = parse_err("class A extends { }");
    assert_eq!(err.code, ErrorCode::E1004);
}

#[test]
fn test_object_name_must_be_a_string() {
    let err = parse_err("object smoke Emitter();");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(
        err.message,
        "expected object name string, found identifier `smoke`"
    );
}

#[test]
fn test_instantiation_arguments_are_named() {
    let err = parse_err(r#"object "o" C(1);"#);
    assert_eq!(err.code, ErrorCode::E1004);

    let err = parse_err(r#"object "o" C(a = 1"#);
    assert_eq!(err.code, ErrorCode::E1003);
}

#[test]
fn test_class_needs_body() {
    let err = parse_err("class A;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected class body `{`, found `;`");
}

#[test]
fn test_error_converts_to_diagnostic() {
    let err = parse_err("var x = (1");
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
}
