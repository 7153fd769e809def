use pretty_assertions::assert_eq;
use sfe_diagnostic::ErrorCode;
use sfe_ir::NodeKind;

use super::{expr, parse, parse_err};

#[test]
fn test_precedence_ladder() {
    assert_eq!(expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(expr("a || b && c == d < e + f"), "(|| a (&& b (== c (< d (+ e f)))))");
    assert_eq!(expr("a % 3 != 0"), "(!= (% a 3) 0)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(expr("10 - 3 - 2"), "(- (- 10 3) 2)");
    assert_eq!(expr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    assert_eq!(expr("a < b < c"), "(< (< a b) c)");
}

#[test]
fn test_power_is_right_associative_and_binds_tighter() {
    assert_eq!(expr("2 * 3 ^ 2 ^ 2"), "(* 2 (^ 3 (^ 2 2)))");
    assert_eq!(expr("-2 ^ 2"), "(^ (- 2) 2)");
}

#[test]
fn test_ternary_nests_right() {
    assert_eq!(expr("a ? 1 : b ? 2 : 3"), "(? a 1 (? b 2 3))");
    assert_eq!(expr("a > 1 ? x + 1 : 0"), "(? (> a 1) (+ x 1) 0)");
}

#[test]
fn test_unary_runs_collapse() {
    assert_eq!(expr("!!-x"), "(! (! (- x)))");
    assert_eq!(expr("+1"), "(+ 1)");

    let ast = parse("var x = !-a;");
    let var = ast.root().vars[0];
    let NodeKind::Var { value, .. } = *ast.kind(var) else {
        panic!("expected var");
    };
    let NodeKind::Unary { ops, .. } = *ast.kind(value) else {
        panic!("expected unary");
    };
    assert_eq!(ops.len(), 2);
    assert_eq!((ast.pos(value).line, ast.pos(value).column), (1, 9));
}

#[test]
fn test_literals() {
    assert_eq!(expr("true"), "true");
    assert_eq!(expr("false"), "false");
    assert_eq!(expr("2.5"), "2.5");
    assert_eq!(expr("7"), "7");
    assert_eq!(expr(r#""hi\n""#), r#""hi\n""#);
}

#[test]
fn test_postfix_chain() {
    assert_eq!(expr("panel.size[0](1, x)"), "panel.size[0](1, x)");
    assert_eq!(expr("f()"), "f()");
    assert_eq!(expr("-a.b"), "(- a.b)");
    assert_eq!(expr("{a: 1}.a"), "{a: 1}.a");
}

#[test]
fn test_global_reference() {
    assert_eq!(expr("$rate * 2"), "(* $rate 2)");
    assert_eq!(expr("$panel.size"), "$panel.size");
}

#[test]
fn test_dict_separators_and_keys() {
    assert_eq!(expr(r#"{ a: 1, "b c" = 2; }"#), r#"{a: 1, "b c": 2}"#);
    assert_eq!(expr("{}"), "{}");
    assert_eq!(expr("{ a: { b: 1 } }"), "{a: {b: 1}}");
}

#[test]
fn test_binary_positioned_at_operator() {
    let ast = parse("var x = 1 /\n  0;");
    let NodeKind::Var { value, .. } = *ast.kind(ast.root().vars[0]) else {
        panic!("expected var");
    };
    let pos = ast.pos(value);
    assert_eq!((pos.line, pos.column), (1, 11));
}

#[test]
fn test_expected_expression() {
    let err = parse_err("var x = ;");
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.message, "expected expression, found `;`");
    assert_eq!((err.pos.line, err.pos.column), (1, 9));
}

#[test]
fn test_unclosed_delimiters() {
    let err = parse_err("var x = (1 + 2");
    assert_eq!(err.code, ErrorCode::E1003);
    let (open, _) = err.related.clone().unwrap();
    assert_eq!((open.line, open.column), (1, 9));

    let err = parse_err("var x = { a: 1");
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.message, "unclosed delimiter `{`");

    let err = parse_err("var x = a[1;");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `]`, found `;`");
}

#[test]
fn test_bad_dict_entries() {
    let err = parse_err("var x = { 1: 2 };");
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected dict key, found number");

    let err = parse_err("var x = { a 2 };");
    assert_eq!(err.message, "expected `:` or `=`, found number");

    let err = parse_err("var x = { a: 1 b: 2 };");
    assert_eq!(err.message, "expected `}`, found identifier `b`");
}

#[test]
fn test_lex_errors_surface_with_their_codes() {
    let err = parse_err("var x = 1 & 2;");
    assert_eq!(err.code, ErrorCode::E0006);
    assert_eq!((err.pos.line, err.pos.column), (1, 11));

    let err = parse_err("var s = \"open;");
    assert_eq!(err.code, ErrorCode::E0001);

    let err = parse_err("var n = 99999999999999999999;");
    assert_eq!(err.code, ErrorCode::E0003);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 20_000;
    let source = format!("var x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let ast = parse(&source);
    assert_eq!(ast.root().vars.len(), 1);
}

#[test]
fn test_oversized_operator_run_is_rejected() {
    let source = format!("var x = {}a;", "!".repeat(70_000));
    let err = parse_err(&source);
    assert_eq!(err.code, ErrorCode::E1008);
}

#[test]
fn test_most_negative_integer_literal() {
    assert_eq!(expr("-9223372036854775808"), "-9223372036854775808");
    assert_eq!(expr("!-9223372036854775808"), "(! -9223372036854775808)");
    assert_eq!(expr("- -9223372036854775808"), "(- -9223372036854775808)");
    assert_eq!(expr("-9223372036854775807"), "(- 9223372036854775807)");

    let ast = parse("var x =\n  -9223372036854775808;");
    let NodeKind::Var { value, .. } = *ast.kind(ast.root().vars[0]) else {
        panic!("expected var");
    };
    assert!(matches!(*ast.kind(value), NodeKind::Int(i64::MIN)));
    let pos = ast.pos(value);
    assert_eq!((pos.line, pos.column), (2, 3));

    // Only a prefix minus can absorb the magnitude.
    let err = parse_err("var x = 1 - 9223372036854775808;");
    assert_eq!(err.code, ErrorCode::E0003);
    assert_eq!((err.pos.line, err.pos.column), (1, 13));
}
