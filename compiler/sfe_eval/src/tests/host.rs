use pretty_assertions::assert_eq;
use sfe_diagnostic::ErrorCode;

use super::{bind_err, bind_with};
use crate::{Environment, ScopeId, Value};

fn host() -> Environment {
    let mut env = Environment::new();
    env.set_var(ScopeId::ROOT, "screen_w", 800);
    env.set_var(ScopeId::ROOT, "title", "demo");
    env.set_function(ScopeId::ROOT, "max", |args| {
        let mut best: Option<i64> = None;
        for arg in args {
            let Value::Int64(v) = *arg else {
                return Err(format!("expected int, found {}", arg.type_name()));
            };
            best = Some(best.map_or(v, |b| b.max(v)));
        }
        best.map(Value::Int64).ok_or_else(|| "no arguments".to_owned())
    });
    env
}

#[test]
fn test_host_variables() {
    let env = host();
    let config = bind_with("var half = screen_w / 2; var t = title + \"!\";", &env, ScopeId::ROOT).unwrap();
    assert_eq!(config.get_var::<i64>("half"), Some(400));
    assert_eq!(config.get_var::<String>("t").as_deref(), Some("demo!"));
}

#[test]
fn test_root_var_shadows_host() {
    let env = host();
    let config = bind_with("var screen_w = 1; var y = screen_w;", &env, ScopeId::ROOT).unwrap();
    assert_eq!(config.get_var::<i64>("y"), Some(1));
}

#[test]
fn test_child_scope_overrides_parent() {
    let mut env = host();
    let child = env.push_scope(ScopeId::ROOT);
    env.set_var(child, "screen_w", 1024);
    let config = bind_with("var w = screen_w; var m = max(1, 2);", &env, child).unwrap();
    assert_eq!(config.get_var::<i64>("w"), Some(1024));
    assert_eq!(config.get_var::<i64>("m"), Some(2));
}

#[test]
fn test_host_function_calls() {
    let env = host();
    let config = bind_with(
        "var m = max(3, 7, 5) + 1; object \"o\" { a: $max(a_base, 2), a_base: 9 };",
        &env,
        ScopeId::ROOT,
    )
    .unwrap();
    assert_eq!(config.get_var::<i64>("m"), Some(8));
    assert_eq!(config.get_object("o").unwrap().get_as::<i64>("a"), Some(9));
}

#[test]
fn test_host_function_failure() {
    let env = host();
    let err = bind_with("var m = max();", &env, ScopeId::ROOT).unwrap_err();
    assert_eq!(err.code, ErrorCode::E3008);
    assert_eq!(err.message, "host function `max` failed: no arguments");

    let err = bind_with("var m = max(1, \"x\");", &env, ScopeId::ROOT).unwrap_err();
    assert_eq!(err.message, "host function `max` failed: expected int, found string");
}

#[test]
fn test_not_callable() {
    let err = bind_err("var m = nope(1);");
    assert_eq!(err.code, ErrorCode::E3007);
    assert_eq!(err.message, "`nope` is not callable");

    let err = bind_err("var m = {a: 1}.a(2);");
    assert_eq!(err.code, ErrorCode::E3007);
    assert_eq!(err.message, "int value is not callable");
}
