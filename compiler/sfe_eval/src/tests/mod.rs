#![allow(clippy::unwrap_used, clippy::expect_used)]

mod host;

use sfe_parse::{parse_str, MemoryLoader, ParseOptions};

use crate::{bind, BindError, Config, Environment, ScopeId, Value};

fn bind_with(source: &str, env: &Environment, scope: ScopeId) -> Result<Config, BindError> {
    let ast = match parse_str(source, &MemoryLoader::new(), ParseOptions::default()) {
        Ok(ast) => ast,
        Err(err) => panic!("parse failed: {err}"),
    };
    bind(&ast, env, scope)
}

fn bind_ok(source: &str) -> Config {
    match bind_with(source, &Environment::new(), ScopeId::ROOT) {
        Ok(config) => config,
        Err(err) => panic!("bind failed: {err}"),
    }
}

fn bind_err(source: &str) -> BindError {
    match bind_with(source, &Environment::new(), ScopeId::ROOT) {
        Ok(config) => panic!("expected an error, bound {config:?}"),
        Err(err) => err,
    }
}

/// Value of `x` after binding `var x = source;`.
fn eval(source: &str) -> Value {
    bind_ok(&format!("var x = {source};"))
        .get_var::<Value>("x")
        .unwrap()
}

/// Render object `name` of a bound unit.
fn object(config: &Config, name: &str) -> String {
    config.get_object(name).unwrap().to_string()
}
