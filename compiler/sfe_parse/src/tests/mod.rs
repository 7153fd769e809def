#![allow(clippy::unwrap_used, clippy::expect_used)]

mod decl;
mod expr;

use crate::{parse_str, MemoryLoader, ParseError, ParseOptions};
use sfe_ir::Ast;

fn parse(source: &str) -> Ast {
    match parse_str(source, &MemoryLoader::new(), ParseOptions::default()) {
        Ok(ast) => ast,
        Err(err) => panic!("parse failed: {err}"),
    }
}

fn parse_err(source: &str) -> ParseError {
    match parse_str(source, &MemoryLoader::new(), ParseOptions::default()) {
        Ok(ast) => panic!("expected an error, parsed:\n{}", ast.render_root()),
        Err(err) => err,
    }
}

/// Render the expression `source` via `var x = source;`.
fn expr(source: &str) -> String {
    let ast = parse(&format!("var x = {source};"));
    let var = ast.root().vars[0];
    match *ast.kind(var) {
        sfe_ir::NodeKind::Var { value, .. } => ast.render(value),
        ref other => panic!("expected var, got {}", other.label()),
    }
}
