//! Debug commands: `lex` and `parse` for inspecting the front end.

use sfe_ir::{FileId, SourceMap, TokenKind};
use sfe_lexer::tokenize;

use super::{emit, fail, read_file};
use crate::LoadOptions;

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let file = FileId::new(0);
    let lexemes = tokenize(&content, file);

    println!("Tokens for '{}' ({} tokens):", path, lexemes.len());
    for lexeme in &lexemes {
        match lexeme.kind {
            TokenKind::Ident | TokenKind::String => {
                println!("  {:?} {:?} @ {}:{}", lexeme.kind, lexeme.string, lexeme.line, lexeme.column);
            }
            TokenKind::Int => {
                println!("  Int {} @ {}:{}", lexeme.integer, lexeme.line, lexeme.column);
            }
            TokenKind::Real => {
                println!("  Real {:?} @ {}:{}", lexeme.real, lexeme.line, lexeme.column);
            }
            _ => println!("  {:?} @ {}:{}", lexeme.kind, lexeme.line, lexeme.column),
        }
        if let Some(error) = &lexeme.error {
            let mut sources = SourceMap::new();
            sources.add(path, content.as_str());
            emit(&error.to_diagnostic(lexeme.position(file)), &sources);
            std::process::exit(1);
        }
    }
}

/// Parse a file (with its includes) and display the declarations.
pub fn parse_file(path: &str) {
    let ast = match crate::parse_file(path, &LoadOptions::default()) {
        Ok(ast) => ast,
        Err(err) => fail(&err),
    };
    let root = ast.root();

    println!("Parse result for '{path}':");
    println!("  Files: {}", ast.sources().len());
    println!("  Vars: {}", root.vars.len());
    println!("  Classes: {}", root.classes.len());
    println!("  Objects: {}", root.objects.len());
    println!("  Nodes: {}", ast.node_count());
    println!(
        "  Arena: {} bytes in {} segment(s)",
        ast.arena().total_bytes(),
        ast.arena().segment_count()
    );
    println!();
    print!("{}", ast.render_root());
}
