//! Command handlers for the `sfec` CLI.
//!
//! Each handler prints its result to stdout and reports failures as
//! rendered diagnostics on stderr, exiting with status 1.

use std::io::IsTerminal;

use sfe_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, TerminalEmitter};
use sfe_ir::SourceMap;

use crate::LoadError;

mod check;
mod debug;
mod explain;

pub use check::{check_file, dump_file};
pub use debug::{lex_file, parse_file};
pub use explain::explain_error;

/// Read a source file for commands that work on a single file.
pub(crate) fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|source| {
        fail(&LoadError::Io {
            path: path.into(),
            source,
        })
    })
}

/// Render one diagnostic to stderr.
pub(crate) fn emit(diagnostic: &Diagnostic, sources: &SourceMap) {
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, std::io::stderr().is_terminal())
        .with_sources(sources);
    emitter.emit(diagnostic);
    emitter.flush();
}

/// Report a failed load and exit.
pub(crate) fn fail(error: &LoadError) -> ! {
    match error {
        LoadError::Io { .. } => eprintln!("{error}"),
        LoadError::Diagnostic {
            diagnostic,
            sources,
        } => emit(diagnostic, sources),
    }
    std::process::exit(1);
}
