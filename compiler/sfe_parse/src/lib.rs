//! Recursive descent parser for SFE config.
//!
//! Parses one unit into a caller-owned [`Ast`]: the root file plus every
//! file it includes, with declarations merged into [`Ast::root`] in source
//! order. The first error aborts the unit and no partial result is kept;
//! callers reuse the `Ast` after [`Ast::reset`].
//!
//! Includes are resolved through a [`SourceLoader`] relative to the file
//! containing the directive.

mod cursor;
mod error;
mod grammar;
mod loader;

pub use cursor::Cursor;
pub use error::ParseError;
pub use loader::{normalize, FsLoader, MemoryLoader, SourceLoader};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sfe_ir::{Ast, FileId, NodeId};
use tracing::{debug, instrument};

/// Include nesting allowed by default.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Parser configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    /// Deepest chain of nested `include` directives accepted.
    pub max_include_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

/// State shared by the parsers of every file in a unit.
struct Session<'s> {
    ast: &'s mut Ast,
    loader: &'s dyn SourceLoader,
    options: ParseOptions,
    /// Resolved paths of the files currently being parsed, root first.
    include_stack: Vec<PathBuf>,
}

/// Parser for one file of a unit.
pub(crate) struct Parser<'a, 's> {
    cursor: Cursor<'a>,
    session: &'a mut Session<'s>,
    /// Resolved path of this file; includes are relative to it.
    path: PathBuf,
    /// Primary already consumed by a declaration, picked up by the next
    /// `parse_primary` call.
    pending: Option<NodeId>,
}

impl<'a, 's> Parser<'a, 's> {
    fn new(
        source: &'a str,
        file: FileId,
        path: PathBuf,
        session: &'a mut Session<'s>,
    ) -> Result<Self, ParseError> {
        Ok(Parser {
            cursor: Cursor::new(source, file)?,
            session,
            path,
            pending: None,
        })
    }

    #[inline]
    fn ast(&self) -> &Ast {
        &*self.session.ast
    }

    #[inline]
    fn ast_mut(&mut self) -> &mut Ast {
        &mut *self.session.ast
    }
}

/// Parse `text` as the root file of a unit.
///
/// `path` names the file in diagnostics and anchors relative includes.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_source(
    ast: &mut Ast,
    path: impl AsRef<Path>,
    text: impl Into<Arc<str>>,
    loader: &dyn SourceLoader,
    options: ParseOptions,
) -> Result<(), ParseError> {
    let path = path.as_ref();
    let text: Arc<str> = text.into();
    let file = ast.sources_mut().add(path, Arc::clone(&text));
    let resolved = loader.resolve(Path::new(""), path);

    let mut session = Session {
        ast,
        loader,
        options,
        include_stack: vec![resolved.clone()],
    };
    let mut parser = Parser::new(&text, file, resolved, &mut session)?;
    parser.parse_unit()?;

    let root = session.ast.root();
    debug!(
        vars = root.vars.len(),
        classes = root.classes.len(),
        objects = root.objects.len(),
        nodes = session.ast.node_count(),
        files = session.ast.sources().len(),
        "parsed unit"
    );
    Ok(())
}

/// Parse a self-contained unit whose includes come from `loader`.
///
/// Convenience for tests and embedders that already hold the text.
pub fn parse_str(
    text: &str,
    loader: &dyn SourceLoader,
    options: ParseOptions,
) -> Result<Ast, ParseError> {
    let mut ast = Ast::default();
    parse_source(&mut ast, "<input>", text, loader, options)?;
    Ok(ast)
}

#[cfg(test)]
mod tests;
