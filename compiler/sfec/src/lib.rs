//! SFE config loader.
//!
//! One call from a root file to a bound [`Config`]: the file is read,
//! parsed together with everything it includes, and bound against a host
//! [`Environment`]. Any lex, parse or bind failure comes back as a
//! [`LoadError::Diagnostic`] that carries the sources needed to render it.
//!
//! ```no_run
//! use sfec::{load_file, Environment, LoadOptions, ScopeId};
//!
//! let mut env = Environment::new();
//! env.set_var(ScopeId::ROOT, "screen_w", 1280);
//! let config = load_file("assets/particles.sfe", &env, ScopeId::ROOT, &LoadOptions::default())?;
//! let rate: Option<f64> = config.get_object("smoke").and_then(|o| o.get_as("rate"));
//! # Ok::<(), sfec::LoadError>(())
//! ```

pub mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use sfe_diagnostic::Diagnostic;
use sfe_ir::{Ast, SourceMap};
use sfe_parse::{parse_source, FsLoader, ParseOptions, SourceLoader, DEFAULT_MAX_INCLUDE_DEPTH};
use tracing::debug;

pub use sfe_eval::{
    bind, BindError, Config, Environment, FromValue, HostFunction, Object, ScopeId, Value,
};
pub use sfe_ir::ArenaConfig;

/// Knobs for one load.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LoadOptions {
    /// Sizing of the syntax arena.
    pub arena: ArenaConfig,
    /// Deepest chain of nested `include` directives accepted.
    pub max_include_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            arena: ArenaConfig::default(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl LoadOptions {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_include_depth: self.max_include_depth,
        }
    }
}

/// Why a load failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The root file could not be read. Include failures are diagnostics.
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A lex, parse or bind error.
    #[error("{diagnostic}")]
    Diagnostic {
        diagnostic: Box<Diagnostic>,
        /// Every file read before the failure; label positions refer to it.
        sources: SourceMap,
    },
}

impl LoadError {
    fn diagnostic(diagnostic: Diagnostic, ast: &Ast) -> Self {
        LoadError::Diagnostic {
            diagnostic: Box::new(diagnostic),
            sources: ast.sources().clone(),
        }
    }

    /// Error code, for diagnostics.
    pub fn code(&self) -> Option<sfe_diagnostic::ErrorCode> {
        match self {
            LoadError::Io { .. } => None,
            LoadError::Diagnostic { diagnostic, .. } => Some(diagnostic.code),
        }
    }
}

/// Parse the file at `path` and everything it includes.
pub fn parse_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Ast, LoadError> {
    let path = path.as_ref();
    let loader = FsLoader;
    let text = loader.load(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    let mut ast = Ast::new(options.arena);
    parse_source(&mut ast, path, text, &loader, options.parse_options())
        .map_err(|err| LoadError::diagnostic(err.to_diagnostic(), &ast))?;
    Ok(ast)
}

/// Parse and bind the file at `path`.
pub fn load_file(
    path: impl AsRef<Path>,
    env: &Environment,
    scope: ScopeId,
    options: &LoadOptions,
) -> Result<Config, LoadError> {
    let ast = parse_file(path, options)?;
    bind_ast(&ast, env, scope)
}

/// Parse and bind `text`; relative includes resolve from the working
/// directory.
pub fn load_str(
    text: &str,
    env: &Environment,
    scope: ScopeId,
    options: &LoadOptions,
) -> Result<Config, LoadError> {
    let mut ast = Ast::new(options.arena);
    parse_source(&mut ast, "<input>", text, &FsLoader, options.parse_options())
        .map_err(|err| LoadError::diagnostic(err.to_diagnostic(), &ast))?;
    bind_ast(&ast, env, scope)
}

fn bind_ast(ast: &Ast, env: &Environment, scope: ScopeId) -> Result<Config, LoadError> {
    let config = bind(ast, env, scope).map_err(|err| LoadError::diagnostic(err.to_diagnostic(), ast))?;
    debug!(
        arena_bytes = ast.arena().total_bytes(),
        segments = ast.arena().segment_count(),
        "loaded"
    );
    Ok(config)
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
/// Try `RUST_LOG=sfe_parse=debug` or `RUST_LOG=sfe_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
                .with(filter)
                .init();
        }
    });
}
