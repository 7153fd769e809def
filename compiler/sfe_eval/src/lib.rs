//! Binder and evaluator for SFE config.
//!
//! [`bind`] turns a parsed [`Ast`] into a [`Config`]: classes are resolved
//! along their `extends` chains, objects are instantiated against their
//! class parameters, and every `var` and object field is evaluated to a
//! scalar [`Value`]. The first error aborts binding; no partial result is
//! returned.
//!
//! Identifiers that no declaration binds fall back to a host
//! [`Environment`], which can also supply functions callable from
//! expressions.
//!
//! ```text
//! var scale = 2;
//! class Emitter(rate, size = 4) { area = size * size * scale; }
//! object "smoke" Emitter(rate = 10);
//! ```

mod classes;
mod config;
mod environment;
mod errors;
mod eval;
mod object;
mod operators;
mod value;

pub use config::Config;
pub use environment::{Environment, HostFunction, ScopeId};
pub use errors::{BindError, BindResult};
pub use object::Object;
pub use value::{FromValue, Value};

use sfe_ir::Ast;
use tracing::{debug, instrument};

use crate::classes::ClassTable;
use crate::eval::Evaluator;

/// Bind a parsed unit, looking up free identifiers in `env` from `scope`.
#[instrument(level = "debug", skip_all)]
pub fn bind(ast: &Ast, env: &Environment, scope: ScopeId) -> Result<Config, BindError> {
    let classes = ClassTable::build(ast)?;
    let config = Evaluator::new(ast, env, scope, &classes)?.finish()?;
    debug!(
        classes = classes.len(),
        vars = config.vars().count(),
        objects = config.objects().count(),
        "bound unit"
    );
    Ok(config)
}

#[cfg(test)]
mod tests;
