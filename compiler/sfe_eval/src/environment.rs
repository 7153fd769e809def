//! Host-provided variables and functions.
//!
//! An [`Environment`] is a flat list of scopes; each scope names its parent
//! by [`ScopeId`]. Lookups walk from a scope towards the root. The chain is
//! consulted for identifiers only, never for class or object names.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// A host function callable as `name(args...)`.
pub type HostFunction = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Index of a scope within its [`Environment`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The scope every [`Environment`] starts with.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Default)]
struct Scope {
    parent: Option<ScopeId>,
    vars: FxHashMap<String, Value>,
    functions: FxHashMap<String, HostFunction>,
}

/// Chained host scopes.
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    /// Open a scope whose lookups fall back to `parent`.
    ///
    /// # Panics
    /// Panics if `parent` belongs to another environment.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        assert!(parent.index() < self.scopes.len(), "unknown scope {parent:?}");
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        id
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.index()).and_then(|s| s.parent)
    }

    /// # Panics
    /// Panics if `scope` belongs to another environment.
    pub fn set_var(&mut self, scope: ScopeId, name: impl Into<String>, value: impl Into<Value>) {
        self.scopes[scope.index()]
            .vars
            .insert(name.into(), value.into());
    }

    /// # Panics
    /// Panics if `scope` belongs to another environment.
    pub fn set_function<F>(&mut self, scope: ScopeId, name: impl Into<String>, f: F)
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.scopes[scope.index()]
            .functions
            .insert(name.into(), Arc::new(f));
    }

    /// Find `name` in `scope` or its ancestors.
    pub fn lookup_var(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        self.chain(scope).find_map(|s| s.vars.get(name))
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str) -> Option<&HostFunction> {
        self.chain(scope).find_map(|s| s.functions.get(name))
    }

    fn chain(&self, scope: ScopeId) -> impl Iterator<Item = &Scope> {
        let mut next = Some(scope);
        std::iter::from_fn(move || {
            let scope = self.scopes.get(next?.index())?;
            next = scope.parent;
            Some(scope)
        })
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("scopes", &self.scopes.len())
            .finish_non_exhaustive()
    }
}
