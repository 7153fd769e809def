//! Class table and inheritance resolution.
//!
//! Each class is linearized by a depth-first, post-order walk of its
//! `extends` list: bases come before the classes deriving from them and a
//! shared ancestor appears once, at its first position. Bodies and
//! parameter lists are merged along that order so later (more derived)
//! classes override earlier ones.

use rustc_hash::{FxHashMap, FxHashSet};
use sfe_ir::{Ast, Name, NodeId, NodeKind, Position};
use sfe_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::errors::{self, BindResult};

/// One inherited or declared parameter after merging.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct ResolvedParam {
    pub name: Name,
    /// Default expression, from the most derived declaration that has one.
    pub default: Option<NodeId>,
    pub pos: Position,
}

/// One key of a merged class body.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct BodyEntry {
    pub key: Name,
    pub value: NodeId,
    pub pos: Position,
}

/// A class with its ancestors folded in.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResolvedClass {
    /// Class names, bases first, ending with the class itself.
    pub linearization: Vec<Name>,
    pub params: Vec<ResolvedParam>,
    pub body: Vec<BodyEntry>,
}

impl ResolvedClass {
    pub fn param(&self, name: Name) -> Option<&ResolvedParam> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Every class of a unit, resolved.
#[derive(Debug, Default)]
pub(crate) struct ClassTable {
    classes: FxHashMap<Name, ResolvedClass>,
}

struct ClassDecl {
    node: NodeId,
    pos: Position,
}

impl ClassTable {
    /// Check declarations and resolve every class, used or not.
    pub fn build(ast: &Ast) -> BindResult<Self> {
        let mut decls: FxHashMap<Name, ClassDecl> = FxHashMap::default();
        for &node in &ast.root().classes {
            let NodeKind::Class { name, params, .. } = *ast.kind(node) else {
                continue;
            };
            let pos = ast.pos(node);
            if let Some(first) = decls.get(&name) {
                return Err(errors::duplicate_class(ast.name_str(name), pos, first.pos));
            }
            check_own_params(ast, name, ast.params(params))?;
            decls.insert(name, ClassDecl { node, pos });
        }

        let mut table = ClassTable::default();
        for &node in &ast.root().classes {
            let NodeKind::Class { name, .. } = *ast.kind(node) else {
                continue;
            };
            let linearization = linearize(ast, &decls, name)?;
            let resolved = merge(ast, &decls, linearization);
            debug!(
                class = ast.name_str(name),
                linearization = ?resolved
                    .linearization
                    .iter()
                    .map(|&n| ast.name_str(n))
                    .collect::<Vec<_>>(),
                params = resolved.params.len(),
                keys = resolved.body.len(),
                "resolved class"
            );
            table.classes.insert(name, resolved);
        }
        Ok(table)
    }

    pub fn get(&self, name: Name) -> Option<&ResolvedClass> {
        self.classes.get(&name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

fn check_own_params(ast: &Ast, class: Name, params: &[sfe_ir::ParamDecl]) -> BindResult<()> {
    let mut seen: FxHashMap<Name, Position> = FxHashMap::default();
    for param in params {
        if let Some(&first) = seen.get(&param.name) {
            return Err(errors::duplicate_parameter(
                ast.name_str(param.name),
                ast.name_str(class),
                param.pos,
                first,
            ));
        }
        seen.insert(param.name, param.pos);
    }
    Ok(())
}

fn linearize(ast: &Ast, decls: &FxHashMap<Name, ClassDecl>, class: Name) -> BindResult<Vec<Name>> {
    let mut walk = Walk {
        ast,
        decls,
        stack: Vec::new(),
        done: FxHashSet::default(),
        order: Vec::new(),
    };
    walk.visit(class)?;
    Ok(walk.order)
}

struct Walk<'a> {
    ast: &'a Ast,
    decls: &'a FxHashMap<Name, ClassDecl>,
    /// Classes whose bases are being visited.
    stack: Vec<Name>,
    done: FxHashSet<Name>,
    order: Vec<Name>,
}

impl Walk<'_> {
    fn visit(&mut self, class: Name) -> BindResult<()> {
        if self.done.contains(&class) {
            return Ok(());
        }
        let (ast, decls) = (self.ast, self.decls);
        let decl = &decls[&class];
        if let Some(start) = self.stack.iter().position(|&c| c == class) {
            let mut path: Vec<&str> = self.stack[start..]
                .iter()
                .map(|&c| ast.name_str(c))
                .collect();
            path.push(ast.name_str(class));
            return Err(errors::inheritance_cycle(&path, decl.pos));
        }

        let NodeKind::Class { bases, .. } = *ast.kind(decl.node) else {
            return Ok(());
        };
        self.stack.push(class);
        for &base in ast.names(bases) {
            if !decls.contains_key(&base) {
                return Err(errors::unknown_base(
                    ast.name_str(base),
                    ast.name_str(class),
                    decl.pos,
                ));
            }
            ensure_sufficient_stack(|| self.visit(base))?;
        }
        self.stack.pop();

        self.done.insert(class);
        self.order.push(class);
        Ok(())
    }
}

/// Fold bodies and parameters along a linearization.
fn merge(ast: &Ast, decls: &FxHashMap<Name, ClassDecl>, linearization: Vec<Name>) -> ResolvedClass {
    let mut params: Vec<ResolvedParam> = Vec::new();
    let mut param_index: FxHashMap<Name, usize> = FxHashMap::default();
    let mut body: Vec<BodyEntry> = Vec::new();
    let mut body_index: FxHashMap<Name, usize> = FxHashMap::default();

    for class in &linearization {
        let NodeKind::Class {
            params: own_params,
            body: own_body,
            ..
        } = *ast.kind(decls[class].node)
        else {
            continue;
        };

        for param in ast.params(own_params) {
            let default = param.default.to_option();
            match param_index.get(&param.name) {
                Some(&i) => {
                    if default.is_some() {
                        params[i].default = default;
                    }
                }
                None => {
                    param_index.insert(param.name, params.len());
                    params.push(ResolvedParam {
                        name: param.name,
                        default,
                        pos: param.pos,
                    });
                }
            }
        }

        let NodeKind::Dict(entries) = *ast.kind(own_body) else {
            continue;
        };
        for entry in ast.dict(entries) {
            let resolved = BodyEntry {
                key: ast.key_name(entry.key),
                value: entry.value,
                pos: ast.pos(entry.key),
            };
            match body_index.get(&resolved.key) {
                Some(&i) => body[i] = BodyEntry {
                    pos: body[i].pos,
                    ..resolved
                },
                None => {
                    body_index.insert(resolved.key, body.len());
                    body.push(resolved);
                }
            }
        }
    }

    ResolvedClass {
        linearization,
        params,
        body,
    }
}
