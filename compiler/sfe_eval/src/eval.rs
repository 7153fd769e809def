//! Lazy, memoized evaluation of a parsed unit.
//!
//! Every `var`, class body key, parameter default and argument becomes a
//! [`Slot`]: an expression paired with the context it is evaluated in.
//! Slots are evaluated on first use and cached, so forward references
//! work and a reference back into a slot that is still being evaluated is
//! reported as a cycle instead of recursing forever.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use sfe_ir::{Ast, BinaryOp, ChainLink, LinkKind, Name, NamedArgRange, NodeId, NodeKind, Position};
use sfe_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::classes::ClassTable;
use crate::config::Config;
use crate::environment::{Environment, ScopeId};
use crate::errors::{self, BindResult};
use crate::object::Object;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::Value;

/// Where an expression looks up bare identifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Ctx {
    /// Root `var`s, then the host scope, then objects.
    Root,
    /// The object's parameters and body first, then as [`Ctx::Root`].
    Object(usize),
}

/// Result of evaluating an expression.
///
/// Dicts and objects only exist while evaluating; they are never stored.
#[derive(Clone, Debug)]
enum Evaluated {
    Value(Value),
    /// A dict literal and the context its entries are evaluated in.
    Dict(NodeId, Ctx),
    /// A declared object, by frame index.
    Object(usize),
}

impl Evaluated {
    fn type_name(&self) -> &'static str {
        match self {
            Evaluated::Value(value) => value.type_name(),
            Evaluated::Dict(..) => "dict",
            Evaluated::Object(_) => "object",
        }
    }
}

#[derive(Debug)]
enum SlotState {
    Pending,
    Active,
    Done(Evaluated),
}

#[derive(Debug)]
struct Slot {
    expr: NodeId,
    ctx: Ctx,
    /// Reported when the slot depends on itself.
    name: Name,
    pos: Position,
    state: SlotState,
}

#[derive(Debug)]
enum Body {
    Ready,
    /// An inline object whose expression has not been evaluated yet.
    Inline(usize),
    Resolving,
}

/// One declared object.
#[derive(Debug)]
struct Frame {
    name: Name,
    pos: Position,
    /// Every parameter of the class; `None` when neither an argument nor
    /// a default binds it.
    params: FxHashMap<Name, Option<usize>>,
    /// Body keys in order, each with its slot.
    keys: Vec<(Name, usize)>,
    index: FxHashMap<Name, usize>,
    body: Body,
}

impl Frame {
    fn new(name: Name, pos: Position) -> Self {
        Frame {
            name,
            pos,
            params: FxHashMap::default(),
            keys: Vec::new(),
            index: FxHashMap::default(),
            body: Body::Ready,
        }
    }

    fn push_key(&mut self, key: Name, slot: usize) {
        // A repeated key keeps its first position and takes the new value.
        if self.index.insert(key, slot).is_some() {
            if let Some(entry) = self.keys.iter_mut().find(|(k, _)| *k == key) {
                entry.1 = slot;
            }
        } else {
            self.keys.push((key, slot));
        }
    }
}

pub(crate) struct Evaluator<'a> {
    ast: &'a Ast,
    env: &'a Environment,
    scope: ScopeId,
    slots: Vec<Slot>,
    vars: FxHashMap<Name, usize>,
    /// Root `var`s in declaration order.
    var_order: Vec<Name>,
    frames: Vec<Frame>,
    objects: FxHashMap<Name, usize>,
    /// Dict entries currently being evaluated, keyed by value node.
    active_entries: FxHashSet<(NodeId, Ctx)>,
}

impl<'a> Evaluator<'a> {
    /// Check declarations and build a slot for every expression.
    pub fn new(
        ast: &'a Ast,
        env: &'a Environment,
        scope: ScopeId,
        classes: &ClassTable,
    ) -> BindResult<Self> {
        let mut evaluator = Evaluator {
            ast,
            env,
            scope,
            slots: Vec::new(),
            vars: FxHashMap::default(),
            var_order: Vec::new(),
            frames: Vec::new(),
            objects: FxHashMap::default(),
            active_entries: FxHashSet::default(),
        };
        evaluator.declare_vars()?;
        evaluator.declare_objects(classes)?;
        Ok(evaluator)
    }

    fn declare_vars(&mut self) -> BindResult<()> {
        let ast = self.ast;
        let mut first: FxHashMap<Name, Position> = FxHashMap::default();
        for &node in &ast.root().vars {
            let NodeKind::Var { name, value } = *ast.kind(node) else {
                continue;
            };
            let pos = ast.pos(node);
            if let Some(&at) = first.get(&name) {
                return Err(errors::duplicate_var(ast.name_str(name), pos, at));
            }
            first.insert(name, pos);
            let slot = self.slot(value, Ctx::Root, name, pos);
            self.vars.insert(name, slot);
            self.var_order.push(name);
        }
        Ok(())
    }

    fn declare_objects(&mut self, classes: &ClassTable) -> BindResult<()> {
        let ast = self.ast;
        for &node in &ast.root().objects {
            let (name, pos) = match *ast.kind(node) {
                NodeKind::ObjInst { name, .. } | NodeKind::ObjInl { name, .. } => {
                    (name, ast.pos(node))
                }
                _ => continue,
            };
            if let Some(&k) = self.objects.get(&name) {
                return Err(errors::duplicate_object(
                    ast.name_str(name),
                    pos,
                    self.frames[k].pos,
                ));
            }
            self.objects.insert(name, self.frames.len());
            self.frames.push(Frame::new(name, pos));
        }

        for (k, &node) in ast.root().objects.iter().enumerate() {
            match *ast.kind(node) {
                NodeKind::ObjInst { class, args, .. } => self.instantiate(k, class, args, classes)?,
                NodeKind::ObjInl { name, value } => {
                    if let NodeKind::Dict(_) = ast.kind(value) {
                        self.bind_dict(k, value, Ctx::Object(k));
                    } else {
                        let slot = self.slot(value, Ctx::Root, name, ast.pos(node));
                        self.frames[k].body = Body::Inline(slot);
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Match named arguments against the class's parameter union and
    /// give every argument, default and merged body key a slot in the
    /// object's context.
    ///
    /// An argument reads as if written where the parameter is used: its
    /// names see the object's parameters and body before root `var`s.
    fn instantiate(
        &mut self,
        k: usize,
        class: Name,
        args: NamedArgRange,
        classes: &ClassTable,
    ) -> BindResult<()> {
        let ast = self.ast;
        let resolved = classes
            .get(class)
            .ok_or_else(|| errors::unknown_class(ast.name_str(class), self.frames[k].pos))?;

        let mut given: FxHashMap<Name, Position> = FxHashMap::default();
        for arg in ast.args(args) {
            if let Some(&first) = given.get(&arg.name) {
                return Err(errors::duplicate_argument(
                    ast.name_str(arg.name),
                    arg.pos,
                    first,
                ));
            }
            if resolved.param(arg.name).is_none() {
                return Err(errors::unknown_argument(
                    ast.name_str(arg.name),
                    ast.name_str(class),
                    arg.pos,
                ));
            }
            given.insert(arg.name, arg.pos);
            let slot = self.slot(arg.value, Ctx::Object(k), arg.name, arg.pos);
            self.frames[k].params.insert(arg.name, Some(slot));
        }

        for param in &resolved.params {
            if given.contains_key(&param.name) {
                continue;
            }
            let slot = param
                .default
                .map(|default| self.slot(default, Ctx::Object(k), param.name, param.pos));
            self.frames[k].params.insert(param.name, slot);
        }

        for entry in &resolved.body {
            let slot = self.slot(entry.value, Ctx::Object(k), entry.key, entry.pos);
            self.frames[k].push_key(entry.key, slot);
        }
        Ok(())
    }

    /// Give the entries of a dict literal slots in `ctx` as object `k`'s body.
    fn bind_dict(&mut self, k: usize, dict: NodeId, ctx: Ctx) {
        let ast = self.ast;
        let NodeKind::Dict(entries) = *ast.kind(dict) else {
            return;
        };
        for entry in ast.dict(entries) {
            let key = ast.key_name(entry.key);
            let slot = self.slot(entry.value, ctx, key, ast.pos(entry.key));
            self.frames[k].push_key(key, slot);
        }
    }

    fn slot(&mut self, expr: NodeId, ctx: Ctx, name: Name, pos: Position) -> usize {
        self.slots.push(Slot {
            expr,
            ctx,
            name,
            pos,
            state: SlotState::Pending,
        });
        self.slots.len() - 1
    }

    /// Evaluate every `var` and object into the bound result.
    pub fn finish(mut self) -> BindResult<Config> {
        let ast = self.ast;
        let mut vars = BTreeMap::new();
        for name in std::mem::take(&mut self.var_order) {
            let slot = self.vars[&name];
            let pos = self.slots[slot].pos;
            let value = match self.eval_slot(slot, pos)? {
                Evaluated::Value(value) => value,
                Evaluated::Dict(..) => {
                    return Err(errors::dict_not_allowed(
                        &format!("variable `{}`", ast.name_str(name)),
                        pos,
                    ))
                }
                Evaluated::Object(_) => {
                    return Err(errors::expected_type("a scalar", "object", pos));
                }
            };
            vars.insert(ast.name_str(name).to_owned(), value);
        }

        let mut objects = BTreeMap::new();
        for k in 0..self.frames.len() {
            let object = self.materialize(k)?;
            let name = ast.name_str(self.frames[k].name);
            trace!(object = name, keys = object.len(), "evaluated object");
            objects.insert(name.to_owned(), Arc::new(object));
        }
        Ok(Config::new(vars, objects))
    }

    fn materialize(&mut self, k: usize) -> BindResult<Object> {
        let ast = self.ast;
        self.ensure_body(k, self.frames[k].pos)?;
        let mut object = Object::new();
        for (key, slot) in self.frames[k].keys.clone() {
            let pos = self.slots[slot].pos;
            match self.eval_slot(slot, pos)? {
                Evaluated::Value(value) => object.insert(ast.name_str(key), value),
                Evaluated::Dict(..) => {
                    return Err(errors::dict_not_allowed(
                        &format!(
                            "field `{}` of object \"{}\"",
                            ast.name_str(key),
                            ast.name_str(self.frames[k].name)
                        ),
                        pos,
                    ))
                }
                Evaluated::Object(_) => {
                    return Err(errors::expected_type("a scalar", "object", pos));
                }
            }
        }
        Ok(object)
    }

    /// Resolve an inline object's expression into its body.
    fn ensure_body(&mut self, k: usize, pos: Position) -> BindResult<()> {
        let slot = match self.frames[k].body {
            Body::Ready => return Ok(()),
            Body::Resolving => {
                return Err(errors::evaluation_cycle(
                    self.ast.name_str(self.frames[k].name),
                    pos,
                ))
            }
            Body::Inline(slot) => slot,
        };
        self.frames[k].body = Body::Resolving;
        let slot_pos = self.slots[slot].pos;
        match self.eval_slot(slot, slot_pos)? {
            Evaluated::Dict(dict, ctx) => self.bind_dict(k, dict, ctx),
            Evaluated::Object(j) => {
                self.ensure_body(j, slot_pos)?;
                let keys = self.frames[j].keys.clone();
                for (key, slot) in keys {
                    self.frames[k].push_key(key, slot);
                }
            }
            Evaluated::Value(value) => {
                return Err(errors::expected_type(
                    "a dict for an inline object",
                    value.type_name(),
                    slot_pos,
                ));
            }
        }
        self.frames[k].body = Body::Ready;
        Ok(())
    }

    fn eval_slot(&mut self, slot: usize, pos: Position) -> BindResult<Evaluated> {
        let (expr, ctx) = match &self.slots[slot].state {
            SlotState::Done(value) => return Ok(value.clone()),
            SlotState::Active => {
                return Err(errors::evaluation_cycle(
                    self.ast.name_str(self.slots[slot].name),
                    pos,
                ))
            }
            SlotState::Pending => (self.slots[slot].expr, self.slots[slot].ctx),
        };
        self.slots[slot].state = SlotState::Active;
        let value = self.eval(expr, ctx)?;
        self.slots[slot].state = SlotState::Done(value.clone());
        Ok(value)
    }

    fn eval(&mut self, expr: NodeId, ctx: Ctx) -> BindResult<Evaluated> {
        ensure_sufficient_stack(|| self.eval_inner(expr, ctx))
    }

    fn eval_inner(&mut self, expr: NodeId, ctx: Ctx) -> BindResult<Evaluated> {
        let ast = self.ast;
        let pos = ast.pos(expr);
        let value = match *ast.kind(expr) {
            NodeKind::Int(v) => Value::Int64(v),
            NodeKind::Real(v) => Value::Double(v),
            NodeKind::Boolean(v) => Value::Bool(v),
            NodeKind::String(s) => Value::String(ast.name_str(s).to_owned()),
            NodeKind::Dict(_) => return Ok(Evaluated::Dict(expr, ctx)),
            NodeKind::Ident(name) => return self.lookup(name, ctx, pos),
            NodeKind::Global(name) => return self.lookup_root(name, pos),
            NodeKind::Prefix { head, links } => return self.eval_chain(head, ast.links(links), ctx),
            NodeKind::Unary { ops, operand } => {
                let mut value = self.eval_scalar(operand, ctx)?;
                for &op in ast.unary_ops(ops).iter().rev() {
                    value = evaluate_unary(op, value, pos)?;
                }
                value
            }
            NodeKind::Binary { op, left, right } => self.eval_binary(op, left, right, ctx, pos)?,
            NodeKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                let branch = if self.eval_bool(cond, ctx)? {
                    then_branch
                } else {
                    else_branch
                };
                return self.eval(branch, ctx);
            }
            ref other => return Err(errors::expected_type("an expression", other.label(), pos)),
        };
        Ok(Evaluated::Value(value))
    }

    fn eval_scalar(&mut self, expr: NodeId, ctx: Ctx) -> BindResult<Value> {
        match self.eval(expr, ctx)? {
            Evaluated::Value(value) => Ok(value),
            other => Err(errors::expected_type(
                "a scalar",
                other.type_name(),
                self.ast.pos(expr),
            )),
        }
    }

    fn eval_bool(&mut self, expr: NodeId, ctx: Ctx) -> BindResult<bool> {
        match self.eval_scalar(expr, ctx)? {
            Value::Bool(b) => Ok(b),
            other => Err(errors::expected_type(
                "bool",
                other.type_name(),
                self.ast.pos(expr),
            )),
        }
    }

    fn eval_binary(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        ctx: Ctx,
        pos: Position,
    ) -> BindResult<Value> {
        match op {
            BinaryOp::And => Ok(Value::Bool(
                self.eval_bool(left, ctx)? && self.eval_bool(right, ctx)?,
            )),
            BinaryOp::Or => Ok(Value::Bool(
                self.eval_bool(left, ctx)? || self.eval_bool(right, ctx)?,
            )),
            _ => {
                let left = self.eval_scalar(left, ctx)?;
                let right = self.eval_scalar(right, ctx)?;
                evaluate_binary(op, &left, &right, pos)
            }
        }
    }

    /// Resolve a bare identifier.
    fn lookup(&mut self, name: Name, ctx: Ctx, pos: Position) -> BindResult<Evaluated> {
        if let Ctx::Object(k) = ctx {
            if let Some(&param) = self.frames[k].params.get(&name) {
                let Some(slot) = param else {
                    return Err(errors::missing_argument(
                        self.ast.name_str(name),
                        self.ast.name_str(self.frames[k].name),
                        pos,
                    ));
                };
                return self.eval_slot(slot, pos);
            }
            self.ensure_body(k, pos)?;
            if let Some(&slot) = self.frames[k].index.get(&name) {
                return self.eval_slot(slot, pos);
            }
        }
        self.lookup_root(name, pos)
    }

    /// Resolve a name against root `var`s, the host scope and objects.
    fn lookup_root(&mut self, name: Name, pos: Position) -> BindResult<Evaluated> {
        if let Some(&slot) = self.vars.get(&name) {
            return self.eval_slot(slot, pos);
        }
        let text = self.ast.name_str(name);
        if let Some(value) = self.env.lookup_var(self.scope, text) {
            return Ok(Evaluated::Value(value.clone()));
        }
        if let Some(&k) = self.objects.get(&name) {
            return Ok(Evaluated::Object(k));
        }
        Err(errors::unresolved(text, pos))
    }

    fn eval_chain(&mut self, head: NodeId, links: &[ChainLink], ctx: Ctx) -> BindResult<Evaluated> {
        let ast = self.ast;
        let (mut current, rest) = match (ast.kind(head), links.split_first()) {
            (
                &(NodeKind::Ident(function) | NodeKind::Global(function)),
                Some((
                    &ChainLink {
                        kind: LinkKind::Call(args),
                        pos,
                    },
                    rest,
                )),
            ) => (
                Evaluated::Value(self.call_host(function, args, ctx, pos)?),
                rest,
            ),
            _ => (self.eval(head, ctx)?, links),
        };

        for link in rest {
            current = match link.kind {
                LinkKind::Dot(key) => self.member(current, key, link.pos)?,
                LinkKind::Index(index) => match self.eval_scalar(index, ctx)? {
                    Value::String(key) => match ast.interner().get(&key) {
                        Some(key) => self.member(current, key, link.pos)?,
                        None => return Err(errors::missing_key(&key, link.pos)),
                    },
                    Value::Int64(i) => self.element(current, usize::try_from(i).ok(), &i.to_string(), link.pos)?,
                    Value::UInt64(i) => self.element(current, usize::try_from(i).ok(), &i.to_string(), link.pos)?,
                    other => {
                        return Err(errors::expected_type(
                            "a string or integer index",
                            other.type_name(),
                            ast.pos(index),
                        ))
                    }
                },
                LinkKind::Call(_) => {
                    return Err(errors::not_callable(
                        &format!("{} value", current.type_name()),
                        link.pos,
                    ))
                }
            };
        }
        Ok(current)
    }

    fn call_host(&mut self, function: Name, args: NodeId, ctx: Ctx, pos: Position) -> BindResult<Value> {
        let ast = self.ast;
        let name = ast.name_str(function);
        let Some(host) = self.env.lookup_function(self.scope, name) else {
            return Err(errors::not_callable(&format!("`{name}`"), pos));
        };
        let NodeKind::Call(arg_nodes) = *ast.kind(args) else {
            return Err(errors::not_callable(&format!("`{name}`"), pos));
        };
        let mut values = Vec::with_capacity(arg_nodes.len());
        for &arg in ast.node_list(arg_nodes) {
            values.push(self.eval_scalar(arg, ctx)?);
        }
        trace!(function = name, args = values.len(), "host call");
        host(&values).map_err(|reason| errors::host_function_failed(name, &reason, pos))
    }

    /// `.key` or `["key"]`.
    fn member(&mut self, target: Evaluated, key: Name, pos: Position) -> BindResult<Evaluated> {
        let ast = self.ast;
        match target {
            Evaluated::Dict(dict, ctx) => {
                let NodeKind::Dict(entries) = *ast.kind(dict) else {
                    return Err(errors::missing_key(ast.name_str(key), pos));
                };
                let value = ast
                    .dict(entries)
                    .iter()
                    .rev()
                    .find(|entry| ast.key_name(entry.key) == key)
                    .map(|entry| entry.value);
                match value {
                    Some(value) => self.eval_entry(value, ctx, key, pos),
                    None => Err(errors::missing_key(ast.name_str(key), pos)),
                }
            }
            Evaluated::Object(k) => {
                self.ensure_body(k, pos)?;
                match self.frames[k].index.get(&key) {
                    Some(&slot) => self.eval_slot(slot, pos),
                    None => Err(errors::missing_key(ast.name_str(key), pos)),
                }
            }
            Evaluated::Value(value) => Err(errors::expected_type(
                "a dict or object",
                value.type_name(),
                pos,
            )),
        }
    }

    /// `[n]`: the n-th entry in declaration order.
    fn element(
        &mut self,
        target: Evaluated,
        index: Option<usize>,
        shown: &str,
        pos: Position,
    ) -> BindResult<Evaluated> {
        let ast = self.ast;
        let missing = || errors::missing_key(shown, pos);
        match target {
            Evaluated::Dict(dict, ctx) => {
                let NodeKind::Dict(entries) = *ast.kind(dict) else {
                    return Err(missing());
                };
                let entry = index
                    .and_then(|i| ast.dict(entries).get(i))
                    .ok_or_else(missing)?;
                self.eval_entry(entry.value, ctx, ast.key_name(entry.key), pos)
            }
            Evaluated::Object(k) => {
                self.ensure_body(k, pos)?;
                let &(_, slot) = index
                    .and_then(|i| self.frames[k].keys.get(i))
                    .ok_or_else(missing)?;
                self.eval_slot(slot, pos)
            }
            Evaluated::Value(value) => Err(errors::expected_type(
                "a dict or object",
                value.type_name(),
                pos,
            )),
        }
    }

    /// Dict entries are not memoized; guard against an entry reaching itself.
    fn eval_entry(&mut self, value: NodeId, ctx: Ctx, key: Name, pos: Position) -> BindResult<Evaluated> {
        if !self.active_entries.insert((value, ctx)) {
            return Err(errors::evaluation_cycle(self.ast.name_str(key), pos));
        }
        let result = self.eval(value, ctx)?;
        self.active_entries.remove(&(value, ctx));
        Ok(result)
    }
}
