//! Syntax node variants.

use crate::{Name, NodeId, Position};

use super::operators::BinaryOp;
use super::ranges::{ChainRange, DictRange, NameRange, NamedArgRange, NodeRange, ParamRange, UnaryOpRange};

/// One syntax node: a kind plus the position of its first token.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Position,
}

impl Node {
    #[inline]
    pub const fn new(kind: NodeKind, pos: Position) -> Self {
        Node { kind, pos }
    }
}

/// Node variants.
///
/// Children are [`NodeId`]s into the same arena; lists are ranges into the
/// side tables of the owning [`Ast`](crate::Ast).
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum NodeKind {
    // Literals
    Int(i64),
    Real(f64),
    Boolean(bool),
    /// Decoded string literal.
    String(Name),
    /// `{ key: value, ... }`, entries in source order.
    Dict(DictRange),

    // References
    /// Identifier resolved through the object, root and host scopes.
    Ident(Name),
    /// `$name`: skips the enclosing object's bindings.
    Global(Name),

    /// Argument list of a call link: `(a, b)`.
    Call(NodeRange),
    /// A primary followed by `.key`, `[index]` and `(args)` links.
    Prefix { head: NodeId, links: ChainRange },

    // Operators
    /// Prefix operators, outermost first.
    Unary { ops: UnaryOpRange, operand: NodeId },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Ternary {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },

    // Declarations
    /// `var name = value;`
    Var { name: Name, value: NodeId },
    /// `class name(params) extends bases { body }`; `body` is a `Dict` node.
    Class {
        name: Name,
        bases: NameRange,
        params: ParamRange,
        body: NodeId,
    },
    /// `object "name" class(args);`
    ObjInst {
        name: Name,
        class: Name,
        args: NamedArgRange,
    },
    /// `object "name" expr;`
    ObjInl { name: Name, value: NodeId },
}

impl NodeKind {
    /// Short label used by AST dumps.
    pub const fn label(&self) -> &'static str {
        match self {
            NodeKind::Int(_) => "Int",
            NodeKind::Real(_) => "Real",
            NodeKind::Boolean(_) => "Boolean",
            NodeKind::String(_) => "String",
            NodeKind::Dict(_) => "Dict",
            NodeKind::Ident(_) => "Ident",
            NodeKind::Global(_) => "Global",
            NodeKind::Call(_) => "Call",
            NodeKind::Prefix { .. } => "Prefix",
            NodeKind::Unary { .. } => "Unary",
            NodeKind::Binary { .. } => "Binary",
            NodeKind::Ternary { .. } => "Ternary",
            NodeKind::Var { .. } => "Var",
            NodeKind::Class { .. } => "Class",
            NodeKind::ObjInst { .. } => "ObjInst",
            NodeKind::ObjInl { .. } => "ObjInl",
        }
    }
}

/// Dict entry; `key` is an `Ident` or `String` node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DictEntry {
    pub key: NodeId,
    pub value: NodeId,
}

/// One component of a postfix chain.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ChainLink {
    pub kind: LinkKind,
    pub pos: Position,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LinkKind {
    /// `.key`
    Dot(Name),
    /// `[expr]`
    Index(NodeId),
    /// `(args)`; points at a `Call` node.
    Call(NodeId),
}

/// Declared class parameter, with an optional default.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParamDecl {
    pub name: Name,
    /// [`NodeId::INVALID`] when there is no default.
    pub default: NodeId,
    pub pos: Position,
}

/// `name = value` inside an object instantiation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamedArg {
    pub name: Name,
    pub value: NodeId,
    pub pos: Position,
}

/// Top-level declarations of a unit, included files merged in source order.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Root {
    /// `Var` nodes.
    pub vars: Vec<NodeId>,
    /// `Class` nodes.
    pub classes: Vec<NodeId>,
    /// `ObjInst` and `ObjInl` nodes.
    pub objects: Vec<NodeId>,
}

impl Root {
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.classes.is_empty() && self.objects.is_empty()
    }
}
