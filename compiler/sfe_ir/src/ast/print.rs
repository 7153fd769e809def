//! S-expression rendering of the AST.
//!
//! Operators render prefix-style (`(+ 1 (* 2 3))`), postfix chains render
//! as source (`a.b[0](x)`), declarations as `(var ...)`, `(class ...)`,
//! `(object ...)`.

use std::fmt::Write;

use super::{Ast, LinkKind, NodeKind};
use crate::NodeId;

impl Ast {
    /// Render one node.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    /// Render every root declaration, one per line: vars, classes, objects.
    pub fn render_root(&self) -> String {
        let root = self.root();
        let mut out = String::new();
        for &id in root.vars.iter().chain(&root.classes).chain(&root.objects) {
            self.render_into(id, &mut out);
            out.push('\n');
        }
        out
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        match *self.kind(id) {
            NodeKind::Int(v) => {
                let _ = write!(out, "{v}");
            }
            NodeKind::Real(v) => {
                let _ = write!(out, "{v:?}");
            }
            NodeKind::Boolean(v) => {
                let _ = write!(out, "{v}");
            }
            NodeKind::String(name) => {
                let _ = write!(out, "{:?}", self.name_str(name));
            }
            NodeKind::Dict(range) => {
                out.push('{');
                for (i, entry) in self.dict(range).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render_into(entry.key, out);
                    out.push_str(": ");
                    self.render_into(entry.value, out);
                }
                out.push('}');
            }
            NodeKind::Ident(name) => out.push_str(self.name_str(name)),
            NodeKind::Global(name) => {
                out.push('$');
                out.push_str(self.name_str(name));
            }
            NodeKind::Call(range) => {
                out.push('(');
                for (i, &arg) in self.node_list(range).iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render_into(arg, out);
                }
                out.push(')');
            }
            NodeKind::Prefix { head, links } => {
                self.render_into(head, out);
                for link in self.links(links) {
                    match link.kind {
                        LinkKind::Dot(name) => {
                            out.push('.');
                            out.push_str(self.name_str(name));
                        }
                        LinkKind::Index(index) => {
                            out.push('[');
                            self.render_into(index, out);
                            out.push(']');
                        }
                        LinkKind::Call(call) => self.render_into(call, out),
                    }
                }
            }
            NodeKind::Unary { ops, operand } => {
                let ops = self.unary_ops(ops);
                for op in ops {
                    let _ = write!(out, "({op} ");
                }
                self.render_into(operand, out);
                for _ in ops {
                    out.push(')');
                }
            }
            NodeKind::Binary { op, left, right } => {
                let _ = write!(out, "({op} ");
                self.render_into(left, out);
                out.push(' ');
                self.render_into(right, out);
                out.push(')');
            }
            NodeKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                out.push_str("(? ");
                self.render_into(cond, out);
                out.push(' ');
                self.render_into(then_branch, out);
                out.push(' ');
                self.render_into(else_branch, out);
                out.push(')');
            }
            NodeKind::Var { name, value } => {
                let _ = write!(out, "(var {} ", self.name_str(name));
                self.render_into(value, out);
                out.push(')');
            }
            NodeKind::Class {
                name,
                bases,
                params,
                body,
            } => {
                let _ = write!(out, "(class {} (", self.name_str(name));
                for (i, param) in self.params(params).iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(self.name_str(param.name));
                    if let Some(default) = param.default.to_option() {
                        out.push('=');
                        self.render_into(default, out);
                    }
                }
                out.push(')');
                let bases = self.names(bases);
                if !bases.is_empty() {
                    out.push_str(" (extends");
                    for &base in bases {
                        out.push(' ');
                        out.push_str(self.name_str(base));
                    }
                    out.push(')');
                }
                out.push(' ');
                self.render_into(body, out);
                out.push(')');
            }
            NodeKind::ObjInst { name, class, args } => {
                let _ = write!(
                    out,
                    "(object {:?} {}",
                    self.name_str(name),
                    self.name_str(class)
                );
                for arg in self.args(args) {
                    let _ = write!(out, " {}=", self.name_str(arg.name));
                    self.render_into(arg.value, out);
                }
                out.push(')');
            }
            NodeKind::ObjInl { name, value } => {
                let _ = write!(out, "(object {:?} ", self.name_str(name));
                self.render_into(value, out);
                out.push(')');
            }
        }
    }
}
