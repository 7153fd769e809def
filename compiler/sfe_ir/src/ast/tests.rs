#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{FileId, NodeId};
use pretty_assertions::assert_eq;

fn pos(line: u32, column: u32) -> Position {
    Position::new(FileId::new(0), line, column)
}

#[test]
fn test_alloc_and_get() {
    let mut ast = Ast::default();
    let one = ast.alloc(NodeKind::Int(1), pos(1, 9));
    let two = ast.alloc(NodeKind::Real(2.5), pos(1, 13));
    let sum = ast.alloc(
        NodeKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: two,
        },
        pos(1, 9),
    );

    assert_eq!(ast.node_count(), 3);
    assert_eq!(*ast.kind(one), NodeKind::Int(1));
    assert_eq!(ast.pos(two), pos(1, 13));
    assert_eq!(ast.render(sum), "(+ 1 2.5)");
}

#[test]
fn test_side_tables() {
    let mut ast = Ast::default();
    let a = ast.intern("a");
    let b = ast.intern("b");
    let names = ast.alloc_names([a, b]);
    assert_eq!(ast.names(names), &[a, b]);

    let key = ast.alloc(NodeKind::Ident(a), pos(1, 2));
    let value = ast.alloc(NodeKind::Boolean(true), pos(1, 5));
    let dict = ast.alloc_dict([DictEntry { key, value }]);
    assert_eq!(dict.len(), 1);
    assert_eq!(ast.dict(dict)[0].value, value);
    assert_eq!(ast.key_name(key), a);

    let empty = ast.alloc_node_list([]);
    assert!(empty.is_empty());
    assert_eq!(ast.node_list(empty), &[] as &[NodeId]);
}

#[test]
fn test_render_declarations() {
    let mut ast = Ast::default();
    let c = ast.intern("C");
    let base = ast.intern("Base");
    let h = ast.intern("h");
    let v = ast.intern("v");
    let o = ast.intern("o");

    let two = ast.alloc(NodeKind::Int(2), pos(1, 13));
    let params = ast.alloc_params([
        ParamDecl {
            name: h,
            default: NodeId::INVALID,
            pos: pos(1, 9),
        },
        ParamDecl {
            name: v,
            default: two,
            pos: pos(1, 12),
        },
    ]);
    let bases = ast.alloc_names([base]);
    let key = ast.alloc(NodeKind::Ident(v), pos(2, 3));
    let value = ast.alloc(NodeKind::Ident(h), pos(2, 6));
    let entries = ast.alloc_dict([DictEntry { key, value }]);
    let body = ast.alloc(NodeKind::Dict(entries), pos(1, 30));
    let class = ast.alloc(
        NodeKind::Class {
            name: c,
            bases,
            params,
            body,
        },
        pos(1, 1),
    );
    ast.root_mut().classes.push(class);

    let one = ast.alloc(NodeKind::Int(1), pos(4, 17));
    let args = ast.alloc_args([NamedArg {
        name: h,
        value: one,
        pos: pos(4, 15),
    }]);
    let obj = ast.alloc(
        NodeKind::ObjInst {
            name: o,
            class: c,
            args,
        },
        pos(4, 1),
    );
    ast.root_mut().objects.push(obj);

    assert_eq!(
        ast.render_root(),
        "(class C (h v=2) (extends Base) {v: h})\n(object \"o\" C h=1)\n"
    );
}

#[test]
fn test_render_chain_and_unary() {
    let mut ast = Ast::default();
    let panel = ast.intern("panel");
    let size = ast.intern("size");
    let head = ast.alloc(NodeKind::Ident(panel), pos(1, 1));
    let zero = ast.alloc(NodeKind::Int(0), pos(1, 12));
    let args = ast.alloc_node_list([zero]);
    let call = ast.alloc(NodeKind::Call(args), pos(1, 15));
    let links = ast.alloc_links([
        ChainLink {
            kind: LinkKind::Dot(size),
            pos: pos(1, 6),
        },
        ChainLink {
            kind: LinkKind::Index(zero),
            pos: pos(1, 11),
        },
        ChainLink {
            kind: LinkKind::Call(call),
            pos: pos(1, 15),
        },
    ]);
    let chain = ast.alloc(NodeKind::Prefix { head, links }, pos(1, 1));
    assert_eq!(ast.render(chain), "panel.size[0](0)");

    let ops = ast.alloc_unary_ops([UnaryOp::Not, UnaryOp::Neg]);
    let unary = ast.alloc(NodeKind::Unary { ops, operand: zero }, pos(1, 1));
    assert_eq!(ast.render(unary), "(! (- 0))");
}

#[test]
fn test_reset_releases_unit() {
    let mut ast = Ast::new(ArenaConfig {
        initial_capacity: 64,
        maximum_segment_size: 128,
    });
    for i in 0..32 {
        ast.alloc(NodeKind::Int(i), pos(1, 1));
    }
    ast.sources_mut().add("a.sfe", "var a = 1;");
    ast.intern("a");
    assert!(ast.arena().segment_count() > 1);

    ast.reset();
    assert_eq!(ast.node_count(), 0);
    assert_eq!(ast.arena().size(), 0);
    assert_eq!(ast.arena().segment_count(), 1);
    assert_eq!(ast.arena().current_capacity(), 64);
    assert!(ast.sources().is_empty());
    assert_eq!(ast.interner().len(), 1);
    assert!(ast.root().is_empty());
}
