//! SFE IR - syntax-level data structures for SFE config files.
//!
//! This crate contains the data shared by every phase:
//! - Spans and line/column positions for diagnostics
//! - Interned identifier names
//! - The source map (one entry per parsed or included file)
//! - Token kinds produced by the lexer
//! - The segmented bump [`Arena`] that owns every syntax node
//! - The AST node model and the [`Ast`] compilation unit
//!
//! # Design Philosophy
//!
//! - **Intern names**: identifiers and strings become `Name(u32)`
//! - **Flatten the tree**: children are `NodeId(u32)` handles, lists are
//!   ranges into side tables, never `Box<Node>`
//! - **One arena per unit**: every node of a compilation unit lives in the
//!   same [`Arena`] and is released with it

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod interner;
mod name;
mod node_id;
mod source_map;
mod span;
mod token;

pub use arena::{Arena, ArenaConfig};
pub use ast::{
    Ast, BinaryOp, ChainLink, ChainRange, DictEntry, DictRange, LinkKind, NameRange, NamedArg,
    NamedArgRange, Node, NodeKind, NodeRange, ParamDecl, ParamRange, Root, UnaryOp, UnaryOpRange,
};
pub use interner::StringInterner;
pub use name::Name;
pub use node_id::NodeId;
pub use source_map::{FileId, SourceFile, SourceMap};
pub use span::{Position, Span};
pub use token::TokenKind;
