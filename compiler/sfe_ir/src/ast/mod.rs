//! Flat AST for SFE config.
//!
//! - No `Box<Node>`: children are `NodeId(u32)` handles into an [`Arena`]
//! - Lists (dict entries, chain links, parameters...) live in side tables
//!   and are addressed by compact ranges
//! - Everything belongs to one [`Ast`], released together
//!
//! # Module Structure
//!
//! - `node`: node variants and the list element types
//! - `operators`: binary and unary operators
//! - `ranges`: side-table range types
//! - `print`: S-expression rendering for dumps and tests

mod node;
mod operators;
mod print;
mod ranges;

pub use node::{ChainLink, DictEntry, LinkKind, NamedArg, Node, NodeKind, ParamDecl, Root};
pub use operators::{BinaryOp, UnaryOp};
pub use ranges::{
    ChainRange, DictRange, NameRange, NamedArgRange, NodeRange, ParamRange, UnaryOpRange,
    MAX_LIST_LEN,
};

use crate::{Arena, ArenaConfig, Name, NodeId, Position, SourceMap, StringInterner};

/// Convert a side-table length into a range length.
///
/// # Panics
/// Panics when the list exceeds [`MAX_LIST_LEN`]; the parser rejects such
/// lists before allocating them.
#[inline]
#[track_caller]
fn range_len(len: usize) -> u16 {
    match u16::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("list of {len} items exceeds {MAX_LIST_LEN}"),
    }
}

#[inline]
fn table_start(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// One compilation unit: the root file, every included file, and all nodes
/// parsed from them.
#[derive(Debug)]
pub struct Ast {
    nodes: Arena<Node>,
    node_lists: Vec<NodeId>,
    dict_entries: Vec<DictEntry>,
    links: Vec<ChainLink>,
    names: Vec<Name>,
    params: Vec<ParamDecl>,
    args: Vec<NamedArg>,
    unary_ops: Vec<UnaryOp>,
    interner: StringInterner,
    sources: SourceMap,
    root: Root,
}

impl Ast {
    pub fn new(config: ArenaConfig) -> Self {
        Ast {
            nodes: Arena::new(config),
            node_lists: Vec::new(),
            dict_entries: Vec::new(),
            links: Vec::new(),
            names: Vec::new(),
            params: Vec::new(),
            args: Vec::new(),
            unary_ops: Vec::new(),
            interner: StringInterner::new(),
            sources: SourceMap::new(),
            root: Root::default(),
        }
    }

    // ===== Nodes =====

    #[inline]
    pub fn alloc(&mut self, kind: NodeKind, pos: Position) -> NodeId {
        NodeId::new(self.nodes.alloc(Node::new(kind, pos)))
    }

    /// Get a node by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this unit.
    #[inline]
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.raw()) {
            Some(node) => node,
            None => panic!("{id:?} does not belong to this unit"),
        }
    }

    #[inline]
    #[track_caller]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[inline]
    #[track_caller]
    pub fn pos(&self, id: NodeId) -> Position {
        self.node(id).pos
    }

    /// The node arena, for allocation statistics.
    pub fn arena(&self) -> &Arena<Node> {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ===== Side tables =====

    pub fn alloc_node_list(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = self.node_lists.len();
        self.node_lists.extend(items);
        NodeRange::new(table_start(start), range_len(self.node_lists.len() - start))
    }

    pub fn node_list(&self, range: NodeRange) -> &[NodeId] {
        &self.node_lists[range.to_range()]
    }

    pub fn alloc_dict(&mut self, items: impl IntoIterator<Item = DictEntry>) -> DictRange {
        let start = self.dict_entries.len();
        self.dict_entries.extend(items);
        DictRange::new(table_start(start), range_len(self.dict_entries.len() - start))
    }

    pub fn dict(&self, range: DictRange) -> &[DictEntry] {
        &self.dict_entries[range.to_range()]
    }

    pub fn alloc_links(&mut self, items: impl IntoIterator<Item = ChainLink>) -> ChainRange {
        let start = self.links.len();
        self.links.extend(items);
        ChainRange::new(table_start(start), range_len(self.links.len() - start))
    }

    pub fn links(&self, range: ChainRange) -> &[ChainLink] {
        &self.links[range.to_range()]
    }

    pub fn alloc_names(&mut self, items: impl IntoIterator<Item = Name>) -> NameRange {
        let start = self.names.len();
        self.names.extend(items);
        NameRange::new(table_start(start), range_len(self.names.len() - start))
    }

    pub fn names(&self, range: NameRange) -> &[Name] {
        &self.names[range.to_range()]
    }

    pub fn alloc_params(&mut self, items: impl IntoIterator<Item = ParamDecl>) -> ParamRange {
        let start = self.params.len();
        self.params.extend(items);
        ParamRange::new(table_start(start), range_len(self.params.len() - start))
    }

    pub fn params(&self, range: ParamRange) -> &[ParamDecl] {
        &self.params[range.to_range()]
    }

    pub fn alloc_args(&mut self, items: impl IntoIterator<Item = NamedArg>) -> NamedArgRange {
        let start = self.args.len();
        self.args.extend(items);
        NamedArgRange::new(table_start(start), range_len(self.args.len() - start))
    }

    pub fn args(&self, range: NamedArgRange) -> &[NamedArg] {
        &self.args[range.to_range()]
    }

    pub fn alloc_unary_ops(&mut self, items: impl IntoIterator<Item = UnaryOp>) -> UnaryOpRange {
        let start = self.unary_ops.len();
        self.unary_ops.extend(items);
        UnaryOpRange::new(table_start(start), range_len(self.unary_ops.len() - start))
    }

    pub fn unary_ops(&self, range: UnaryOpRange) -> &[UnaryOp] {
        &self.unary_ops[range.to_range()]
    }

    // ===== Names =====

    #[inline]
    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn name_str(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    // ===== Unit =====

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceMap {
        &mut self.sources
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Root {
        &mut self.root
    }

    /// Key text of a dict entry (`Ident` or `String` node).
    pub fn key_name(&self, key: NodeId) -> Name {
        match *self.kind(key) {
            NodeKind::Ident(name) | NodeKind::String(name) => name,
            _ => Name::EMPTY,
        }
    }

    /// Release every node and start a fresh unit with the same arena sizing.
    ///
    /// Node ids from before the reset must not be used afterwards.
    pub fn reset(&mut self) {
        self.nodes.reset();
        self.node_lists.clear();
        self.dict_entries.clear();
        self.links.clear();
        self.names.clear();
        self.params.clear();
        self.args.clear();
        self.unary_ops.clear();
        self.interner = StringInterner::new();
        self.sources = SourceMap::new();
        self.root = Root::default();
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

#[cfg(test)]
mod tests;
