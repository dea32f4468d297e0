//! Dirty tracking for incremental resizing.
//!
//! One node per expression of the tree, each knowing its parent. A parent
//! reads its children's registry entries and declared widths, so a change
//! below a node dirties every ancestor up to the root. Descendants of a
//! dirty node are not dirtied here; the engine recomputes them only when
//! the container handed down to them changes.
//!
//! # Inputs
//!
//! A node is dirtied either unconditionally ([`DepGraph::mark_dirty`]) or
//! when one of its input hashes changes ([`DepGraph::mark_changed`]):
//!
//! | [`InputKind`] | What it covers |
//! |---------------|----------------|
//! | `Declared` | widths stored in the expression model |
//! | `Children` | registry entries of direct nested children |
//! | `Columns` | live widths of the node's own columns |
//!
//! Marks are queued and only reach the ancestors on
//! [`DepGraph::propagate`], which the engine calls once per pass.

use std::fmt;

/// Handle of one expression node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }

    fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Which input of a node changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Declared,
    Children,
    Columns,
}

impl InputKind {
    const COUNT: usize = 3;

    fn slot(self) -> usize {
        match self {
            Self::Declared => 0,
            Self::Children => 1,
            Self::Columns => 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    parent: Option<NodeId>,
    input_hashes: [u64; InputKind::COUNT],
    dirty: bool,
}

/// Dirty tracking over expression nodes.
///
/// ```
/// use bee_layout::dep_graph::{DepGraph, InputKind};
///
/// let mut graph = DepGraph::new();
/// let context = graph.add_node();
/// let literal = graph.add_node();
/// graph.set_parent(literal, context);
///
/// graph.mark_changed(literal, InputKind::Declared, 150);
/// assert_eq!(graph.propagate(), 2);
/// assert!(graph.is_dirty(context));
/// ```
#[derive(Clone, Default)]
pub struct DepGraph {
    slots: Vec<Slot>,
    pending: Vec<NodeId>,
}

impl DepGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(nodes),
            pending: Vec::new(),
        }
    }

    /// Add a node. New nodes start clean.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot::default());
        id
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.len()
    }

    /// Attach `child` under `parent`. Unknown nodes are ignored.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if parent.slot() >= self.slots.len() {
            return;
        }
        if let Some(slot) = self.slots.get_mut(child.slot()) {
            slot.parent = Some(parent);
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.slot())?.parent
    }

    /// Dirty `id` if `new_hash` differs from the stored hash for `kind`.
    pub fn mark_changed(&mut self, id: NodeId, kind: InputKind, new_hash: u64) {
        let Some(slot) = self.slots.get_mut(id.slot()) else {
            return;
        };
        let stored = &mut slot.input_hashes[kind.slot()];
        if *stored != new_hash {
            *stored = new_hash;
            slot.dirty = true;
            self.pending.push(id);
        }
    }

    /// Dirty `id` unconditionally.
    pub fn mark_dirty(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.slot()) {
            slot.dirty = true;
            self.pending.push(id);
        }
    }

    /// Dirty the ancestors of every pending node.
    ///
    /// Returns the number of dirty nodes afterwards. A climb stops at the
    /// first ancestor that is already dirty.
    pub fn propagate(&mut self) -> usize {
        for node in std::mem::take(&mut self.pending) {
            let mut parent = self.parent(node);
            while let Some(p) = parent {
                let slot = &mut self.slots[p.slot()];
                if std::mem::replace(&mut slot.dirty, true) {
                    break;
                }
                parent = slot.parent;
            }
        }
        self.dirty_count()
    }

    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.slots.get(id.slot()).is_some_and(|s| s.dirty)
    }

    /// Mark one node clean after recomputing it.
    pub fn clean(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.slot()) {
            slot.dirty = false;
        }
    }

    /// Clean every node and drop pending marks.
    pub fn clean_all(&mut self) {
        self.slots.iter_mut().for_each(|s| s.dirty = false);
        self.pending.clear();
    }

    /// Dirty every node.
    pub fn invalidate_all(&mut self) {
        self.slots.iter_mut().for_each(|s| s.dirty = true);
        self.pending.clear();
    }

    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.slots.iter().filter(|s| s.dirty).count()
    }
}

impl fmt::Debug for DepGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepGraph")
            .field("nodes", &self.slots.len())
            .field("pending", &self.pending.len())
            .field("dirty", &self.dirty_count())
            .finish()
    }
}
