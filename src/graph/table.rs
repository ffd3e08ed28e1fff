//! Open-addressed node index.
//!
//! Nodes live in an arena and never move, so a [`NodeId`] stays valid while
//! the index grows. The index maps a position to its arena slot with FNV-1a
//! hashing and linear probing.

use super::node::Node;
use crate::types::NodePos;

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

const EMPTY: u32 = u32::MAX;
const MIN_CAPACITY: usize = 64;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

fn hash(pos: NodePos) -> u32 {
    pos.x
        .to_le_bytes()
        .into_iter()
        .chain(pos.y.to_le_bytes())
        .fold(FNV_OFFSET, |h, byte| {
            (h ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

#[derive(Debug, Clone)]
pub(crate) struct NodeTable {
    nodes: Vec<Node>,
    slots: Vec<u32>,
}

impl Default for NodeTable {
    fn default() -> Self {
        NodeTable::with_capacity(0)
    }
}

impl NodeTable {
    /// Table sized for about `nodes` nodes without growing.
    pub fn with_capacity(nodes: usize) -> NodeTable {
        let slots = (nodes * 2).next_power_of_two().max(MIN_CAPACITY);
        NodeTable {
            nodes: Vec::with_capacity(nodes),
            slots: vec![EMPTY; slots],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Slot holding `pos`, or the empty slot where it would go.
    fn probe(&self, pos: NodePos) -> usize {
        let mask = self.slots.len() - 1;
        let mut i = hash(pos) as usize & mask;
        loop {
            match self.slots[i] {
                EMPTY => return i,
                id if self.nodes[id as usize].pos == pos => return i,
                _ => i = (i + 1) & mask,
            }
        }
    }

    pub fn find(&self, pos: NodePos) -> Option<NodeId> {
        match self.slots[self.probe(pos)] {
            EMPTY => None,
            id => Some(NodeId(id)),
        }
    }

    pub fn get_or_insert(&mut self, pos: NodePos) -> NodeId {
        if let Some(id) = self.find(pos) {
            return id;
        }
        if (self.nodes.len() + 1) * 2 > self.slots.len() {
            self.grow();
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(Node::new(pos));
        let slot = self.probe(pos);
        self.slots[slot] = id;
        NodeId(id)
    }

    fn grow(&mut self) {
        self.slots = vec![EMPTY; self.slots.len() * 2];
        for id in 0..self.nodes.len() {
            let slot = self.probe(self.nodes[id].pos);
            self.slots[slot] = id as u32;
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
