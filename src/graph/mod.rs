//! The planar graph built from a diagram.
//!
//! Nodes sit on a grid with twice the text resolution and are created on
//! first reference. Edges are unit steps in one of eight directions and
//! always exist in matched pairs: an edge from `A` towards `d` implies the
//! edge from `A + d` towards `d.opposite()`, with the same style.
//!
//! Construction draws with a cursor, the way a pen plotter would:
//! [`Graph::move_to`] picks the pen up, [`Graph::line_to`] draws unit edges
//! from the cursor.

mod node;
mod table;

pub use node::{EdgeStyle, Form, Mark, Node};
pub use table::NodeId;

use table::NodeTable;

use crate::errors::Error;
use crate::types::{Angle, Direction, NodePos};

/// Bounding box of all nodes, in node-grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
}

impl Extent {
    fn at(pos: NodePos) -> Extent {
        Extent {
            left: pos.x,
            top: pos.y,
            right: pos.x,
            bottom: pos.y,
        }
    }

    fn include(&mut self, pos: NodePos) {
        self.left = self.left.min(pos.x);
        self.right = self.right.max(pos.x);
        self.top = self.top.min(pos.y);
        self.bottom = self.bottom.max(pos.y);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    table: NodeTable,
    cursor: Option<NodeId>,
    extent: Option<Extent>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Graph sized for about `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Graph {
        Graph {
            table: NodeTable::with_capacity(nodes),
            ..Graph::default()
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn find(&self, pos: NodePos) -> Option<NodeId> {
        self.table.find(pos)
    }

    /// Node at `pos`, if one was ever referenced.
    pub fn get(&self, pos: NodePos) -> Option<&Node> {
        self.find(pos).map(|id| self.table.node(id))
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.table.node(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.table.node_mut(id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.table
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.table.len() as u32).map(NodeId)
    }

    /// The node at the other end of the edge leaving `id` towards `dir`.
    ///
    /// Edges always lead to an existing node, so this is `None` only when
    /// there is no edge.
    pub fn target(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        let node = self.node(id);
        if !node.has_edge(dir) {
            return None;
        }
        let target = node.pos.step(dir).ok().and_then(|pos| self.find(pos));
        debug_assert!(target.is_some(), "edge {dir} of {} has no target", node.pos);
        target
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Moves the cursor to `(x, y)`, creating the node if needed.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<NodeId, Error> {
        let id = self.node_at(NodePos::new(x, y)?);
        self.cursor = Some(id);
        Ok(id)
    }

    /// Get-or-create without moving the cursor.
    pub fn node_at(&mut self, pos: NodePos) -> NodeId {
        let id = self.table.get_or_insert(pos);
        match &mut self.extent {
            Some(extent) => extent.include(pos),
            None => self.extent = Some(Extent::at(pos)),
        }
        id
    }

    /// Draws from the cursor by `(dx, dy)` in unit steps and returns the node
    /// where the line ends, which becomes the new cursor.
    ///
    /// The offset must be horizontal, vertical or a 45 degree diagonal.
    pub fn line_to(&mut self, dx: i32, dy: i32, style: EdgeStyle) -> Result<NodeId, Error> {
        debug_assert!(dx == 0 || dy == 0 || dx.abs() == dy.abs());
        let mut cur = match self.cursor {
            Some(id) => id,
            None => self.move_to(0, 0)?,
        };
        let Some(dir) = Direction::from_delta(dx.signum(), dy.signum()) else {
            return Ok(cur);
        };
        for _ in 0..dx.abs().max(dy.abs()) {
            let pos = self.node(cur).pos.step(dir)?;
            let next = self.node_at(pos);
            self.node_mut(cur).merge_edge(dir, style);
            self.node_mut(next).merge_edge(dir.opposite(), style);
            cur = next;
        }
        self.cursor = Some(cur);
        Ok(cur)
    }

    // ========================================================================
    // Traversal state
    // ========================================================================

    /// Forgets which edges have been walked.
    pub fn clear_edges_done(&mut self) {
        for node in self.table.nodes_mut() {
            node.clear_done();
        }
    }

    /// Marks the edge leaving `id` towards `dir` as walked.
    #[inline]
    pub fn set_done(&mut self, id: NodeId, dir: Direction) {
        self.node_mut(id).set_done(dir);
    }

    /// Marks both halves of an edge as walked.
    pub fn set_both_done(&mut self, id: NodeId, dir: Direction) {
        self.set_done(id, dir);
        if let Some(target) = self.target(id, dir) {
            self.set_done(target, dir.opposite());
        }
    }

    /// The sharpest right turn still open after arriving at `id` heading
    /// `arrival`. Turning back along the arrival edge is never offered.
    pub fn next_rightward_todo_edge(&self, id: NodeId, arrival: Angle) -> Option<Direction> {
        const TURNS: [i32; 7] = [-135, -90, -45, 0, 45, 90, 135];
        let node = self.node(id);
        TURNS
            .into_iter()
            .map(|turn| Angle::degrees(arrival.raw() + turn).direction())
            .find(|&dir| node.has_edge(dir) && !node.is_done(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i16, y: i16) -> NodePos {
        NodePos { x, y }
    }

    #[test]
    fn test_line_to_creates_edge_pairs() {
        let mut graph = Graph::new();
        graph.move_to(0, 0).unwrap();
        let end = graph.line_to(3, 0, EdgeStyle::Solid).unwrap();
        assert_eq!(graph.node(end).pos, pos(3, 0));
        assert_eq!(graph.len(), 4);

        let mid = graph.get(pos(1, 0)).unwrap();
        assert_eq!(mid.edge(Direction::E), EdgeStyle::Solid);
        assert_eq!(mid.edge(Direction::W), EdgeStyle::Solid);
        assert_eq!(mid.degree(), 2);
        assert_eq!(graph.get(pos(0, 0)).unwrap().degree(), 1);
    }

    #[test]
    fn test_weak_edges_resolve_to_concrete() {
        let mut graph = Graph::new();
        graph.move_to(0, 0).unwrap();
        graph.line_to(1, 1, EdgeStyle::Weak).unwrap();
        graph.move_to(0, 0).unwrap();
        graph.line_to(1, 1, EdgeStyle::Dashed).unwrap();
        let a = graph.get(pos(0, 0)).unwrap();
        let b = graph.get(pos(1, 1)).unwrap();
        assert_eq!(a.edge(Direction::SE), EdgeStyle::Dashed);
        assert_eq!(b.edge(Direction::NW), EdgeStyle::Dashed);
    }

    #[test]
    fn test_extent_and_size_limit() {
        let mut graph = Graph::new();
        graph.move_to(-2, 5).unwrap();
        graph.line_to(0, -4, EdgeStyle::Solid).unwrap();
        assert_eq!(
            graph.extent(),
            Some(Extent {
                left: -2,
                top: 1,
                right: -2,
                bottom: 5
            })
        );

        graph.move_to(i16::MAX.into(), 0).unwrap();
        assert!(matches!(
            graph.line_to(1, 0, EdgeStyle::Solid),
            Err(Error::SizeLimit { .. })
        ));
    }

    #[test]
    fn test_next_rightward_todo_edge() {
        // A plus sign: arriving from the west, the sharpest right turn is south.
        let mut graph = Graph::new();
        graph.move_to(-1, 0).unwrap();
        graph.line_to(2, 0, EdgeStyle::Solid).unwrap();
        graph.move_to(0, -1).unwrap();
        graph.line_to(0, 2, EdgeStyle::Solid).unwrap();
        let center = graph.find(pos(0, 0)).unwrap();
        let east = Direction::E.angle();

        assert_eq!(graph.next_rightward_todo_edge(center, east), Some(Direction::S));
        graph.set_done(center, Direction::S);
        assert_eq!(graph.next_rightward_todo_edge(center, east), Some(Direction::E));
        graph.set_done(center, Direction::E);
        assert_eq!(graph.next_rightward_todo_edge(center, east), Some(Direction::N));
        graph.set_done(center, Direction::N);
        assert_eq!(graph.next_rightward_todo_edge(center, east), None);

        graph.clear_edges_done();
        assert!(!graph.node(center).is_done(Direction::N));
    }

    #[test]
    fn test_target_follows_edges() {
        let mut graph = Graph::new();
        let a = graph.move_to(4, 4).unwrap();
        let b = graph.line_to(-1, 1, EdgeStyle::Solid).unwrap();
        assert_eq!(graph.target(a, Direction::SW), Some(b));
        assert_eq!(graph.target(b, Direction::NE), Some(a));
        assert_eq!(graph.target(a, Direction::N), None);
        graph.set_both_done(a, Direction::SW);
        assert!(graph.node(b).is_done(Direction::NE));
    }
}
