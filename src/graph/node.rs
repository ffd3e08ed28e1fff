//! Nodes and the per-edge attributes they carry.

use crate::types::{Bend, Direction, Directions, NodePos};

/// Line style of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeStyle {
    /// No edge in this slot.
    #[default]
    None,
    /// Placeholder from corner and junction seeding; takes the style of the
    /// line it joins.
    Weak,
    Solid,
    Double,
    Dashed,
}

impl EdgeStyle {
    #[inline]
    pub fn exists(self) -> bool {
        self != EdgeStyle::None
    }

    #[inline]
    pub fn is_concrete(self) -> bool {
        !matches!(self, EdgeStyle::None | EdgeStyle::Weak)
    }

    /// Style after drawing `new` over an edge that already has `self`.
    ///
    /// The first concrete style stays; a weak edge takes the first concrete
    /// style drawn over it.
    pub fn merged(self, new: EdgeStyle) -> EdgeStyle {
        match self {
            EdgeStyle::None => new,
            EdgeStyle::Weak if new.is_concrete() => new,
            current => current,
        }
    }
}

/// Decoration drawn at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    None,
    ArrowRight,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    EmptyCircle,
    FilledCircle,
    /// A horizontal line hopping over a vertical one, `-(-` or `-)-`.
    Leapfrog,
}

impl Mark {
    /// Marks that may sit on the boundary of a fillable shape.
    #[inline]
    pub fn is_closed(self) -> bool {
        matches!(self, Mark::None | Mark::EmptyCircle | Mark::FilledCircle)
    }

    #[inline]
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Mark::ArrowRight | Mark::ArrowUp | Mark::ArrowLeft | Mark::ArrowDown
        )
    }
}

/// Corner shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    #[default]
    Straight,
    /// Control point of a rounded corner.
    Curved(Bend),
}

/// A vertex of the planar graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub pos: NodePos,
    edges: [EdgeStyle; 8],
    done: Directions,
    pub mark: Mark,
    pub form: Form,
    pub dashed: bool,
    /// Character whose center this node is, for nodes drawn by a line glyph.
    pub glyph: Option<char>,
}

impl Node {
    pub(crate) fn new(pos: NodePos) -> Node {
        Node {
            pos,
            edges: [EdgeStyle::None; 8],
            done: Directions::NONE,
            mark: Mark::None,
            form: Form::Straight,
            dashed: false,
            glyph: None,
        }
    }

    #[inline]
    pub fn edge(&self, dir: Direction) -> EdgeStyle {
        self.edges[dir.slot()]
    }

    #[inline]
    pub fn has_edge(&self, dir: Direction) -> bool {
        self.edge(dir).exists()
    }

    pub(crate) fn merge_edge(&mut self, dir: Direction, style: EdgeStyle) {
        let slot = &mut self.edges[dir.slot()];
        *slot = slot.merged(style);
    }

    /// Directions that have an edge.
    pub fn edges(&self) -> Directions {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.has_edge(d))
            .fold(Directions::NONE, |set, d| set | d)
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges().len()
    }

    #[inline]
    pub fn is_done(&self, dir: Direction) -> bool {
        self.done.contains(dir)
    }

    #[inline]
    pub(crate) fn set_done(&mut self, dir: Direction) {
        self.done.insert(dir);
    }

    #[inline]
    pub(crate) fn clear_done(&mut self) {
        self.done = Directions::NONE;
    }

    /// Whether every existing edge has been walked.
    pub fn all_done(&self) -> bool {
        self.edges().iter().all(|d| self.is_done(d))
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        self.form == Form::Straight
    }

    /// Existing edges other than `except`.
    pub fn other_edges(&self, except: Direction) -> impl Iterator<Item = Direction> + '_ {
        self.edges().iter().filter(move |&d| d != except)
    }

    /// Whether the node has exactly two edges that do not form a straight
    /// line through it.
    pub fn is_angled(&self) -> bool {
        let edges = self.edges();
        match (edges.len(), edges.iter().next()) {
            (2, Some(first)) => !edges.contains(first.opposite()),
            _ => false,
        }
    }

    /// The edge a line entering along `incoming` continues on, if any.
    ///
    /// Rounded corners continue on their other edge and leapfrogs straight
    /// across. Other nodes continue only when they have exactly two edges
    /// and the line bends by at most 45 degrees.
    pub fn continue_line(&self, incoming: Direction) -> Option<Direction> {
        let back = incoming.opposite();
        if let Form::Curved(_) = self.form {
            return self.other_edges(back).next();
        }
        if self.mark == Mark::Leapfrog {
            return self.has_edge(incoming).then_some(incoming);
        }
        if self.degree() != 2 || !self.has_edge(back) {
            return None;
        }
        let next = self.other_edges(back).next()?;
        (next.angle().relative_to(incoming.angle()).abs() <= 45).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_merge_keeps_first_concrete() {
        assert_eq!(EdgeStyle::None.merged(EdgeStyle::Weak), EdgeStyle::Weak);
        assert_eq!(EdgeStyle::Weak.merged(EdgeStyle::Solid), EdgeStyle::Solid);
        assert_eq!(EdgeStyle::Solid.merged(EdgeStyle::Weak), EdgeStyle::Solid);
        assert_eq!(EdgeStyle::Solid.merged(EdgeStyle::Double), EdgeStyle::Solid);
        assert_eq!(EdgeStyle::Weak.merged(EdgeStyle::Weak), EdgeStyle::Weak);
    }

    #[test]
    fn test_continue_line() {
        let mut node = Node::new(NodePos::default());
        node.merge_edge(Direction::W, EdgeStyle::Solid);
        node.merge_edge(Direction::SE, EdgeStyle::Solid);
        assert_eq!(node.continue_line(Direction::E), Some(Direction::SE));

        node.merge_edge(Direction::S, EdgeStyle::Solid);
        assert_eq!(node.continue_line(Direction::E), None);

        let mut corner = Node::new(NodePos::default());
        corner.merge_edge(Direction::W, EdgeStyle::Solid);
        corner.merge_edge(Direction::S, EdgeStyle::Solid);
        assert!(corner.is_angled());
        assert_eq!(corner.continue_line(Direction::E), None);
        corner.form = Form::Curved(Bend::Backslash);
        assert_eq!(corner.continue_line(Direction::E), Some(Direction::S));
    }

    #[test]
    fn test_leapfrog_goes_straight() {
        let mut node = Node::new(NodePos::default());
        node.mark = Mark::Leapfrog;
        for dir in [Direction::E, Direction::W, Direction::N, Direction::S] {
            node.merge_edge(dir, EdgeStyle::Weak);
        }
        assert_eq!(node.continue_line(Direction::S), Some(Direction::S));
        assert_eq!(node.continue_line(Direction::E), Some(Direction::E));
        assert!(!node.mark.is_closed());
    }
}
