//! Closed-shape pass: planar face tracing.
//!
//! Every directed half-edge is walked once. A walk always takes the
//! sharpest right turn it has not taken before, backtracking out of dead
//! ends, and registers a face whenever it comes back to a node already on
//! its stack. Faces walked clockwise (negative total turn) are the fillable
//! insides; counter-clockwise ones are outlines around a group of faces.

use crate::defaults;
use crate::graph::{EdgeStyle, Form, Graph, NodeId};
use crate::log::trace;
use crate::types::{Angle, Direction};

use super::path::Shape;

#[derive(Debug, Clone, Copy)]
struct StackEntry {
    node: NodeId,
    /// Heading on arrival.
    angle: Angle,
    /// Sum of the turns made at the nodes below this one.
    turns: i32,
}

/// A face as found, before it becomes a path.
#[derive(Debug, Clone)]
pub(super) struct Face {
    nodes: Vec<NodeId>,
    turn: i32,
}

#[derive(Debug, Default)]
pub(super) struct FaceTracer {
    stack: Vec<StackEntry>,
    faces: Vec<Face>,
}

impl FaceTracer {
    /// Walks every half-edge leaving a straight node and collects faces.
    pub(super) fn trace(mut self, graph: &mut Graph) -> Vec<Face> {
        for id in graph.ids() {
            let node = graph.node(id);
            if !node.is_straight() || !node.mark.is_closed() || node.all_done() {
                continue;
            }
            let edges = node.edges();
            for dir in edges.iter() {
                if !graph.node(id).is_done(dir) {
                    self.walk(graph, id, dir);
                }
            }
        }
        self.faces
    }

    fn walk(&mut self, graph: &mut Graph, start: NodeId, dir: Direction) {
        graph.set_done(start, dir);
        let Some(first) = graph.target(start, dir) else {
            return;
        };
        if !graph.node(first).mark.is_closed() {
            return;
        }

        self.stack.clear();
        self.stack.push(StackEntry {
            node: start,
            angle: Angle::ZERO,
            turns: 0,
        });
        self.stack.push(StackEntry {
            node: first,
            angle: dir.angle(),
            turns: 0,
        });

        while self.stack.len() > 1 {
            let top = self.stack[self.stack.len() - 1];
            let Some(next_dir) = graph.next_rightward_todo_edge(top.node, top.angle) else {
                self.stack.pop();
                continue;
            };
            graph.set_done(top.node, next_dir);
            let Some(next) = graph.target(top.node, next_dir) else {
                continue;
            };
            if !graph.node(next).mark.is_closed() {
                continue;
            }

            let angle = next_dir.angle();
            let turns = top.turns + angle.relative_to(top.angle);
            match self.stack.iter().position(|e| e.node == next) {
                Some(i) => {
                    let leave = self.stack[i + 1];
                    let turn = turns - leave.turns + leave.angle.relative_to(angle);
                    debug_assert!(turn != 0 && turn % 360 == 0, "face turned {turn}");
                    let nodes = self.stack[i..].iter().map(|e| e.node).collect();
                    self.faces.push(Face { nodes, turn });
                    self.stack.truncate(i + 1);
                }
                None => self.stack.push(StackEntry {
                    node: next,
                    angle,
                    turns,
                }),
            }
        }
    }
}

impl Face {
    pub(super) fn is_inner(&self) -> bool {
        self.turn < 0
    }

    /// Node set of the face, for comparing faces regardless of start and
    /// orientation.
    pub(super) fn key(&self) -> Vec<NodeId> {
        let mut key = self.nodes.clone();
        key.sort_unstable();
        key
    }

    /// Style of each edge around the face, and whether both its ends are
    /// dashed.
    fn edges<'g>(&self, graph: &'g Graph) -> impl Iterator<Item = (EdgeStyle, bool)> + 'g {
        let nodes = self.nodes.clone();
        let n = nodes.len();
        (0..n).map(move |k| {
            let (a, b) = (graph.node(nodes[k]), graph.node(nodes[(k + 1) % n]));
            let style = Direction::from_delta(
                i32::from(b.pos.x) - i32::from(a.pos.x),
                i32::from(b.pos.y) - i32::from(a.pos.y),
            )
            .map_or(EdgeStyle::None, |d| a.edge(d));
            (style, a.dashed && b.dashed)
        })
    }

    /// Number of edges on the face that count as dashed.
    fn dashed_edges(&self, graph: &Graph) -> usize {
        self.edges(graph)
            .filter(|&(style, ends)| style == EdgeStyle::Dashed || ends)
            .count()
    }

    /// Whether an outline is worth filling: no arrowheads or leapfrogs on it
    /// and less than a quarter of it dashed.
    pub(super) fn is_fillable_outline(&self, graph: &Graph) -> bool {
        let (num, den) = defaults::OUTER_DASHED_LIMIT;
        self.nodes.iter().all(|&id| graph.node(id).mark.is_closed())
            && self.dashed_edges(graph) * den < self.nodes.len() * num
    }

    /// Converts the face to a closed path starting at a straight node.
    pub(super) fn to_shape(&self, graph: &Graph) -> Shape {
        let n = self.nodes.len();
        let offset = self
            .nodes
            .iter()
            .position(|&id| graph.node(id).is_straight())
            .unwrap_or(0);
        let at = |k: usize| graph.node(self.nodes[(offset + k) % n]);

        let style = self
            .edges(graph)
            .map(|(style, _)| style)
            .find(|s| s.is_concrete())
            .unwrap_or(EdgeStyle::Solid);
        let mut shape = Shape::new(style);
        shape.turn = self.turn;
        let (num, den) = defaults::OUTER_DASHED_LIMIT;
        shape.dashed = self.dashed_edges(graph) * den >= n * num;

        let start = at(0).pos.to_ivec2();
        shape.move_to(start);
        let mut k = 1;
        while k < n {
            let node = at(k);
            if let Form::Curved(_) = node.form {
                shape.arc_to(at(k + 1).pos.to_ivec2(), node.pos.to_ivec2());
                k += 2;
            } else {
                shape.line_to(node.pos.to_ivec2());
                k += 1;
            }
        }
        if shape.current() != Some(start) {
            shape.line_to(start);
        }
        shape.close();
        trace!(turn = self.turn, anchor = ?shape.anchor(), "face");
        shape
    }
}
