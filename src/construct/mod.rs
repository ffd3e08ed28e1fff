//! Graph construction from a text grid.
//!
//! Three passes, always in this order:
//!
//! 1. corners and leapfrogs, which claim their cells so that
//! 2. straight lines and junctions can tell a line ending at a corner from
//!    a stray character, and finally
//! 3. dash propagation along lines drawn with `=` or `:`.
//!
//! Pass 2 only looks forward (right, down, or the forward diagonal), so every
//! edge is drawn once, from the cell that comes first in reading order.

mod dashes;
mod rules;

use crate::errors::Error;
use crate::graph::{EdgeStyle, Graph, Mark, NodeId};
use crate::grid::TextGrid;
use crate::log::debug;
use crate::types::NodePos;

use rules::{GlyphRule, Rule};

/// Builds the graph for `text`, marking the cells it uses as drawing.
///
/// Drawing marks from an earlier run are cleared first, so constructing
/// twice from the same grid gives the same graph.
pub fn construct(text: &mut TextGrid) -> Result<Graph, Error> {
    text.clear_drawing();
    let mut graph = Graph::with_capacity(text.cell_count() / 2);

    let mut builder = Builder {
        text,
        graph: &mut graph,
    };
    builder.run_pass(rules::seed_rule)?;
    debug!(nodes = builder.graph.len(), "corners seeded");
    builder.run_pass(rules::edge_rule)?;
    debug!(nodes = builder.graph.len(), "edges drawn");

    dashes::propagate(&mut graph);
    Ok(graph)
}

/// Largest text coordinate handed to the rules; anything beyond overflows
/// the node grid and is reported as a size limit.
const MAX_CELL: usize = (i32::MAX / 4) as usize;

/// State shared by the glyph rules: the grid being claimed and the graph
/// being drawn.
pub(crate) struct Builder<'a> {
    pub(crate) text: &'a mut TextGrid,
    pub(crate) graph: &'a mut Graph,
}

impl Builder<'_> {
    fn run_pass(&mut self, rule_for: fn(char) -> Option<Rule>) -> Result<(), Error> {
        for row in 0..self.text.height() {
            let y = row.min(MAX_CELL) as i32;
            for col in 0..self.text.width(row) {
                let x = col.min(MAX_CELL) as i32;
                let Some(rule) = rule_for(self.text.at(x, y)) else {
                    continue;
                };
                if let Err(err) = rule.apply(self, x, y) {
                    return Err(match self.text.line_span(row) {
                        Some(span) => err.with_span(span),
                        None => err,
                    });
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn at(&self, x: i32, y: i32) -> char {
        self.text.at(x, y)
    }

    #[inline]
    pub(crate) fn is_blank(&self, x: i32, y: i32) -> bool {
        self.text.is_blank(x, y)
    }

    /// Marks the given text cells as drawing.
    pub(crate) fn claim(&mut self, cells: &[(i32, i32)]) {
        for &(x, y) in cells {
            self.text.set_drawing(x, y);
        }
    }

    pub(crate) fn move_to(&mut self, x: i32, y: i32) -> Result<NodeId, Error> {
        self.graph.move_to(x, y)
    }

    pub(crate) fn line_to(&mut self, dx: i32, dy: i32, style: EdgeStyle) -> Result<NodeId, Error> {
        self.graph.line_to(dx, dy, style)
    }

    /// Moves to `(x, y)` and puts `mark` on the node there.
    pub(crate) fn marked(&mut self, x: i32, y: i32, mark: Mark) -> Result<NodeId, Error> {
        let id = self.move_to(x, y)?;
        self.graph.node_mut(id).mark = mark;
        Ok(id)
    }

    /// Records the glyph of text cell `(x, y)` on its center node.
    pub(crate) fn set_glyph(&mut self, x: i32, y: i32) -> Result<(), Error> {
        let ch = self.at(x, y);
        if let Some(id) = self.graph.find(NodePos::new(2 * x, 2 * y)?) {
            self.graph.node_mut(id).glyph.get_or_insert(ch);
        }
        Ok(())
    }
}
