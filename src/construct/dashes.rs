//! Dash propagation.
//!
//! A single `=` or `:` anywhere on a line makes the whole line dashed. The
//! flag spreads from every such glyph in both directions along its axis,
//! around rounded corners, until it runs into an arrowhead, a line end or a
//! node that is already dashed.

use crate::graph::{Form, Graph, NodeId};
use crate::log::{debug, trace};
use crate::types::Direction;

/// Marks dashed nodes and returns how many were marked.
pub(super) fn propagate(graph: &mut Graph) -> usize {
    let mut marked = 0;
    for id in graph.ids() {
        let node = graph.node(id);
        if node.dashed {
            continue;
        }
        let axis = match node.glyph {
            Some('=') => Direction::E,
            Some(':') => Direction::S,
            _ => continue,
        };
        trace!(pos = %node.pos, "dash seed");
        graph.node_mut(id).dashed = true;
        marked += 1;
        marked += walk(graph, id, axis);
        marked += walk(graph, id, axis.opposite());
    }
    debug!(marked, "dashes propagated");
    marked
}

/// Walks from `start` towards `dir`, flagging nodes until a stop condition.
fn walk(graph: &mut Graph, start: NodeId, mut dir: Direction) -> usize {
    let mut marked = 0;
    let mut cur = start;
    while let Some(next) = graph.target(cur, dir) {
        let node = graph.node_mut(next);
        if node.dashed || node.mark.is_arrow() {
            break;
        }
        node.dashed = true;
        marked += 1;

        if let Form::Curved(bend) = node.form {
            let back = dir.opposite();
            let turned = dir.walk_corner(bend);
            dir = if node.has_edge(turned) {
                turned
            } else {
                match node.other_edges(back).next() {
                    Some(other) => other,
                    None => break,
                }
            };
        }
        cur = next;
    }
    marked
}

#[cfg(test)]
mod tests {
    use crate::construct::construct;
    use crate::grid::TextGrid;
    use crate::types::NodePos;

    fn dashed(lines: &[&str]) -> Vec<NodePos> {
        let mut text = TextGrid::from_lines(lines);
        let graph = construct(&mut text).unwrap();
        let mut out: Vec<_> = graph
            .nodes()
            .filter(|(_, n)| n.dashed)
            .map(|(_, n)| n.pos)
            .collect();
        out.sort_by_key(|p| (p.y, p.x));
        out
    }

    #[test]
    fn test_double_line_dashes_whole_run() {
        let nodes = dashed(&["o--+=="]);
        assert_eq!(nodes.len(), 12);
        assert_eq!(nodes.first(), Some(&NodePos { x: 0, y: 0 }));
        assert_eq!(nodes.last(), Some(&NodePos { x: 11, y: 0 }));
    }

    #[test]
    fn test_stops_at_arrowhead() {
        let nodes = dashed(&["==>"]);
        assert!(nodes.iter().all(|p| p.x < 4));
        assert!(nodes.contains(&NodePos { x: 3, y: 0 }));
    }

    #[test]
    fn test_plain_lines_stay_solid() {
        assert!(dashed(&["+--+", "|  |", "+--+"]).is_empty());
    }

    #[test]
    fn test_turns_round_corners() {
        // the colon on the left side dashes the top edge through the corner
        let nodes = dashed(&[".--", ":  "]);
        assert!(nodes.contains(&NodePos { x: 0, y: 0 }));
        assert!(nodes.contains(&NodePos { x: 4, y: 0 }));
        assert!(nodes.contains(&NodePos { x: 0, y: 3 }));
    }
}
