//! Line pass: stroke paths.
//!
//! Lines are seeded at line ends first, then at corners, then at crossings,
//! so that a line's dash pattern starts at a natural end whenever there is
//! one.

use crate::graph::{EdgeStyle, Form, Graph, NodeId};
use crate::log::trace;
use crate::types::Direction;

use super::path::Shape;

/// Seed nodes in the order lines should start from.
fn seeds(graph: &Graph) -> Vec<NodeId> {
    let mut classes: [Vec<NodeId>; 4] = Default::default();
    for (id, node) in graph.nodes() {
        if !node.is_straight() {
            continue;
        }
        let class = match node.degree() {
            1 => 0,
            2 if node.is_angled() => 1,
            d if d >= 3 => 2,
            _ => 3,
        };
        classes[class].push(id);
    }
    classes.into_iter().flatten().collect()
}

/// Follows every edge not yet walked and returns the stroke paths.
pub(super) fn find_lines(graph: &mut Graph) -> Vec<Shape> {
    let mut lines = Vec::new();
    for id in seeds(graph) {
        let edges = graph.node(id).edges();
        for dir in edges.iter() {
            let mut seed = Some((id, dir));
            while let Some((start, dir)) = seed.take() {
                if graph.node(start).is_done(dir) {
                    break;
                }
                let (line, restart) = follow(graph, start, dir);
                lines.push(line);
                seed = restart;
            }
        }
    }
    lines
}

/// Draws one line from `start` along `dir`.
///
/// Returns the line and, if it ended because the style changed, where the
/// next line picks up.
fn follow(graph: &mut Graph, start: NodeId, dir: Direction) -> (Shape, Option<(NodeId, Direction)>) {
    let mut style = graph.node(start).edge(dir);
    let mut shape = Shape::new(style);
    shape.move_to(graph.node(start).pos.to_ivec2());

    let mut dashed = graph.node(start).dashed;
    let mut restart = None;
    let (mut cur, mut dir) = (start, dir);

    loop {
        graph.set_both_done(cur, dir);
        let Some(target) = graph.target(cur, dir) else {
            break;
        };
        let node = graph.node(target);
        let here = node.pos.to_ivec2();
        dashed &= node.dashed;

        let Some(next) = node.continue_line(dir) else {
            shape.line_to(here);
            break;
        };
        let next_style = node.edge(next);
        if style == EdgeStyle::Weak {
            style = next_style;
        } else if next_style != EdgeStyle::Weak && next_style != style {
            shape.line_to(here);
            restart = Some((target, next));
            break;
        }
        if node.is_done(next) {
            shape.line_to(here);
            shape.closed = target == start;
            break;
        }

        match node.form {
            Form::Straight => shape.line_to(here),
            Form::Curved(_) => {
                let from = graph.node(cur).pos.to_ivec2();
                if let Ok(to) = node.pos.step(next) {
                    shape.line_to(from);
                    shape.arc_to(to.to_ivec2(), here);
                }
            }
        }
        cur = target;
        dir = next;
    }

    shape.style = if style == EdgeStyle::Weak { EdgeStyle::Solid } else { style };
    shape.dashed = dashed;
    trace!(style = ?shape.style, closed = shape.closed, "line");
    (shape, restart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::construct;
    use crate::grid::TextGrid;
    use glam::ivec2;

    fn lines(text: &[&str]) -> Vec<Shape> {
        let mut text = TextGrid::from_lines(text);
        let mut graph = construct(&mut text).unwrap();
        find_lines(&mut graph)
    }

    #[test]
    fn test_seeds_prefer_line_ends() {
        let mut text = TextGrid::from_lines(["+--", "|"]);
        let graph = construct(&mut text).unwrap();
        let order: Vec<_> = seeds(&graph)
            .into_iter()
            .map(|id| graph.node(id).degree())
            .collect();
        let first_corner = order.iter().position(|&d| d == 2);
        assert_eq!(&order[..2], &[1, 1]);
        assert!(first_corner.is_some());
    }

    #[test]
    fn test_rounded_corner_is_one_line() {
        let found = lines(&[".--", "|"]);
        assert_eq!(found.len(), 1);
        let line = &found[0];
        assert!(line.elements().iter().any(|e| matches!(e, crate::extract::Element::Arc { .. })));
        assert!(!line.closed);
    }

    #[test]
    fn test_rounded_box_closes() {
        let found = lines(&[".-.", "| |", "'-'"]);
        assert_eq!(found.len(), 1);
        assert!(found[0].closed);
        assert_eq!(found[0].style, EdgeStyle::Solid);
    }

    #[test]
    fn test_crossing_splits_lines() {
        let found = lines(&[" | ", "-+-", " | "]);
        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|l| l.elements().len() == 2));
    }

    #[test]
    fn test_leapfrog_keeps_lines_whole() {
        let found = lines(&[" | ", "-)-", " | "]);
        assert_eq!(found.len(), 2);
        let ends: Vec<_> = found.iter().map(|l| l.current()).collect();
        assert!(ends.contains(&Some(ivec2(2, 5))) || ends.contains(&Some(ivec2(2, -1))));
    }
}
