use std::collections::HashSet;

use asciivec::graph::{Graph, Mark, NodeId};
use asciivec::hints::scan_hints;
use asciivec::{TextGrid, construct, extract};
use camino::Utf8Path;

// =============================================================================
// Graph checks
// =============================================================================

/// Every edge has a twin pointing back with the same style.
fn check_symmetry(graph: &Graph) -> Result<(), String> {
    for (id, node) in graph.nodes() {
        for dir in node.edges().iter() {
            let Some(target) = graph.target(id, dir) else {
                return Err(format!("edge {dir:?} at {} leads nowhere", node.pos));
            };
            let back = graph.node(target).edge(dir.opposite());
            if back != node.edge(dir) {
                return Err(format!(
                    "edge {dir:?} at {} is {:?} but its twin is {back:?}",
                    node.pos,
                    node.edge(dir)
                ));
            }
        }
    }
    Ok(())
}

fn connected_components(graph: &Graph) -> usize {
    let mut seen = HashSet::new();
    let mut count = 0;
    for start in graph.ids() {
        if !seen.insert(start) {
            continue;
        }
        count += 1;
        let mut stack: Vec<NodeId> = vec![start];
        while let Some(id) = stack.pop() {
            for dir in graph.node(id).edges().iter() {
                if let Some(next) = graph.target(id, dir) {
                    if seen.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }
    }
    count
}

/// Whether Euler's formula applies to the inner shapes: every node takes
/// part in face tracing and no line dangles into a face.
fn euler_applies(graph: &Graph) -> bool {
    graph.nodes().all(|(_, node)| {
        node.mark.is_closed() && !node.dashed && node.degree() != 1
    })
}

// =============================================================================
// Harness
// =============================================================================

fn check_invariants(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let mut text = TextGrid::parse(&source, asciivec::defaults::TAB_WIDTH);
    scan_hints(&mut text);

    let mut graph = construct(&mut text)?;
    check_symmetry(&graph).map_err(|e| format!("{path}: {e}"))?;

    let again = construct(&mut text)?;
    let first: Vec<_> = graph.nodes().map(|(_, n)| n.clone()).collect();
    let second: Vec<_> = again.nodes().map(|(_, n)| n.clone()).collect();
    assert_eq!(first, second, "{path}: construction is not repeatable");

    let shapes = extract(&mut graph);
    for shape in &shapes.inner {
        assert!(
            shape.turn < 0 && shape.turn % 360 == 0,
            "{path}: inner shape at {} turned {}",
            shape.anchor(),
            shape.turn
        );
        assert!(shape.closed);
    }
    for shape in &shapes.outer {
        assert!(
            shape.turn > 0 && shape.turn % 360 == 0,
            "{path}: outer shape at {} turned {}",
            shape.anchor(),
            shape.turn
        );
    }

    if euler_applies(&graph) {
        let vertices = graph.len() as isize;
        let edges = graph.nodes().map(|(_, n)| n.degree()).sum::<usize>() as isize / 2;
        let components = connected_components(&graph) as isize;
        assert_eq!(
            shapes.inner.len() as isize,
            edges - vertices + components,
            "{path}: inner shapes do not match the bounded faces"
        );
    }

    let arrows = graph.nodes().filter(|(_, n)| n.mark.is_arrow()).count();
    let leapfrogs = graph.nodes().filter(|(_, n)| n.mark == Mark::Leapfrog).count();
    if arrows + leapfrogs > 0 {
        assert!(!shapes.lines.is_empty(), "{path}: marks without lines");
    }

    Ok(())
}

datatest_stable::harness! {
    { test = check_invariants, root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"), pattern = r"\.txt$" },
}
