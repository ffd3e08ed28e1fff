//! Shape and line extraction from a finished graph.
//!
//! Two walks over the graph share the per-node done masks: first the faces,
//! then, after clearing the masks, the stroke paths.

mod faces;
mod lines;
mod path;

pub use path::{Element, Shape};

use std::collections::HashSet;

use crate::graph::Graph;
use crate::log::debug;

use faces::FaceTracer;

/// Everything the extractor produces.
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    /// Outlines around groups of faces, sorted by anchor.
    pub outer: Vec<Shape>,
    /// Fillable faces, sorted by anchor.
    pub inner: Vec<Shape>,
    /// Stroke paths in the order they were found.
    pub lines: Vec<Shape>,
}

pub fn extract(graph: &mut Graph) -> ShapeSet {
    graph.clear_edges_done();
    let faces = FaceTracer::default().trace(graph);

    let inner_keys: HashSet<_> = faces.iter().filter(|f| f.is_inner()).map(|f| f.key()).collect();
    let mut inner = Vec::new();
    let mut outer = Vec::new();
    for face in &faces {
        if face.is_inner() {
            inner.push(face.to_shape(graph));
        } else if face.is_fillable_outline(graph) && !inner_keys.contains(&face.key()) {
            outer.push(face.to_shape(graph));
        }
    }
    inner.sort_by_key(|s| anchor_key(s));
    outer.sort_by_key(|s| anchor_key(s));

    graph.clear_edges_done();
    let lines = lines::find_lines(graph);

    debug!(
        faces = faces.len(),
        inner = inner.len(),
        outer = outer.len(),
        lines = lines.len(),
        "extracted"
    );
    ShapeSet { outer, inner, lines }
}

fn anchor_key(shape: &Shape) -> (i32, i32) {
    let p = shape.anchor();
    (p.y, p.x)
}
