//! The whole pipeline from source text to a renderable scene.

use glam::IVec2;

use crate::construct::construct;
use crate::defaults;
use crate::errors::Error;
use crate::extract::{Shape, extract};
use crate::graph::{Extent, Mark};
use crate::grid::TextGrid;
use crate::hints::{Hint, scan_hints};
use crate::log::debug;
use crate::paragraph::{Paragraph, cluster};
use crate::types::{Color, NodePos};

/// Knobs for [`Scene::from_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Blanks substituted for each tab.
    pub tab_width: usize,
    /// Whether color codes in the text fill shapes.
    pub hints: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tab_width: defaults::TAB_WIDTH,
            hints: true,
        }
    }
}

/// Everything a renderer needs, in node-grid units.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Outlines around groups of faces.
    pub outer: Vec<Shape>,
    /// Fillable faces.
    pub inner: Vec<Shape>,
    /// Stroke paths.
    pub lines: Vec<Shape>,
    /// Arrowheads, circles and leapfrogs.
    pub marks: Vec<(NodePos, Mark)>,
    pub paragraphs: Vec<Paragraph>,
    pub hints: Vec<Hint>,
    /// Bounding box of the graph; `None` for pure text.
    pub extent: Option<Extent>,
}

impl Scene {
    pub fn from_text(source: &str, options: &Options) -> Result<Scene, Error> {
        let mut text = TextGrid::parse(source, options.tab_width);
        Scene::from_grid(&mut text, options)
    }

    /// Builds a scene from a grid that is already split into rows.
    pub fn from_grid(text: &mut TextGrid, options: &Options) -> Result<Scene, Error> {
        let hints = if options.hints { scan_hints(text) } else { Vec::new() };
        let mut graph = construct(text)?;
        let shapes = extract(&mut graph);
        let paragraphs = cluster(text);

        let marks = graph
            .nodes()
            .filter(|(_, node)| node.mark != Mark::None)
            .map(|(_, node)| (node.pos, node.mark))
            .collect();

        let mut scene = Scene {
            outer: shapes.outer,
            inner: shapes.inner,
            lines: shapes.lines,
            marks,
            paragraphs,
            hints,
            extent: graph.extent(),
        };
        scene.apply_hints();
        debug!(
            inner = scene.inner.len(),
            lines = scene.lines.len(),
            paragraphs = scene.paragraphs.len(),
            hints = scene.hints.len(),
            "scene built"
        );
        Ok(scene)
    }

    /// Fills the topmost inner shape under each hint and picks a readable
    /// text color for the paragraphs on it. Hints outside every shape do
    /// nothing.
    pub fn apply_hints(&mut self) {
        for i in 0..self.hints.len() {
            let hint = self.hints[i];
            let Some(shape) = self.inner.iter_mut().rev().find(|s| s.contains(hint.point())) else {
                continue;
            };
            shape.fill = Some(hint.color);
            let text = contrast(hint.color);
            for paragraph in &mut self.paragraphs {
                let corner = IVec2::new(
                    2 * paragraph.top_inner_x() as i32,
                    2 * paragraph.top() as i32,
                );
                if shape.contains(corner) {
                    paragraph.color = Some(text);
                }
            }
        }
    }
}

fn contrast(fill: Color) -> Color {
    if fill.lightness() < defaults::CONTRAST_LIGHTNESS {
        defaults::LIGHT_TEXT
    } else {
        defaults::DARK_TEXT
    }
}
