//! Turns ASCII-art diagrams into vector shapes.
//!
//! The pipeline runs in a few passes over a [`TextGrid`]:
//!
//! 1. [`construct`] recognizes line-drawing glyphs and builds a planar
//!    [`Graph`] on a grid with twice the text resolution.
//! 2. [`extract`] traces the graph's faces into fillable shapes and walks
//!    its edges into stroke paths.
//! 3. [`cluster`] groups the leftover text into paragraphs.
//! 4. Color hints fill the shapes they sit in.
//!
//! [`asciivec`] runs all of it with default [`Options`].

mod log;

pub mod construct;
pub mod defaults;
pub mod errors;
pub mod extract;
pub mod graph;
pub mod grid;
pub mod hints;
pub mod paragraph;
pub mod scene;
pub mod types;

pub use construct::construct;
pub use errors::Error;
pub use extract::{Element, Shape, ShapeSet, extract};
pub use graph::{EdgeStyle, Extent, Graph, Mark};
pub use grid::TextGrid;
pub use hints::Hint;
pub use paragraph::{Alignment, Paragraph, cluster};
pub use scene::{Options, Scene};
pub use types::{Color, NodePos};

use miette::NamedSource;

/// Builds the scene for `source` with default options.
///
/// Errors come back as a report that shows the offending line.
pub fn asciivec(source: &str) -> Result<Scene, miette::Report> {
    Scene::from_text(source, &Options::default()).map_err(|err| {
        miette::Report::new(err).with_source_code(NamedSource::new("diagram", source.to_owned()))
    })
}
