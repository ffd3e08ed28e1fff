//! Error types with rich diagnostics using miette
//!
//! Almost nothing in the pipeline can fail: unrecognized characters are
//! plain text. The one hard limit is the node grid's 16-bit coordinates.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors raised while turning a diagram into a graph.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("diagram too large: node ({x}, {y}) is outside the 16-bit node grid")]
    #[diagnostic(
        code(asciivec::size_limit),
        help("node coordinates are twice the text coordinates and must fit in an i16")
    )]
    SizeLimit {
        x: i32,
        y: i32,
        /// Source line that produced the node, when known.
        #[label("this line is too far out")]
        span: Option<SourceSpan>,
    },
}

impl Error {
    /// Attach a source span to errors that can carry one.
    pub fn with_span(self, at: SourceSpan) -> Self {
        match self {
            Error::SizeLimit { x, y, .. } => Error::SizeLimit {
                x,
                y,
                span: Some(at),
            },
        }
    }
}
