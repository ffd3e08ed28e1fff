//! Path builder for extracted shapes.
//!
//! Shapes are built one node at a time, so the builder does the
//! simplification: a run of collinear unit steps collapses into one line,
//! zero-length lines are dropped, and closing a path folds the closing
//! segment into the first one when they are collinear.

use glam::IVec2;

use crate::graph::EdgeStyle;
use crate::types::Color;

/// One step of a path, in node-grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Move(IVec2),
    Line(IVec2),
    /// Rounded corner from the current point to `to`, bending towards the
    /// control point `ctrl`.
    Arc { ctrl: IVec2, to: IVec2 },
}

impl Element {
    /// Where the pen is after this element.
    #[inline]
    pub fn end(self) -> IVec2 {
        match self {
            Element::Move(p) | Element::Line(p) => p,
            Element::Arc { to, .. } => to,
        }
    }
}

/// A fill shape or stroke path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    elements: Vec<Element>,
    pub style: EdgeStyle,
    pub dashed: bool,
    pub closed: bool,
    /// Signed sum of the turns around a closed face, in degrees. Zero for
    /// stroke paths.
    pub turn: i32,
    /// Fill color from a hint.
    pub fill: Option<Color>,
}

impl Default for Shape {
    fn default() -> Self {
        Shape::new(EdgeStyle::Solid)
    }
}

impl Shape {
    pub fn new(style: EdgeStyle) -> Shape {
        Shape {
            elements: Vec::new(),
            style,
            dashed: false,
            closed: false,
            turn: 0,
            fill: None,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Current pen position.
    pub fn current(&self) -> Option<IVec2> {
        self.elements.last().map(|e| e.end())
    }

    pub fn move_to(&mut self, p: IVec2) {
        self.elements.push(Element::Move(p));
    }

    pub fn line_to(&mut self, p: IVec2) {
        debug_assert!(!self.elements.is_empty(), "line_to before move_to");
        let Some(p1) = self.current() else {
            self.move_to(p);
            return;
        };
        if p1 == p {
            return;
        }
        let n = self.elements.len();
        if let (Element::Line(_), Some(before)) = (self.elements[n - 1], n.checked_sub(2)) {
            let p0 = self.elements[before].end();
            if collinear(p0, p1, p) {
                self.elements[n - 1] = Element::Line(p);
                return;
            }
        }
        self.elements.push(Element::Line(p));
    }

    pub fn arc_to(&mut self, to: IVec2, ctrl: IVec2) {
        debug_assert!(!self.elements.is_empty(), "arc_to before move_to");
        self.elements.push(Element::Arc { ctrl, to });
    }

    /// Marks the path as closed. A path that ends where it started with a
    /// line collinear to its first line starts at the closing line's
    /// beginning instead, so the shared corner disappears.
    pub fn close(&mut self) {
        self.closed = true;
        let n = self.elements.len();
        if n < 4 {
            return;
        }
        let (Element::Move(start), Element::Line(first), Element::Line(last)) =
            (self.elements[0], self.elements[1], self.elements[n - 1])
        else {
            return;
        };
        let before = self.elements[n - 2].end();
        if last == start && collinear(before, start, first) {
            self.elements.pop();
            self.elements[0] = Element::Move(before);
        }
    }

    /// Distinct corner points in path order, control points excluded. The
    /// closing point of a closed path is not repeated.
    pub fn vertices(&self) -> Vec<IVec2> {
        let mut points: Vec<IVec2> = self.elements.iter().map(|e| e.end()).collect();
        if self.closed && points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    /// Top-left point of the path, control points included.
    pub fn anchor(&self) -> IVec2 {
        self.elements
            .iter()
            .flat_map(|e| match *e {
                Element::Arc { ctrl, to } => [ctrl, to],
                Element::Move(p) | Element::Line(p) => [p, p],
            })
            .min_by_key(|p| (p.y, p.x))
            .unwrap_or(IVec2::ZERO)
    }

    /// Whether `p` lies inside the closed path, arcs taken as straight
    /// chords through their control points.
    pub fn contains(&self, p: IVec2) -> bool {
        let mut polygon = Vec::with_capacity(self.elements.len() + 1);
        for e in &self.elements {
            match *e {
                Element::Move(q) | Element::Line(q) => polygon.push(q.as_dvec2()),
                Element::Arc { ctrl, to } => {
                    polygon.push(ctrl.as_dvec2());
                    polygon.push(to.as_dvec2());
                }
            }
        }
        let p = p.as_dvec2();
        let mut inside = false;
        let mut j = polygon.len().wrapping_sub(1);
        for i in 0..polygon.len() {
            let (a, b) = (polygon[i], polygon[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[inline]
fn collinear(p0: IVec2, p1: IVec2, p2: IVec2) -> bool {
    (p1 - p0).perp_dot(p2 - p1) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::ivec2;

    #[test]
    fn test_collinear_lines_merge() {
        let mut shape = Shape::default();
        shape.move_to(ivec2(0, 0));
        shape.line_to(ivec2(1, 0));
        shape.line_to(ivec2(2, 0));
        shape.line_to(ivec2(2, 0));
        shape.line_to(ivec2(2, 3));
        assert_eq!(
            shape.elements(),
            &[
                Element::Move(ivec2(0, 0)),
                Element::Line(ivec2(2, 0)),
                Element::Line(ivec2(2, 3)),
            ]
        );
    }

    #[test]
    fn test_close_folds_shared_corner() {
        let mut shape = Shape::default();
        shape.move_to(ivec2(2, 0));
        for p in [ivec2(4, 0), ivec2(4, 4), ivec2(0, 4), ivec2(0, 0), ivec2(2, 0)] {
            shape.line_to(p);
        }
        shape.close();
        assert!(shape.closed);
        assert_eq!(shape.elements()[0], Element::Move(ivec2(0, 0)));
        assert_eq!(shape.current(), Some(ivec2(0, 0)));
        assert_eq!(shape.vertices().len(), 4);
        assert_eq!(shape.anchor(), ivec2(0, 0));
    }

    #[test]
    fn test_arc_is_not_merged() {
        let mut shape = Shape::default();
        shape.move_to(ivec2(0, 2));
        shape.arc_to(ivec2(1, 0), ivec2(0, 0));
        shape.line_to(ivec2(4, 0));
        assert_eq!(shape.elements().len(), 3);
        assert_eq!(shape.anchor(), ivec2(0, 0));
    }

    #[test]
    fn test_contains() {
        let mut shape = Shape::default();
        shape.move_to(ivec2(0, 0));
        for p in [ivec2(4, 0), ivec2(4, 4), ivec2(0, 4), ivec2(0, 0)] {
            shape.line_to(p);
        }
        shape.close();
        assert!(shape.contains(ivec2(2, 2)));
        assert!(!shape.contains(ivec2(6, 2)));
        assert!(!shape.contains(ivec2(2, -1)));
    }
}
