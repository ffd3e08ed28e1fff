//! Glyph rules.
//!
//! Each line-art glyph maps to one rule per pass. A rule inspects the literal
//! characters around the glyph, claims the cells it recognizes as drawing and
//! draws the matching edges.

use enum_dispatch::enum_dispatch;

use super::Builder;
use crate::errors::Error;
use crate::graph::{EdgeStyle, Form, Mark};
use crate::types::Bend;

/// Tests a character against a small literal alphabet.
#[inline]
fn one_of(ch: char, set: &str) -> bool {
    set.contains(ch)
}

#[enum_dispatch]
pub(crate) trait GlyphRule {
    /// Applies the rule to the glyph at text cell `(x, y)`.
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error>;
}

#[enum_dispatch(GlyphRule)]
#[derive(Debug, Clone, Copy)]
pub(crate) enum Rule {
    Corner,
    Leapfrog,
    HorzLine,
    LowLine,
    VertLine,
    DiagLine,
    HorzJunction,
    VertJunction,
    Junction,
}

/// First-pass rule for a glyph: corners and crossings.
pub(crate) fn seed_rule(ch: char) -> Option<Rule> {
    const SLASH: &[(i32, i32)] = &[(1, 1), (-1, -1)];
    const BACKSLASH: &[(i32, i32)] = &[(1, -1), (-1, 1)];
    const DOT: &[(i32, i32)] = &[(1, 1), (-1, 1)];
    const QUOTE: &[(i32, i32)] = &[(1, -1), (-1, -1)];

    let rule: Rule = match ch {
        '/' => Corner::new(false, SLASH).into(),
        '\\' => Corner::new(false, BACKSLASH).into(),
        '.' => Corner::new(true, DOT).into(),
        '\'' => Corner::new(true, QUOTE).into(),
        ',' => Corner::new(true, &[(1, 1)]).into(),
        '`' => Corner::new(true, &[(1, -1)]).into(),
        '(' | ')' => Leapfrog.into(),
        _ => return None,
    };
    Some(rule)
}

/// Second-pass rule for a glyph: straight lines and junctions.
pub(crate) fn edge_rule(ch: char) -> Option<Rule> {
    let rule: Rule = match ch {
        '-' => HorzLine(EdgeStyle::Solid).into(),
        '=' => HorzLine(EdgeStyle::Double).into(),
        '_' => LowLine.into(),
        '|' => VertLine(EdgeStyle::Solid).into(),
        '!' | ':' => VertLine(EdgeStyle::Dashed).into(),
        '/' => DiagLine(-1).into(),
        '\\' => DiagLine(1).into(),
        '<' => HorzJunction(Mark::ArrowLeft).into(),
        '>' => HorzJunction(Mark::ArrowRight).into(),
        '^' => VertJunction(Mark::ArrowUp).into(),
        'v' | 'V' => VertJunction(Mark::ArrowDown).into(),
        '+' => Junction(Mark::None).into(),
        '*' => Junction(Mark::FilledCircle).into(),
        'o' => Junction(Mark::EmptyCircle).into(),
        _ => return None,
    };
    Some(rule)
}

// ============================================================================
// Pass 1
// ============================================================================

/// A corner glyph tried towards each of its opening directions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Corner {
    curved: bool,
    towards: &'static [(i32, i32)],
}

impl Corner {
    const fn new(curved: bool, towards: &'static [(i32, i32)]) -> Corner {
        Corner { curved, towards }
    }

    /// Corner whose horizontal arm points to `dx` and vertical arm to `dy`.
    fn create(&self, b: &mut Builder<'_>, x: i32, y: i32, dx: i32, dy: i32) -> Result<(), Error> {
        if !one_of(b.at(x + dx, y), "-=+") {
            return Ok(());
        }

        let diagonal = if dx * dy < 0 { '/' } else { '\\' };
        let rounded = if dy < 0 { '.' } else { '\'' };
        let bend = Form::Curved(Bend::towards(dx, dy));
        let below = b.at(x, y + dy);

        if one_of(below, "|!:+")
            || (below == diagonal && !self.curved)
            || (below == rounded && self.curved)
        {
            b.claim(&[(x, y), (x + dx, y), (x, y + dy)]);
            b.move_to(2 * x, 2 * y + dy)?;
            if self.curved {
                let ctrl = b.line_to(0, -dy, EdgeStyle::Weak)?;
                b.graph.node_mut(ctrl).form = bend;
                b.line_to(dx, 0, EdgeStyle::Weak)?;
            } else {
                b.line_to(dx, -dy, EdgeStyle::Weak)?;
            }
        } else if below == diagonal && self.curved {
            b.claim(&[(x, y), (x + dx, y), (x, y + dy)]);
            b.move_to(2 * x - dx, 2 * y + dy)?;
            let ctrl = b.line_to(-dx, -dy, EdgeStyle::Weak)?;
            b.graph.node_mut(ctrl).form = bend;
            b.line_to(3 * dx, 0, EdgeStyle::Weak)?;
        }

        let slanted = if dx * dy > 0 { '/' } else { '\\' };
        if self.curved && b.at(x - dx, y + dy) == slanted {
            b.claim(&[(x, y), (x + dx, y), (x - dx, y + dy)]);
            b.move_to(2 * x - dx, 2 * y + dy)?;
            let ctrl = b.line_to(dx, -dy, EdgeStyle::Weak)?;
            b.graph.node_mut(ctrl).form = bend;
            b.line_to(dx, 0, EdgeStyle::Weak)?;
        }
        Ok(())
    }
}

impl GlyphRule for Corner {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        for &(dx, dy) in self.towards {
            self.create(b, x, y, dx, dy)?;
        }
        Ok(())
    }
}

/// `-(-` or `=)=` with `|` above and below: the horizontal line hops over
/// the vertical one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Leapfrog;

impl GlyphRule for Leapfrog {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        if b.at(x, y - 1) != '|' || b.at(x, y + 1) != '|' {
            return Ok(());
        }
        let side = b.at(x - 1, y);
        if !one_of(side, "-=") || b.at(x + 1, y) != side {
            return Ok(());
        }
        let style = if side == '=' { EdgeStyle::Double } else { EdgeStyle::Solid };

        b.claim(&[(x, y - 1), (x - 1, y), (x, y), (x + 1, y), (x, y + 1)]);
        b.move_to(2 * x, 2 * y - 1)?;
        b.line_to(0, 2, EdgeStyle::Weak)?;
        b.move_to(2 * x - 1, 2 * y)?;
        let hop = b.line_to(1, 0, style)?;
        b.graph.node_mut(hop).mark = Mark::Leapfrog;
        b.line_to(1, 0, style)?;
        Ok(())
    }
}

// ============================================================================
// Pass 2
// ============================================================================

/// `-` and `=`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HorzLine(EdgeStyle);

impl GlyphRule for HorzLine {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        let mut style = self.0;
        let mut length = 2;
        let mut check_dash = true;

        let next = b.at(x + 1, y);
        if one_of(next, "-=") {
            check_dash = next == '-' && b.is_blank(x + 2, y);
            b.claim(&[(x, y), (x + 1, y)]);
        } else if one_of(next, "+*<>") || (next == 'o' && !b.text.is_part_of_word(x + 1, y)) {
            b.claim(&[(x, y), (x + 1, y)]);
        } else if style == EdgeStyle::Solid && b.is_blank(x + 1, y) && b.at(x + 2, y) == '-' {
            // "- -" is one dashed run across the gap
            style = EdgeStyle::Dashed;
            length = 4;
            check_dash = false;
            b.claim(&[(x, y), (x + 1, y), (x + 2, y)]);
        }

        if !b.text.is_drawing(x, y) {
            return Ok(());
        }
        if check_dash
            && style == EdgeStyle::Solid
            && b.at(x - 2, y) == '-'
            && b.is_blank(x - 1, y)
        {
            style = EdgeStyle::Dashed;
        }

        b.move_to(2 * x - 1, 2 * y)?;
        b.line_to(length, 0, style)?;
        b.set_glyph(x, y)
    }
}

/// `_`, drawn along the bottom of its cell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LowLine;

impl GlyphRule for LowLine {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        if one_of(b.at(x + 1, y), "_/") {
            b.claim(&[(x, y), (x + 1, y)]);
        }
        if b.at(x - 1, y + 1) == '/' {
            b.claim(&[(x, y), (x - 1, y + 1)]);
        }
        if b.at(x + 1, y + 1) == '\\' {
            b.claim(&[(x, y), (x + 1, y + 1)]);
        }

        if b.text.is_drawing(x, y) {
            b.move_to(2 * x - 1, 2 * y + 1)?;
            b.line_to(2, 0, EdgeStyle::Solid)?;
        }
        Ok(())
    }
}

/// `|`, and the dashed `!` and `:`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VertLine(EdgeStyle);

impl GlyphRule for VertLine {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        let below = b.at(x, y + 1);
        if one_of(below, "|!:+*^") || (one_of(below, "ovV") && !b.text.is_part_of_word(x, y + 1))
        {
            b.claim(&[(x, y), (x, y + 1)]);
        }

        if b.text.is_drawing(x, y) {
            b.move_to(2 * x, 2 * y - 1)?;
            b.line_to(0, 2, self.0)?;
            b.set_glyph(x, y)?;
        }
        Ok(())
    }
}

/// `/` (running to `dx = -1` downwards) and `\` (`dx = +1`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct DiagLine(i32);

impl GlyphRule for DiagLine {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        let dx = self.0;
        let same = if dx < 0 { "/+*" } else { "\\+*" };
        let joins = |b: &Builder<'_>, cx: i32, cy: i32| {
            let ch = b.at(cx, cy);
            one_of(ch, same) || (ch == 'o' && !b.text.is_part_of_word(cx, cy))
        };

        let mut draw = joins(b, x - dx, y - 1);
        if joins(b, x + dx, y + 1) {
            draw = true;
            b.claim(&[(x + dx, y + 1)]);
        }
        if b.at(x - dx, y - 1) == '_' {
            draw = true;
        }
        if b.at(x + dx, y) == '_' {
            draw = true;
            b.claim(&[(x + dx, y)]);
        }

        if !draw && b.text.is_drawing(x, y) {
            // claimed by a rounded corner; draw it only as the corner's arm
            draw = one_of(b.at(x - dx, y - 1), ".,")
                || one_of(b.at(x, y - 1), ".,")
                || one_of(b.at(x + dx, y + 1), "'`")
                || one_of(b.at(x, y + 1), "'`");
        }

        if draw {
            b.claim(&[(x, y)]);
            b.move_to(2 * x - dx, 2 * y - 1)?;
            b.line_to(2 * dx, 2, EdgeStyle::Solid)?;
            b.set_glyph(x, y)?;
        }
        Ok(())
    }
}

/// `<` and `>`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HorzJunction(Mark);

impl GlyphRule for HorzJunction {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        if b.text.is_drawing(x, y) {
            b.marked(2 * x, 2 * y, self.0)?;
            b.line_to(-1, 0, EdgeStyle::Weak)?;
        }
        if one_of(b.at(x + 1, y), "-=") {
            b.claim(&[(x, y), (x + 1, y)]);
            b.marked(2 * x, 2 * y, self.0)?;
            b.line_to(1, 0, EdgeStyle::Weak)?;
        }
        Ok(())
    }
}

/// `^`, `v` and `V`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VertJunction(Mark);

impl GlyphRule for VertJunction {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        if self.0 == Mark::ArrowDown && b.text.is_part_of_word(x, y) {
            return Ok(());
        }
        if b.text.is_drawing(x, y) {
            b.marked(2 * x, 2 * y, self.0)?;
            b.line_to(0, -1, EdgeStyle::Weak)?;
        }
        if one_of(b.at(x, y + 1), "|!:") {
            b.claim(&[(x, y), (x, y + 1)]);
            b.marked(2 * x, 2 * y, self.0)?;
            b.line_to(0, 1, EdgeStyle::Weak)?;
        }
        Ok(())
    }
}

/// `+`, `*` and `o`: joins lines from any direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Junction(Mark);

impl Junction {
    const BACKWARD: [(i32, i32, &'static str); 4] =
        [(-1, -1, "\\"), (0, -1, "|!:+"), (1, -1, "/"), (-1, 0, "-=+")];
    const FORWARD: [(i32, i32, &'static str); 4] =
        [(1, 0, "-=+"), (-1, 1, "/"), (0, 1, "|!:+"), (1, 1, "\\")];

    fn join(&self, b: &mut Builder<'_>, x: i32, y: i32, dx: i32, dy: i32, set: &str) -> Result<bool, Error> {
        if !one_of(b.at(x + dx, y + dy), set) {
            return Ok(false);
        }
        b.claim(&[(x + dx, y + dy)]);
        b.marked(2 * x, 2 * y, self.0)?;
        b.line_to(dx, dy, EdgeStyle::Weak)?;
        Ok(true)
    }
}

impl GlyphRule for Junction {
    fn apply(&self, b: &mut Builder<'_>, x: i32, y: i32) -> Result<(), Error> {
        if self.0 == Mark::EmptyCircle && b.text.is_part_of_word(x, y) {
            return Ok(());
        }
        if b.text.is_drawing(x, y) {
            for (dx, dy, set) in Self::BACKWARD {
                self.join(b, x, y, dx, dy, set)?;
            }
        }
        let mut drawn = false;
        for (dx, dy, set) in Self::FORWARD {
            drawn |= self.join(b, x, y, dx, dy, set)?;
        }
        if drawn {
            b.claim(&[(x, y)]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_line_glyphs() {
        for ch in "/\\.',`()".chars() {
            assert!(seed_rule(ch).is_some(), "{ch:?} has no seed rule");
        }
        for ch in "-=_|!:/\\<>^vV+*o".chars() {
            assert!(edge_rule(ch).is_some(), "{ch:?} has no edge rule");
        }
        assert!(seed_rule('-').is_none());
        assert!(edge_rule('a').is_none());
        assert!(edge_rule('.').is_none());
    }

    #[test]
    fn test_corner_directions() {
        let Some(Rule::Corner(slash)) = seed_rule('/') else {
            panic!("'/' should be a corner");
        };
        assert!(!slash.curved);
        assert_eq!(slash.towards, &[(1, 1), (-1, -1)]);

        let Some(Rule::Corner(comma)) = seed_rule(',') else {
            panic!("',' should be a corner");
        };
        assert!(comma.curved);
        assert_eq!(comma.towards, &[(1, 1)]);
    }
}
