//! Text blocks.
//!
//! Whatever graph construction did not claim is text. Runs of text on
//! consecutive lines that overlap horizontally form a paragraph, and the
//! way its rows line up tells how the paragraph is aligned.

use crate::defaults;
use crate::grid::TextGrid;
use crate::log::debug;
use crate::types::Color;

/// Horizontal alignment inferred from the rows of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// One row of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    /// Column where the row starts.
    pub x: usize,
    len: usize,
}

impl Row {
    fn new(text: String, x: usize) -> Row {
        let len = text.chars().count();
        Row { text, x, len }
    }

    /// Column just past the row's last character.
    #[inline]
    pub fn end(&self) -> usize {
        self.x + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    rows: Vec<Row>,
    top: usize,
    left: usize,
    right: usize,
    /// Text color, set when the paragraph sits on a filled shape.
    pub color: Option<Color>,
}

impl Paragraph {
    fn new(row: Row, y: usize) -> Paragraph {
        Paragraph {
            top: y,
            left: row.x,
            right: row.end().saturating_sub(1),
            rows: vec![row],
            color: None,
        }
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn bottom(&self) -> usize {
        self.top + self.rows.len() - 1
    }

    pub fn left(&self) -> usize {
        self.left
    }

    /// Rightmost column holding a character.
    pub fn right(&self) -> usize {
        self.right
    }

    pub fn width(&self) -> usize {
        self.right + 1 - self.left
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Indent of row `i` relative to [`Paragraph::left`].
    pub fn indent(&self, i: usize) -> usize {
        self.rows[i].x - self.left
    }

    /// A column on the top row that is inside the text itself, unlike
    /// `left()`, which may be left of the first row.
    pub fn top_inner_x(&self) -> usize {
        self.rows[0].x
    }

    /// Appends `row` starting at `(x, y)` if it continues the paragraph:
    /// it must be on a new line, overlap the paragraph horizontally, and
    /// overlap the bottom row.
    fn add_row(&mut self, row: Row, y: usize) -> Result<(), Row> {
        let (x, end) = (row.x, row.end());
        if end <= self.left || x > self.right || y <= self.bottom() {
            return Err(row);
        }
        let last = &self.rows[self.rows.len() - 1];
        if end <= last.x || x >= last.end() {
            return Err(row);
        }
        self.left = self.left.min(x);
        self.right = self.right.max(end - 1);
        self.rows.push(row);
        Ok(())
    }

    /// Alignment the author evidently meant, if any.
    ///
    /// Flush left wins over flush right, which wins over centered; rows
    /// count as centered when their margins differ by at most
    /// `1 + width / 15` columns.
    pub fn alignment(&self) -> Option<Alignment> {
        let fuzz = 1 + self.width() / defaults::CENTER_FUZZ_DIVISOR;
        let margins = || {
            self.rows
                .iter()
                .map(|row| (row.x - self.left, self.right + 1 - row.end()))
        };
        if margins().all(|(l, _)| l == 0) {
            Some(Alignment::Left)
        } else if margins().all(|(_, r)| r == 0) {
            Some(Alignment::Right)
        } else if margins().all(|(l, r)| l.abs_diff(r) <= fuzz) {
            Some(Alignment::Center)
        } else {
            None
        }
    }
}

/// Groups the text left over after graph construction into paragraphs.
///
/// A run of text ends at two blanks in a row, at a drawing cell or at the
/// end of the line.
pub fn cluster(text: &TextGrid) -> Vec<Paragraph> {
    let mut clusterer = Clusterer::default();
    for y in 0..text.height() {
        let width = text.width(y);
        for x in 0..width {
            let (cx, cy) = (x as i32, y as i32);
            if !text.is_drawing(cx, cy) {
                let ch = text.at(cx, cy);
                let blank = ch.is_whitespace();
                clusterer.spaces = if blank { clusterer.spaces + 1 } else { 0 };
                if clusterer.row.is_empty() {
                    clusterer.row_x = x;
                }
                if !blank || !clusterer.row.is_empty() {
                    clusterer.row.push(ch);
                }
                if clusterer.spaces <= 1 && x + 1 < width {
                    continue;
                }
            }
            clusterer.finish_row(y);
        }
    }
    let paragraphs = clusterer.finish();
    debug!(paragraphs = paragraphs.len(), "text clustered");
    paragraphs
}

#[derive(Debug, Default)]
struct Clusterer {
    active: Vec<Paragraph>,
    done: Vec<Paragraph>,
    row: Vec<char>,
    row_x: usize,
    spaces: usize,
}

impl Clusterer {
    fn finish_row(&mut self, y: usize) {
        if self.row.is_empty() {
            return;
        }
        let keep = self.row.len().saturating_sub(self.spaces);
        let mut row = Row::new(self.row.drain(..).take(keep).collect(), self.row_x);

        let mut i = 0;
        while i < self.active.len() {
            if y > self.active[i].bottom() + 1 {
                let old = self.active.remove(i);
                self.done.push(old);
                continue;
            }
            match self.active[i].add_row(row, y) {
                Ok(()) => return,
                Err(rejected) => row = rejected,
            }
            i += 1;
        }
        self.active.push(Paragraph::new(row, y));
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.done.append(&mut self.active);
        self.done
    }
}
