//! The text grid: ragged rows of characters plus a "drawing" flag per cell.
//!
//! Reads outside the grid return a blank, so pattern rules can probe their
//! neighborhood without bounds checks. The drawing flag marks cells that
//! graph construction has claimed as line art; whatever is left over is text.

use miette::SourceSpan;

use crate::defaults;

#[derive(Debug, Clone, Default)]
struct Row {
    chars: Vec<char>,
    drawing: Vec<bool>,
    /// Byte offset of the line in the source it was read from.
    offset: usize,
    /// Byte length of the line in the source, without the line break.
    len: usize,
}

/// A ragged 2-D array of characters.
#[derive(Debug, Clone, Default)]
pub struct TextGrid {
    rows: Vec<Row>,
}

impl TextGrid {
    /// Reads `source` line by line, replacing each tab by `tab_width` blanks.
    ///
    /// A trailing `\r` is dropped from every line.
    pub fn parse(source: &str, tab_width: usize) -> TextGrid {
        let mut rows = Vec::new();
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut chars = Vec::with_capacity(line.len());
            for ch in line.chars() {
                if ch == '\t' {
                    chars.extend(std::iter::repeat_n(' ', tab_width));
                } else {
                    chars.push(ch);
                }
            }
            rows.push(Row {
                drawing: vec![false; chars.len()],
                chars,
                offset,
                len: line.len(),
            });
            offset += raw.len();
        }
        TextGrid { rows }
    }

    /// Builds a grid from already expanded lines.
    pub fn from_lines<I, S>(lines: I) -> TextGrid
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = String::new();
        for line in lines {
            source.push_str(line.as_ref());
            source.push('\n');
        }
        TextGrid::parse(&source, defaults::TAB_WIDTH)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of characters in row `y`, zero outside the grid.
    #[inline]
    pub fn width(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, |row| row.chars.len())
    }

    fn cell(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width(y)).then_some((x, y))
    }

    /// Character at `(x, y)`, or a blank outside the grid.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> char {
        match self.cell(x, y) {
            Some((x, y)) => self.rows[y].chars[x],
            None => ' ',
        }
    }

    /// Whether a cell is blank (whitespace or outside the grid).
    #[inline]
    pub fn is_blank(&self, x: i32, y: i32) -> bool {
        self.at(x, y).is_whitespace()
    }

    #[inline]
    pub fn is_drawing(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(|(x, y)| self.rows[y].drawing[x])
    }

    /// Claims a cell as line art. Cells outside the grid are ignored.
    #[inline]
    pub fn set_drawing(&mut self, x: i32, y: i32) {
        if let Some((x, y)) = self.cell(x, y) {
            self.rows[y].drawing[x] = true;
        }
    }

    /// Forgets every drawing claim, turning the grid back into plain text.
    pub fn clear_drawing(&mut self) {
        for row in &mut self.rows {
            row.drawing.fill(false);
        }
    }

    /// Overwrites a cell with a blank. Cells outside the grid are ignored.
    pub fn blank_out(&mut self, x: i32, y: i32) {
        if let Some((x, y)) = self.cell(x, y) {
            self.rows[y].chars[x] = ' ';
        }
    }

    /// Whether the character is a letter with a letter next to it.
    ///
    /// Used to tell the letters `o` and `v` in prose from circle and arrow
    /// glyphs in a drawing.
    pub fn is_part_of_word(&self, x: i32, y: i32) -> bool {
        self.at(x, y).is_alphabetic()
            && (self.at(x - 1, y).is_alphabetic() || self.at(x + 1, y).is_alphabetic())
    }

    /// Characters of row `y`.
    pub fn row(&self, y: usize) -> &[char] {
        self.rows.get(y).map_or(&[], |row| row.chars.as_slice())
    }

    /// Source span of line `y`, for diagnostics.
    pub fn line_span(&self, y: usize) -> Option<SourceSpan> {
        self.rows
            .get(y)
            .map(|row| SourceSpan::new(row.offset.into(), row.len))
    }

    /// Total number of cells in all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.chars.len()).sum()
    }
}
