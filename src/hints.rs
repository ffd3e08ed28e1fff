//! Color hints embedded in the diagram.
//!
//! A hint is a word like `cRED` or `c159` written inside a shape. It is
//! removed from the text before the graph is built and later fills the
//! innermost shape around it.

use std::sync::LazyLock;

use glam::IVec2;
use regex_lite::Regex;

use crate::grid::TextGrid;
use crate::log::trace;
use crate::types::Color;

static HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bc([0-9]{3}|RED|GRE|BLU|PNK|YEL|BLK)\b").expect("hint pattern is valid")
});

/// A color code found at a text cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

impl Hint {
    /// The hint's position on the node grid.
    pub fn point(&self) -> IVec2 {
        IVec2::new(2 * self.x as i32, 2 * self.y as i32)
    }
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "RED" => Color::rgb(0xff, 0x41, 0x36),
        "GRE" => Color::rgb(0x2e, 0xcc, 0x40),
        "BLU" => Color::rgb(0x00, 0x74, 0xd9),
        "PNK" => Color::rgb(0xbc, 0x35, 0xcf),
        "YEL" => Color::rgb(0xff, 0xdc, 0x00),
        "BLK" => Color::rgb(0x11, 0x11, 0x11),
        _ => return None,
    };
    Some(color)
}

/// Parses the part after the `c`: three digits `0..=9` scaled to a byte,
/// or a color name.
fn parse_color(code: &str) -> Option<Color> {
    let digits: Vec<u8> = code
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(|d| (d * 255 / 9) as u8)
        .collect();
    match digits[..] {
        [r, g, b] => Some(Color::rgb(r, g, b)),
        _ => named(code),
    }
}

/// Finds every hint in `text` and blanks it out.
pub fn scan_hints(text: &mut TextGrid) -> Vec<Hint> {
    let mut hints = Vec::new();
    for y in 0..text.height() {
        let line: String = text.row(y).iter().collect();
        for caps in HINT.captures_iter(&line) {
            let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(color) = parse_color(code.as_str()) else {
                continue;
            };
            let x = line[..whole.start()].chars().count();
            trace!(x, y, %color, "hint");
            hints.push(Hint { x, y, color });
            for dx in 0..whole.as_str().chars().count() {
                text.blank_out((x + dx) as i32, y as i32);
            }
        }
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_and_named_colors() {
        assert_eq!(parse_color("909"), Some(Color::rgb(255, 0, 255)));
        assert_eq!(parse_color("159"), Some(Color::rgb(28, 141, 255)));
        assert_eq!(parse_color("RED"), Some(Color::rgb(0xff, 0x41, 0x36)));
        assert_eq!(parse_color("XYZ"), None);
    }

    #[test]
    fn test_scan_blanks_hints() {
        let mut text = TextGrid::from_lines(["| cBLU |", "|c000  |"]);
        let hints = scan_hints(&mut text);
        assert_eq!(hints.len(), 2);
        assert_eq!((hints[0].x, hints[0].y), (2, 0));
        assert_eq!(hints[0].color, named("BLU").unwrap());
        assert_eq!(hints[1].color, Color::BLACK);
        assert_eq!(hints[1].point(), IVec2::new(2, 2));
        assert!(text.row(0)[1..6].iter().all(|&c| c == ' '));
        assert_eq!(text.at(7, 0), '|');
    }

    #[test]
    fn test_hint_must_be_a_whole_word() {
        let mut text = TextGrid::from_lines(["abcRED c12 cREDS"]);
        assert!(scan_hints(&mut text).is_empty());
        assert_eq!(text.at(2, 0), 'c');
    }
}
