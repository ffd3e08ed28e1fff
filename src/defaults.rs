//! Default settings and fixed tuning constants

use crate::types::Color;

/// Blanks substituted for each tab character.
pub const TAB_WIDTH: usize = 8;

/// A centered paragraph may have margins that differ by
/// `1 + width / CENTER_FUZZ_DIVISOR` columns.
pub const CENTER_FUZZ_DIVISOR: usize = 15;

/// An outer boundary is dropped once this share of its edges is dashed
/// (numerator, denominator).
pub const OUTER_DASHED_LIMIT: (usize, usize) = (1, 4);

/// Fills darker than this lightness get white text.
pub const CONTRAST_LIGHTNESS: u8 = 100;

pub const DARK_TEXT: Color = Color::BLACK;
pub const LIGHT_TEXT: Color = Color::WHITE;
