//! Small strongly-typed primitives shared by every pass.
//!
//! Directions are single bits so that a node's set of edges, or the set of
//! edges already walked, is one `u8`. Node positions live on a grid with
//! twice the text resolution and are limited to `i16`.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use glam::IVec2;

use crate::errors::Error;

// ============================================================================
// Direction
// ============================================================================

/// One of the eight compass octants, stored as a single bit.
///
/// Bit `i` is edge slot `i`. Slot 0 points east and the slots proceed
/// counter-clockwise as seen on screen, so slot `i` has angle `45 * i`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Direction(u8);

impl Direction {
    pub const E: Direction = Direction(1 << 0);
    pub const NE: Direction = Direction(1 << 1);
    pub const N: Direction = Direction(1 << 2);
    pub const NW: Direction = Direction(1 << 3);
    pub const W: Direction = Direction(1 << 4);
    pub const SW: Direction = Direction(1 << 5);
    pub const S: Direction = Direction(1 << 6);
    pub const SE: Direction = Direction(1 << 7);

    /// All directions in slot order.
    pub const ALL: [Direction; 8] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    const DELTAS: [(i32, i32); 8] = [
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    #[inline]
    pub const fn from_slot(slot: usize) -> Direction {
        Direction(1 << (slot % 8))
    }

    /// Direction of a unit step; `None` for `(0, 0)` or non-unit steps.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Self::DELTAS
            .iter()
            .position(|&d| d == (dx, dy))
            .map(Direction::from_slot)
    }

    #[inline]
    pub const fn slot(self) -> usize {
        self.0.trailing_zeros() as usize
    }

    #[inline]
    pub const fn bit(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn delta(self) -> (i32, i32) {
        Self::DELTAS[self.slot()]
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        self.rotated(4)
    }

    #[inline]
    pub const fn left45(self) -> Direction {
        self.rotated(1)
    }

    #[inline]
    pub const fn right45(self) -> Direction {
        self.rotated(7)
    }

    #[inline]
    pub const fn left90(self) -> Direction {
        self.rotated(2)
    }

    #[inline]
    pub const fn right90(self) -> Direction {
        self.rotated(6)
    }

    #[inline]
    const fn rotated(self, slots: usize) -> Direction {
        Direction::from_slot(self.slot() + slots)
    }

    #[inline]
    pub const fn angle(self) -> Angle {
        Angle((self.slot() * 45) as u16)
    }

    pub const fn is_horizontal(self) -> bool {
        self.0 & (Direction::E.0 | Direction::W.0) != 0
    }

    pub const fn is_vertical(self) -> bool {
        self.0 & (Direction::N.0 | Direction::S.0) != 0
    }

    /// Direction after walking around a rounded corner drawn with `bend`.
    ///
    /// Only horizontal and vertical directions turn; diagonals come back
    /// unchanged.
    pub fn walk_corner(self, bend: Bend) -> Direction {
        match (self.is_horizontal(), self.is_vertical(), bend) {
            (true, _, Bend::Slash) => self.left90(),
            (true, _, Bend::Backslash) => self.right90(),
            (_, true, Bend::Slash) => self.right90(),
            (_, true, Bend::Backslash) => self.left90(),
            _ => self,
        }
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 8] = ["E", "NE", "N", "NW", "W", "SW", "S", "SE"];
        f.write_str(NAMES[self.slot()])
    }
}

/// The glyph shape of a rounded corner.
///
/// `Slash` corners look like `/` (for example `.-` over `/`), `Backslash`
/// corners like `\`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bend {
    Slash,
    Backslash,
}

impl Bend {
    /// Bend of a corner opening towards `(dx, dy)`.
    pub fn towards(dx: i32, dy: i32) -> Bend {
        if dx * dy > 0 { Bend::Slash } else { Bend::Backslash }
    }
}

// ============================================================================
// Directions
// ============================================================================

/// A set of directions as an 8-bit mask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Directions(u8);

impl Directions {
    pub const NONE: Directions = Directions(0);

    #[inline]
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & dir.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.0;
    }

    #[inline]
    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.0;
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl From<Direction> for Directions {
    fn from(dir: Direction) -> Self {
        Directions(dir.0)
    }
}

impl BitOr<Direction> for Directions {
    type Output = Directions;
    fn bitor(self, rhs: Direction) -> Directions {
        Directions(self.0 | rhs.0)
    }
}

impl BitOrAssign<Direction> for Directions {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ============================================================================
// Angle
// ============================================================================

/// A multiple of 45 degrees in `[0, 360)`, counter-clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Angle(u16);

impl Angle {
    pub const ZERO: Angle = Angle(0);

    /// Normalizes any multiple of 45 into `[0, 360)`.
    pub fn degrees(deg: i32) -> Angle {
        debug_assert!(deg % 45 == 0, "angle {deg} is not a multiple of 45");
        Angle(deg.rem_euclid(360) as u16)
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0 as i32
    }

    /// Signed turn in `(-180, 180]` that takes a walker heading `other`
    /// to heading `self`. Positive turns are left turns.
    pub fn relative_to(self, other: Angle) -> i32 {
        let d = (self.raw() - other.raw()).rem_euclid(360);
        if d > 180 { d - 360 } else { d }
    }

    #[inline]
    pub fn direction(self) -> Direction {
        Direction::from_slot(self.0 as usize / 45)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

// ============================================================================
// NodePos
// ============================================================================

/// Position on the node grid (twice the text resolution).
///
/// The text character at `(x, y)` has its center node at `(2x, 2y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePos {
    pub x: i16,
    pub y: i16,
}

impl NodePos {
    pub fn new(x: i32, y: i32) -> Result<NodePos, Error> {
        match (i16::try_from(x), i16::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(NodePos { x, y }),
            _ => Err(Error::SizeLimit { x, y, span: None }),
        }
    }

    pub fn step(self, dir: Direction) -> Result<NodePos, Error> {
        let (dx, dy) = dir.delta();
        NodePos::new(i32::from(self.x) + dx, i32::from(self.y) + dy)
    }

    #[inline]
    pub fn to_ivec2(self) -> IVec2 {
        IVec2::new(i32::from(self.x), i32::from(self.y))
    }
}

impl fmt::Display for NodePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Color
// ============================================================================

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// HSL lightness in `0..=255`.
    pub fn lightness(self) -> u8 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        ((u16::from(max) + u16::from(min)) / 2) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
