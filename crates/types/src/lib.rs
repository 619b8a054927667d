//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid algebra, compositing, input dispatch).
//!
//! # Coordinate Frames
//!
//! Every grid stores its cells in a **local** frame starting at `(0, 0)` and is
//! anchored in the shared **world** frame by an [`Offset`]:
//!
//! - **World → local**: subtract the grid's offset
//! - **Local → world**: add the grid's offset
//! - `x` grows to the right, `y` grows downwards
//!
//! # Merge Modes
//!
//! Mask grids combine with one of six truth tables. The byte values are the
//! truth-table encoding of the map format: reading the nibble from the high bit
//! down gives the results for inputs `(0,0)`, `(0,1)`, `(1,0)`, `(1,1)`:
//!
//! | Mode | Byte | Uncovered cell resolves to |
//! |------|------|----------------------------|
//! | `And` | `0b0001` | `false` |
//! | `Or` | `0b0111` | unchanged |
//! | `Xor` | `0b0110` | unchanged |
//! | `Nand` | `0b1110` | `true` |
//! | `Nor` | `0b1000` | `!this` |
//! | `Xnor` | `0b1001` | `!this` |
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLANK_CHAR` | `' '` | Character used for blank / not-rendered cells |
//! | `DEFAULT_LAYER_CAPACITY` | 10 | Initial layer list capacity for compositors |
//! | `TICK_MS` | 16 | Suggested tick interval for hosts (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_charmap_types::{FrameSelect, MergeMode, Offset, Slot};
//!
//! // Offsets are plain values
//! let a = Offset::new(2, 3);
//! assert_eq!(a + Offset::new(1, 1), Offset::new(3, 4));
//!
//! // Parse a merge mode
//! assert_eq!(MergeMode::from_str("xor"), Some(MergeMode::Xor));
//!
//! // -1 selects an explicit blank frame
//! assert_eq!(FrameSelect::from_index(-1), Some(FrameSelect::Blank));
//!
//! // Sparse list slots
//! let slot: Slot<u8> = Slot::from(7);
//! assert!(slot.is_filled());
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Character written into blank cells and substituted for not-rendered cells
pub const BLANK_CHAR: char = ' ';

/// Initial capacity of a compositor's layer list
pub const DEFAULT_LAYER_CAPACITY: usize = 10;

/// Suggested fixed tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Frame index of a button's idle look
pub const BUTTON_BASE_FRAME: usize = 0;

/// Frame index of a button's selected (hover) look
pub const BUTTON_HOVER_FRAME: usize = 1;

/// Frame index of a button's activated look
pub const BUTTON_USE_FRAME: usize = 2;

/// Immutable 2D integer coordinate anchoring a grid in world space
///
/// All arithmetic returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    x: i32,
    y: i32,
}

impl Offset {
    /// The world origin `(0, 0)`
    pub const ORIGIN: Offset = Offset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Same offset with a different `x`
    pub const fn with_x(&self, x: i32) -> Self {
        Self { x, y: self.y }
    }

    /// Same offset with a different `y`
    pub const fn with_y(&self, y: i32) -> Self {
        Self { x: self.x, y }
    }

    /// Translate by `(dx, dy)`
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_charmap_types::Offset;
    ///
    /// assert_eq!(Offset::new(1, 1).translate(-3, 2), Offset::new(-2, 3));
    /// ```
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Multiply both components by `factor`
    pub const fn scale(&self, factor: i32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        self.translate(rhs.x, rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        self.translate(-rhs.x, -rhs.y)
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Offset::new(x, y)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// The six boolean combination modes for mask merges
///
/// - **And / Nand**: a cell the other mask does not cover combines as if with `false`
/// - **Or / Xor**: an uncovered cell is left unchanged
/// - **Nor / Xnor**: an uncovered cell becomes the negation of itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

impl MergeMode {
    /// Every mode, in declaration order
    pub const ALL: [MergeMode; 6] = [
        MergeMode::And,
        MergeMode::Or,
        MergeMode::Xor,
        MergeMode::Nand,
        MergeMode::Nor,
        MergeMode::Xnor,
    ];

    /// Parse from the single-byte truth-table encoding
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_charmap_types::MergeMode;
    ///
    /// assert_eq!(MergeMode::from_bits(0b0111), Some(MergeMode::Or));
    /// assert_eq!(MergeMode::from_bits(0b1000), Some(MergeMode::Nor));
    /// assert_eq!(MergeMode::from_bits(0b0101), None);
    /// ```
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b0001 => Some(MergeMode::And),
            0b0111 => Some(MergeMode::Or),
            0b0110 => Some(MergeMode::Xor),
            0b1110 => Some(MergeMode::Nand),
            0b1000 => Some(MergeMode::Nor),
            0b1001 => Some(MergeMode::Xnor),
            _ => None,
        }
    }

    /// Truth-table byte for this mode
    pub fn bits(&self) -> u8 {
        match self {
            MergeMode::And => 0b0001,
            MergeMode::Or => 0b0111,
            MergeMode::Xor => 0b0110,
            MergeMode::Nand => 0b1110,
            MergeMode::Nor => 0b1000,
            MergeMode::Xnor => 0b1001,
        }
    }

    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "and" => Some(MergeMode::And),
            "or" => Some(MergeMode::Or),
            "xor" => Some(MergeMode::Xor),
            "nand" => Some(MergeMode::Nand),
            "nor" => Some(MergeMode::Nor),
            "xnor" => Some(MergeMode::Xnor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMode::And => "and",
            MergeMode::Or => "or",
            MergeMode::Xor => "xor",
            MergeMode::Nand => "nand",
            MergeMode::Nor => "nor",
            MergeMode::Xnor => "xnor",
        }
    }

    /// Combine a cell with a covering cell of the other mask
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_charmap_types::MergeMode;
    ///
    /// assert!(MergeMode::Xor.apply(true, false));
    /// assert!(!MergeMode::Nand.apply(true, true));
    /// ```
    #[inline(always)]
    pub fn apply(&self, this: bool, other: bool) -> bool {
        let row = (usize::from(this) << 1) | usize::from(other);
        (self.bits() >> (3 - row)) & 1 == 1
    }

    /// Resolve a cell the other mask does not cover
    ///
    /// Returns `None` when the cell is left unchanged.
    #[inline(always)]
    pub fn apply_uncovered(&self, this: bool) -> Option<bool> {
        match self {
            MergeMode::And => Some(false),
            MergeMode::Nand => Some(true),
            MergeMode::Or | MergeMode::Xor => None,
            MergeMode::Nor | MergeMode::Xnor => Some(!this),
        }
    }
}

/// Entry of a playback sequence
///
/// The integer form used by hosts is `-1` for [`FrameSelect::Blank`] and the
/// frame index otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSelect {
    /// Show nothing for this tick
    Blank,
    /// Show the frame at this index
    Frame(usize),
}

impl FrameSelect {
    /// Convert from the integer form; any negative value other than `-1` is rejected
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            -1 => Some(FrameSelect::Blank),
            i if i >= 0 => Some(FrameSelect::Frame(i as usize)),
            _ => None,
        }
    }

    /// Integer form (`-1` for blank)
    pub fn index(&self) -> i32 {
        match self {
            FrameSelect::Blank => -1,
            FrameSelect::Frame(i) => *i as i32,
        }
    }
}

/// One position of a sparse list
///
/// Frame lists and layer lists may contain holes; a hole is an explicit
/// [`Slot::Empty`] rather than a missing element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot<T> {
    #[default]
    Empty,
    Filled(T),
}

impl<T> Slot<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Slot::Filled(_))
    }

    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Empty => Slot::Empty,
            Slot::Filled(v) => Slot::Filled(v),
        }
    }

    /// Borrow the content, if any
    pub fn filled(&self) -> Option<&T> {
        match self {
            Slot::Empty => None,
            Slot::Filled(v) => Some(v),
        }
    }

    pub fn filled_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Empty => None,
            Slot::Filled(v) => Some(v),
        }
    }
}

impl<T> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Slot::Filled(value)
    }
}

/// Input kinds delivered to bound action handlers
///
/// - **Select**: move focus onto / off an interactive element
/// - **Use**: activate the focused element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Select,
    Use,
}

impl InputKind {
    /// Parse input kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_charmap_types::InputKind;
    ///
    /// assert_eq!(InputKind::from_str("Use"), Some(InputKind::Use));
    /// assert_eq!(InputKind::from_str("hover"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "select" => Some(InputKind::Select),
            "use" => Some(InputKind::Use),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Select => "select",
            InputKind::Use => "use",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_arithmetic() {
        let a = Offset::new(3, -2);
        let b = Offset::new(1, 5);
        assert_eq!(a + b, Offset::new(4, 3));
        assert_eq!(a - b, Offset::new(2, -7));
        assert_eq!(-a, Offset::new(-3, 2));
        assert_eq!(a.scale(2), Offset::new(6, -4));
        assert_eq!(a.with_x(0), Offset::new(0, -2));
        assert_eq!(a.with_y(9), Offset::new(3, 9));
        assert_eq!(a.to_string(), "[3, -2]");
    }

    #[test]
    fn merge_mode_bits_roundtrip_through_truth_tables() {
        for mode in MergeMode::ALL {
            assert_eq!(MergeMode::from_bits(mode.bits()), Some(mode));
            assert_eq!(MergeMode::from_str(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn merge_mode_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for (a, b) in cases {
            assert_eq!(MergeMode::And.apply(a, b), a & b);
            assert_eq!(MergeMode::Or.apply(a, b), a | b);
            assert_eq!(MergeMode::Xor.apply(a, b), a ^ b);
            assert_eq!(MergeMode::Nand.apply(a, b), !(a & b));
            assert_eq!(MergeMode::Nor.apply(a, b), !(a | b));
            assert_eq!(MergeMode::Xnor.apply(a, b), !(a ^ b));
        }
    }

    #[test]
    fn merge_mode_uncovered_policy() {
        assert_eq!(MergeMode::And.apply_uncovered(true), Some(false));
        assert_eq!(MergeMode::Nand.apply_uncovered(false), Some(true));
        assert_eq!(MergeMode::Or.apply_uncovered(true), None);
        assert_eq!(MergeMode::Xor.apply_uncovered(false), None);
        assert_eq!(MergeMode::Nor.apply_uncovered(true), Some(false));
        assert_eq!(MergeMode::Xnor.apply_uncovered(false), Some(true));
    }

    #[test]
    fn frame_select_integer_form() {
        assert_eq!(FrameSelect::from_index(3), Some(FrameSelect::Frame(3)));
        assert_eq!(FrameSelect::from_index(-2), None);
        assert_eq!(FrameSelect::Blank.index(), -1);
        assert_eq!(FrameSelect::Frame(4).index(), 4);
    }
}
