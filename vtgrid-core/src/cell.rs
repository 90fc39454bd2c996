//! Terminal cell representation
//!
//! Each cell in the terminal grid contains:
//! - A base character (or nothing) plus any combining marks
//! - Display attributes (colors and style flags)
//! - A width class tying wide glyphs to their continuation column

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::color::Color;

/// Combining marks kept per cell; further marks are dropped
pub const MAX_COMBINING: usize = 16;

bitflags! {
    /// Style flags, laid out as exported to consumers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StyleFlags: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const INVERSE = 1 << 4;
        const INVISIBLE = 1 << 5;
        const BLINK = 1 << 6;
        const FAINT = 1 << 7;
    }
}

/// Attributes that affect how a cell is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellAttributes {
    pub fg: Color,
    pub bg: Color,
    /// Underline color (SGR 58)
    pub underline_color: Color,
    pub flags: StyleFlags,
}

impl CellAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all attributes to default (SGR 0)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Attributes for cells cleared by erase/scroll: only the background survives
    pub fn erased(&self) -> Self {
        Self {
            bg: self.bg,
            ..Self::default()
        }
    }
}

/// How many columns a cell's glyph covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellWidth {
    #[default]
    Narrow,
    /// First column of a double-width glyph
    Wide,
    /// Placeholder to the right of a wide glyph
    Continuation,
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Base character, '\0' when empty
    ch: char,
    /// Zero-width marks drawn over the base character
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    combining: Vec<char>,
    pub attrs: CellAttributes,
    width: CellWidth,
}

impl Cell {
    /// Create a new empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cell carrying the given attributes
    pub fn blank(attrs: CellAttributes) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    /// Create a narrow cell holding `c`
    pub fn with_char(c: char, attrs: CellAttributes) -> Self {
        Self {
            ch: c,
            combining: Vec::new(),
            attrs,
            width: CellWidth::Narrow,
        }
    }

    /// Overwrite this cell with a new glyph
    pub fn set(&mut self, c: char, attrs: CellAttributes, width: CellWidth) {
        self.ch = c;
        self.combining.clear();
        self.attrs = attrs;
        self.width = width;
    }

    /// Turn this cell into the right half of a wide glyph
    pub fn set_continuation(&mut self, attrs: CellAttributes) {
        self.set('\0', attrs, CellWidth::Continuation);
    }

    /// Attach a combining mark; returns false if the cell has no base or is full
    pub fn push_combining(&mut self, c: char) -> bool {
        if self.ch == '\0' || self.combining.len() >= MAX_COMBINING {
            return false;
        }
        self.combining.push(c);
        true
    }

    /// Base character ('\0' for empty and continuation cells)
    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn combining(&self) -> &[char] {
        &self.combining
    }

    /// Get the display character (space if empty)
    pub fn display_char(&self) -> char {
        if self.ch == '\0' {
            ' '
        } else {
            self.ch
        }
    }

    /// Check if cell holds no glyph
    pub fn is_empty(&self) -> bool {
        self.ch == '\0' || self.ch == ' '
    }

    pub fn width(&self) -> CellWidth {
        self.width
    }

    pub fn is_wide(&self) -> bool {
        self.width == CellWidth::Wide
    }

    pub fn is_continuation(&self) -> bool {
        self.width == CellWidth::Continuation
    }

    /// Clear the cell (reset to empty with given attributes)
    pub fn clear(&mut self, attrs: CellAttributes) {
        self.set('\0', attrs, CellWidth::Narrow);
    }

    /// Append the cell's text (base plus marks) to `out`
    pub fn push_text(&self, out: &mut String) {
        out.push(self.display_char());
        out.extend(self.combining.iter());
    }
}

/// Display width of a printable character: 0, 1 or 2 columns
pub fn char_width(c: char) -> usize {
    match c.width() {
        Some(0) => 0,
        Some(2) => 2,
        _ => 1,
    }
}
