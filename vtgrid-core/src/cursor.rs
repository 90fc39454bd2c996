//! Cursor state management
//!
//! Handles cursor position, the pen used for new characters, and the
//! DECSC/DECRC saved state.

use serde::{Deserialize, Serialize};

use crate::cell::CellAttributes;
use crate::charset::CharsetState;

/// Cursor visual style (DECSCUSR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Block,
    Underline,
    Bar,
}

impl CursorStyle {
    /// Decode a DECSCUSR parameter into (style, blinking)
    pub fn from_decscusr(param: u16) -> Option<(Self, bool)> {
        match param {
            0 | 1 => Some((CursorStyle::Block, true)),
            2 => Some((CursorStyle::Block, false)),
            3 => Some((CursorStyle::Underline, true)),
            4 => Some((CursorStyle::Underline, false)),
            5 => Some((CursorStyle::Bar, true)),
            6 => Some((CursorStyle::Bar, false)),
            _ => None,
        }
    }
}

/// Cursor state of one screen buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// The last column was written and the next printable wraps first
    pub pending_wrap: bool,
    /// Current pen, copied into each printed cell
    pub attrs: CellAttributes,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an absolute position, clamped to `cols` x `rows`
    pub fn move_to(&mut self, col: usize, row: usize, cols: usize, rows: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.row = row.min(rows.saturating_sub(1));
        self.pending_wrap = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Saved cursor state for DECSC/DECRC
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub pending_wrap: bool,
    pub attrs: CellAttributes,
    pub origin_mode: bool,
    pub charset: CharsetState,
}

impl SavedCursor {
    pub fn save(cursor: &Cursor, origin_mode: bool, charset: &CharsetState) -> Self {
        Self {
            col: cursor.col,
            row: cursor.row,
            pending_wrap: cursor.pending_wrap,
            attrs: cursor.attrs,
            origin_mode,
            charset: charset.clone(),
        }
    }

    /// Write position, pen and wrap state back into `cursor`, clamped
    pub fn restore(&self, cursor: &mut Cursor, cols: usize, rows: usize) {
        cursor.move_to(self.col, self.row, cols, rows);
        cursor.pending_wrap = self.pending_wrap && self.col < cols;
        cursor.attrs = self.attrs;
    }
}
