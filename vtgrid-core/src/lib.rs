//! vtgrid core - platform-independent terminal screen model
//!
//! This crate provides the screen state a VT-style terminal interprets
//! parsed actions into:
//! - Grid of cells carrying characters, combining marks and attributes
//! - Per-buffer cursors for the primary and alternate screens
//! - Bounded scrollback history
//! - Mode flags, palette and per-row dirty tracking
//!
//! Given the same sequence of operations the screen always ends up in the
//! same state.

mod cell;
mod charset;
mod color;
mod cursor;
mod dirty;
mod grid;
mod line;
mod modes;
mod screen;
mod scrollback;
mod snapshot;

pub use cell::{char_width, Cell, CellAttributes, CellWidth, StyleFlags, MAX_COMBINING};
pub use charset::{Charset, CharsetState};
pub use color::{
    parse_color_spec, xterm_color, Color, Palette, ParseColorError, Rgb, DEFAULT_BACKGROUND,
    DEFAULT_FOREGROUND,
};
pub use cursor::{Cursor, CursorStyle, SavedCursor};
pub use dirty::DirtyRows;
pub use grid::Grid;
pub use line::Line;
pub use modes::Modes;
pub use screen::{Screen, MAX_TITLE_LEN};
pub use scrollback::{Scrollback, DEFAULT_SCROLLBACK_LIMIT};
pub use snapshot::{
    Snapshot, SnapshotAttrSpan, SnapshotCursor, SnapshotDimensions, SnapshotLine, SnapshotModes,
};

/// Terminal dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Dimensions {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_default() {
        let dims = Dimensions::default();
        assert_eq!(dims.cols, 80);
        assert_eq!(dims.rows, 24);
    }
}
