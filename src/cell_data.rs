//! Flat cell representation handed to renderers and foreign callers
//!
//! Every color is resolved to RGB; no palette index or "default" marker
//! crosses this boundary.

use serde::Serialize;
use vtgrid_core::{Cell, CellWidth, Palette, StyleFlags};

/// One resolved grid cell
///
/// `width` is 1 for a normal cell, 2 for the first half of a wide glyph and
/// 0 for its continuation, which also reports codepoint 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CellData {
    pub codepoint: u32,
    pub fg_r: u8,
    pub fg_g: u8,
    pub fg_b: u8,
    pub bg_r: u8,
    pub bg_g: u8,
    pub bg_b: u8,
    /// Bits of [`StyleFlags`]
    pub flags: u8,
    pub width: u8,
}

impl CellData {
    /// Resolve `cell` against `palette`; reverse video flips INVERSE
    pub fn from_cell(cell: &Cell, palette: &Palette, reverse_video: bool) -> Self {
        let fg = palette.foreground_rgb(cell.attrs.fg);
        let bg = palette.background_rgb(cell.attrs.bg);
        let mut flags = cell.attrs.flags;
        if reverse_video {
            flags.toggle(StyleFlags::INVERSE);
        }
        let (codepoint, width) = match cell.width() {
            CellWidth::Narrow => (u32::from(cell.ch()), 1),
            CellWidth::Wide => (u32::from(cell.ch()), 2),
            CellWidth::Continuation => (0, 0),
        };

        Self {
            codepoint,
            fg_r: fg.r,
            fg_g: fg.g,
            fg_b: fg.b,
            bg_r: bg.r,
            bg_g: bg.g,
            bg_b: bg.b,
            flags: flags.bits(),
            width,
        }
    }

    /// An empty cell in the default colors
    pub fn blank(palette: &Palette, reverse_video: bool) -> Self {
        Self::from_cell(&Cell::new(), palette, reverse_video)
    }

    pub fn style(&self) -> StyleFlags {
        StyleFlags::from_bits_truncate(self.flags)
    }

    /// The printed character, if any
    pub fn ch(&self) -> Option<char> {
        char::from_u32(self.codepoint).filter(|&c| c != '\0')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtgrid_core::{CellAttributes, Color, Rgb};

    #[test]
    fn test_default_colors_resolved() {
        let palette = Palette::new(Rgb::new(1, 2, 3), Rgb::new(4, 5, 6));
        let data = CellData::from_cell(&Cell::with_char('a', CellAttributes::default()), &palette, false);

        assert_eq!(data.codepoint, 'a' as u32);
        assert_eq!((data.fg_r, data.fg_g, data.fg_b), (1, 2, 3));
        assert_eq!((data.bg_r, data.bg_g, data.bg_b), (4, 5, 6));
        assert_eq!(data.width, 1);
        assert_eq!(data.ch(), Some('a'));
    }

    #[test]
    fn test_continuation_reports_zero() {
        let mut cell = Cell::new();
        cell.set_continuation(CellAttributes::default());
        let data = CellData::from_cell(&cell, &Palette::default(), false);
        assert_eq!((data.codepoint, data.width), (0, 0));
        assert_eq!(data.ch(), None);
    }

    #[test]
    fn test_reverse_video_flips_inverse() {
        let attrs = CellAttributes {
            fg: Color::rgb(9, 9, 9),
            flags: StyleFlags::INVERSE | StyleFlags::BOLD,
            ..CellAttributes::default()
        };
        let data = CellData::from_cell(&Cell::with_char('x', attrs), &Palette::default(), true);
        assert_eq!(data.style(), StyleFlags::BOLD);
        assert_eq!(data.fg_r, 9);
    }

    #[test]
    fn test_blank() {
        let data = CellData::blank(&Palette::default(), false);
        assert_eq!(data.codepoint, 0);
        assert_eq!((data.fg_r, data.fg_g, data.fg_b), (0xe5, 0xe5, 0xe5));
    }
}
