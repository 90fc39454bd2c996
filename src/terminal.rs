//! Terminal engine
//!
//! Ties together the parser and the screen model: bytes go through the
//! parser, each action is applied to the screen by [`dispatch`], and reads
//! come back out as resolved [`CellData`] rows.

use tracing::debug;
use vtgrid_core::{parse_color_spec, Dimensions, Line, Modes, Palette, Screen, Snapshot};
use vtgrid_parser::{Action, CsiAction, EscAction, OscAction, Parser};

use crate::cell_data::CellData;
use crate::config::TerminalConfig;
use crate::error::{Error, Result};
use crate::sgr::apply_sgr;

/// A headless terminal: one parser feeding one screen
#[derive(Debug, Clone)]
pub struct Terminal {
    screen: Screen,
    parser: Parser,
}

impl Terminal {
    /// Create a terminal with the default configuration
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        Self::with_config(cols, rows, &TerminalConfig::default())
    }

    pub fn with_config(cols: usize, rows: usize, config: &TerminalConfig) -> Result<Self> {
        check_dimensions(cols, rows)?;
        config.validate()?;
        let screen = Screen::try_new(
            Dimensions::new(cols, rows),
            config.scrollback_limit,
            config.palette(),
        )?;
        Ok(Self {
            screen,
            parser: Parser::new(),
        })
    }

    /// Feed bytes from the application; partial sequences carry over
    pub fn write(&mut self, bytes: &[u8]) {
        let screen = &mut self.screen;
        self.parser.parse(bytes, |action| dispatch(screen, action));
    }

    /// Resize; on error the terminal is unchanged
    pub fn resize(&mut self, cols: usize, rows: usize) -> Result<()> {
        check_dimensions(cols, rows)?;
        self.screen.resize(Dimensions::new(cols, rows))?;
        Ok(())
    }

    pub fn cols(&self) -> usize {
        self.screen.cols()
    }

    pub fn rows(&self) -> usize {
        self.screen.rows()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.screen.dimensions()
    }

    pub fn cursor_x(&self) -> usize {
        self.screen.cursor().col
    }

    pub fn cursor_y(&self) -> usize {
        self.screen.cursor().row
    }

    pub fn cursor_visible(&self) -> bool {
        self.screen.modes().cursor_visible
    }

    /// Exactly `cols` resolved cells of visible row `y`
    pub fn line(&self, y: usize) -> Result<Vec<CellData>> {
        let line = self.visible_line(y)?;
        Ok(self.export(line).collect())
    }

    /// Fill `out` with visible row `y`; returns the number of cells written
    pub fn line_into(&self, y: usize, out: &mut [CellData]) -> Result<usize> {
        let line = self.visible_line(y)?;
        let cols = self.cols();
        if out.len() < cols {
            return Err(Error::BufferTooSmall {
                needed: cols,
                got: out.len(),
            });
        }
        for (slot, data) in out.iter_mut().zip(self.export(line)) {
            *slot = data;
        }
        Ok(cols)
    }

    /// Text of visible row `y`, trailing blanks trimmed
    pub fn line_text(&self, y: usize) -> Result<String> {
        Ok(self.visible_line(y)?.text())
    }

    pub fn scrollback_len(&self) -> usize {
        self.screen.scrollback().len()
    }

    /// Historical row `index` (0 = oldest), padded or cut to `cols` cells
    pub fn scrollback_line(&self, index: usize) -> Result<Vec<CellData>> {
        let scrollback = self.screen.scrollback();
        let line = scrollback
            .get(index)
            .ok_or(Error::ScrollbackOutOfRange {
                index,
                len: scrollback.len(),
            })?;
        let blank = CellData::blank(self.palette(), self.reverse_video());
        let mut cells: Vec<CellData> = self.export(line).take(self.cols()).collect();
        cells.resize(self.cols(), blank);
        Ok(cells)
    }

    /// Whether any row changed since the last [`clear_dirty`](Self::clear_dirty)
    pub fn is_dirty(&self) -> bool {
        self.screen.is_dirty()
    }

    pub fn is_row_dirty(&self, y: usize) -> Result<bool> {
        self.check_row(y)?;
        Ok(self.screen.is_row_dirty(y))
    }

    pub fn clear_dirty(&mut self) {
        self.screen.clear_dirty();
    }

    pub fn title(&self) -> &str {
        self.screen.title()
    }

    pub fn icon_name(&self) -> &str {
        self.screen.icon_name()
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.screen.is_alternate_screen()
    }

    pub fn modes(&self) -> &Modes {
        self.screen.modes()
    }

    pub fn palette(&self) -> &Palette {
        self.screen.palette()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn snapshot(&self, include_scrollback: bool) -> Snapshot {
        self.screen.snapshot(include_scrollback)
    }

    fn reverse_video(&self) -> bool {
        self.screen.modes().reverse_video
    }

    fn check_row(&self, y: usize) -> Result<()> {
        let rows = self.rows();
        if y >= rows {
            return Err(Error::RowOutOfRange { row: y, rows });
        }
        Ok(())
    }

    fn visible_line(&self, y: usize) -> Result<&Line> {
        self.check_row(y)?;
        Ok(self.screen.line(y))
    }

    fn export<'a>(&'a self, line: &'a Line) -> impl Iterator<Item = CellData> + 'a {
        let palette = self.palette();
        let reverse = self.reverse_video();
        line.iter()
            .map(move |cell| CellData::from_cell(cell, palette, reverse))
    }
}

fn check_dimensions(cols: usize, rows: usize) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Err(Error::InvalidDimensions { cols, rows });
    }
    Ok(())
}

/// Apply one parsed action to the screen
pub fn dispatch(screen: &mut Screen, action: Action) {
    match action {
        Action::Print(c) => screen.print(c),
        Action::Execute(byte) => execute_control(screen, byte),
        Action::CsiDispatch(csi) => execute_csi(screen, &csi),
        Action::EscDispatch(esc) => execute_esc(screen, esc),
        Action::OscDispatch(osc) => execute_osc(screen, osc),
        Action::DcsDispatch(dcs) => {
            debug!(
                "Ignoring DCS {} ({} bytes)",
                dcs.final_byte as char,
                dcs.data.len()
            );
        }
        Action::StringDispatch { kind, data } => {
            debug!("Ignoring {:?} string ({} bytes)", kind, data.len());
        }
    }
}

/// Execute a C0 control character
fn execute_control(screen: &mut Screen, byte: u8) {
    match byte {
        0x07 => debug!("Bell"),
        0x08 => screen.backspace(),
        0x09 => screen.tab(1),
        // LF, VT, FF
        0x0A..=0x0C => screen.linefeed(),
        0x0D => screen.carriage_return(),
        0x0E => screen.shift_out(),
        0x0F => screen.shift_in(),
        _ => tracing::trace!("Ignoring control 0x{:02x}", byte),
    }
}

fn execute_csi(screen: &mut Screen, csi: &CsiAction) {
    match (csi.marker, csi.intermediates.as_slice()) {
        (0, []) => {}
        (b'?', []) => return execute_csi_private(screen, csi),
        (0, [b'!']) if csi.final_byte == b'p' => return screen.soft_reset(),
        (0, [b' ']) if csi.final_byte == b'q' => {
            return screen.set_cursor_style(csi.params.raw(0))
        }
        _ => {
            debug!(
                "Unhandled CSI: marker={:?} intermediates={:?} final={}",
                csi.marker as char, csi.intermediates, csi.final_byte as char
            );
            return;
        }
    }

    let n = usize::from(csi.param(0, 1));
    match csi.final_byte {
        b'@' => screen.insert_chars(n),
        b'A' => screen.move_cursor_up(n),
        // CUD, VPR
        b'B' | b'e' => screen.move_cursor_down(n),
        // CUF, HPR
        b'C' | b'a' => screen.move_cursor_right(n),
        b'D' => screen.move_cursor_left(n),
        b'E' => {
            screen.move_cursor_down(n);
            screen.carriage_return();
        }
        b'F' => {
            screen.move_cursor_up(n);
            screen.carriage_return();
        }
        // CHA, HPA
        b'G' | b'`' => screen.set_cursor_col(n),
        b'H' | b'f' => {
            let row = usize::from(csi.param(0, 1));
            let col = usize::from(csi.param(1, 1));
            screen.move_cursor_to(row, col);
        }
        b'I' => screen.tab(n),
        b'J' => screen.erase_display(csi.params.raw(0)),
        b'K' => screen.erase_line(csi.params.raw(0)),
        b'L' => screen.insert_lines(n),
        b'M' => screen.delete_lines(n),
        b'P' => screen.delete_chars(n),
        b'S' => screen.scroll_up(n),
        // More than one parameter is xterm mouse highlight tracking
        b'T' if csi.params.len() <= 1 => screen.scroll_down(n),
        b'X' => screen.erase_chars(n),
        b'Z' => screen.back_tab(n),
        b'b' => screen.repeat_last(n),
        b'c' => debug!("Ignoring device attributes request"),
        b'd' => screen.set_cursor_row(n),
        b'g' => screen.clear_tab_stop(csi.params.raw(0)),
        b'h' => csi.params.iter().for_each(|mode| screen.set_ansi_mode(mode, true)),
        b'l' => csi.params.iter().for_each(|mode| screen.set_ansi_mode(mode, false)),
        b'm' => apply_sgr(screen.pen_mut(), &csi.params),
        b'n' => debug!("Ignoring device status report {}", csi.params.raw(0)),
        b'r' => screen.set_scroll_region(
            usize::from(csi.params.raw(0)),
            usize::from(csi.params.raw(1)),
        ),
        // SCOSC/SCORC
        b's' => screen.save_cursor(),
        b'u' => screen.restore_cursor(),
        _ => debug!(
            "Unhandled CSI: params={:?} final={}",
            csi.params,
            csi.final_byte as char
        ),
    }
}

/// `CSI ? ...` sequences
fn execute_csi_private(screen: &mut Screen, csi: &CsiAction) {
    match csi.final_byte {
        b'h' => csi.params.iter().for_each(|mode| screen.set_dec_mode(mode, true)),
        b'l' => csi.params.iter().for_each(|mode| screen.set_dec_mode(mode, false)),
        b's' => screen.save_dec_modes(&csi.params.iter().collect::<Vec<_>>()),
        b'r' => screen.restore_dec_modes(&csi.params.iter().collect::<Vec<_>>()),
        // DECSED/DECSEL, no protected cells so plain erase
        b'J' => screen.erase_display(csi.params.raw(0)),
        b'K' => screen.erase_line(csi.params.raw(0)),
        _ => debug!(
            "Unhandled private CSI: params={:?} final={}",
            csi.params,
            csi.final_byte as char
        ),
    }
}

fn execute_esc(screen: &mut Screen, esc: EscAction) {
    match esc {
        EscAction::SaveCursor => screen.save_cursor(),
        EscAction::RestoreCursor => screen.restore_cursor(),
        EscAction::Index => screen.index(),
        EscAction::ReverseIndex => screen.reverse_index(),
        EscAction::NextLine => screen.next_line(),
        EscAction::HorizontalTabSet => screen.set_tab_stop(),
        EscAction::FullReset => screen.full_reset(),
        EscAction::ApplicationKeypad => screen.modes_mut().application_keypad = true,
        EscAction::NormalKeypad => screen.modes_mut().application_keypad = false,
        EscAction::SingleShift2 => screen.single_shift(2),
        EscAction::SingleShift3 => screen.single_shift(3),
        EscAction::Designate { slot, charset } => screen.designate_charset(slot, charset),
        EscAction::DecAlignmentTest => screen.screen_alignment_test(),
        EscAction::Unknown {
            intermediates,
            final_byte,
        } => debug!(
            "Unknown ESC sequence: intermediates={:?} final={}",
            intermediates, final_byte as char
        ),
    }
}

fn execute_osc(screen: &mut Screen, osc: OscAction) {
    match osc {
        OscAction::SetIconAndTitle(text) => {
            screen.set_icon_name(&text);
            screen.set_title(&text);
        }
        OscAction::SetIconName(name) => screen.set_icon_name(&name),
        OscAction::SetTitle(title) => screen.set_title(&title),
        OscAction::SetPaletteColors(entries) => {
            for (index, spec) in entries {
                match parse_color_spec(&spec) {
                    Some(rgb) => screen.palette_mut().set(index, rgb),
                    None => debug!("Ignoring color spec {:?} for index {}", spec, index),
                }
            }
        }
        // Default colors resolve at read time, so every row renders differently
        OscAction::SetDefaultForeground(spec) => {
            if let Some(rgb) = parse_color_spec(&spec) {
                screen.palette_mut().set_foreground(rgb);
                screen.mark_all_dirty();
            }
        }
        OscAction::SetDefaultBackground(spec) => {
            if let Some(rgb) = parse_color_spec(&spec) {
                screen.palette_mut().set_background(rgb);
                screen.mark_all_dirty();
            }
        }
        OscAction::ResetPaletteColors(indices) => {
            let palette = screen.palette_mut();
            match indices {
                Some(indices) => indices.into_iter().for_each(|index| palette.reset(index)),
                None => (0..=u8::MAX).for_each(|index| palette.reset(index)),
            }
        }
        OscAction::ResetDefaultForeground => {
            screen.palette_mut().reset_foreground();
            screen.mark_all_dirty();
        }
        OscAction::ResetDefaultBackground => {
            screen.palette_mut().reset_background();
            screen.mark_all_dirty();
        }
        OscAction::Unknown { command, data } => {
            debug!("Unknown OSC {}: {} bytes", command, data.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtgrid_core::{Rgb, StyleFlags};

    fn term(cols: usize, rows: usize) -> Terminal {
        Terminal::new(cols, rows).unwrap()
    }

    #[test]
    fn test_terminal_print() {
        let mut term = term(80, 24);
        term.write(b"Hello, World!");
        assert_eq!(term.line_text(0).unwrap(), "Hello, World!");
        assert_eq!(term.cursor_x(), 13);
    }

    #[test]
    fn test_terminal_invalid_dimensions() {
        assert!(matches!(
            Terminal::new(0, 24),
            Err(Error::InvalidDimensions { cols: 0, rows: 24 })
        ));
        let mut term = term(10, 5);
        assert!(term.resize(10, 0).is_err());
        assert_eq!(term.dimensions(), Dimensions::new(10, 5));
    }

    #[test]
    fn test_terminal_cursor_movement() {
        let mut term = term(80, 24);
        term.write(b"\x1b[10;20H");
        assert_eq!((term.cursor_x(), term.cursor_y()), (19, 9));
        term.write(b"\x1b[5A\x1b[3D");
        assert_eq!((term.cursor_x(), term.cursor_y()), (16, 4));
        term.write(b"\x1b[2E");
        assert_eq!((term.cursor_x(), term.cursor_y()), (0, 6));
        term.write(b"\x1b[40G\x1b[3d");
        assert_eq!((term.cursor_x(), term.cursor_y()), (39, 2));
    }

    #[test]
    fn test_terminal_colors() {
        let mut term = term(80, 24);
        term.write(b"\x1b[31mR\x1b[0mN");
        let line = term.line(0).unwrap();
        assert_eq!((line[0].fg_r, line[0].fg_g, line[0].fg_b), (205, 0, 0));
        assert_eq!((line[1].fg_r, line[1].fg_g, line[1].fg_b), (0xe5, 0xe5, 0xe5));
    }

    #[test]
    fn test_terminal_truecolor() {
        let mut term = term(80, 24);
        term.write(b"\x1b[38;2;255;128;64;48;2;1;2;3mX");
        let cell = term.line(0).unwrap()[0];
        assert_eq!((cell.fg_r, cell.fg_g, cell.fg_b), (255, 128, 64));
        assert_eq!((cell.bg_r, cell.bg_g, cell.bg_b), (1, 2, 3));
    }

    #[test]
    fn test_terminal_sgr_reset() {
        let mut term = term(80, 24);
        term.write(b"\x1b[1;4;7;32;44mA\x1b[0mB");
        let line = term.line(0).unwrap();
        assert!(line[0].style().contains(StyleFlags::BOLD | StyleFlags::INVERSE));
        assert_eq!(line[1].flags, 0);
        assert_eq!(line[1], CellData { codepoint: 'B' as u32, ..CellData::blank(term.palette(), false) });
    }

    #[test]
    fn test_terminal_erase() {
        let mut term = term(10, 3);
        term.write(b"0123456789\x1b[1;5H\x1b[K");
        assert_eq!(term.line_text(0).unwrap(), "0123");
        term.write(b"\x1b[2J");
        assert_eq!(term.line_text(0).unwrap(), "");
    }

    #[test]
    fn test_terminal_scroll_region() {
        let mut term = term(10, 5);
        term.write(b"A\r\nB\r\nC\r\nD\r\nE");
        term.write(b"\x1b[2;4r\x1b[4;1H\n");
        let rows: Vec<String> = (0..5).map(|y| term.line_text(y).unwrap()).collect();
        assert_eq!(rows, vec!["A", "C", "D", "", "E"]);
        assert_eq!(term.scrollback_len(), 0);
    }

    #[test]
    fn test_terminal_alternate_screen() {
        let mut term = term(10, 3);
        term.write(b"main");
        term.write(b"\x1b[?1049h");
        assert!(term.is_alternate_screen());
        assert_eq!(term.line_text(0).unwrap(), "");
        term.write(b"alt");
        term.write(b"\x1b[?1049l");
        assert!(!term.is_alternate_screen());
        assert_eq!(term.line_text(0).unwrap(), "main");
        assert_eq!(term.cursor_x(), 4);
    }

    #[test]
    fn test_terminal_bracketed_paste() {
        let mut term = term(80, 24);
        assert!(!term.modes().bracketed_paste);
        term.write(b"\x1b[?2004h");
        assert!(term.modes().bracketed_paste);
        term.write(b"\x1b[?2004l");
        assert!(!term.modes().bracketed_paste);
    }

    #[test]
    fn test_terminal_cursor_visibility() {
        let mut term = term(80, 24);
        term.write(b"\x1b[?25l");
        assert!(!term.cursor_visible());
        term.write(b"\x1b[?25h");
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_terminal_title() {
        let mut term = term(80, 24);
        term.write(b"\x1b]0;My Title\x07");
        assert_eq!(term.title(), "My Title");
        assert_eq!(term.icon_name(), "My Title");
        term.write(b"\x1b]2;Other\x1b\\");
        assert_eq!(term.title(), "Other");
    }

    #[test]
    fn test_terminal_insert_delete_lines() {
        let mut term = term(10, 4);
        term.write(b"1\r\n2\r\n3\r\n4");
        term.write(b"\x1b[2;1H\x1b[L");
        let rows: Vec<String> = (0..4).map(|y| term.line_text(y).unwrap()).collect();
        assert_eq!(rows, vec!["1", "", "2", "3"]);
        term.write(b"\x1b[2M");
        let rows: Vec<String> = (0..4).map(|y| term.line_text(y).unwrap()).collect();
        assert_eq!(rows, vec!["1", "3", "", ""]);
    }

    #[test]
    fn test_terminal_osc_palette() {
        let mut term = term(10, 2);
        term.write(b"\x1b]4;1;rgb:12/34/56\x07\x1b[31mA");
        assert_eq!(term.palette().get(1), Rgb::new(0x12, 0x34, 0x56));
        let cell = term.line(0).unwrap()[0];
        assert_eq!((cell.fg_r, cell.fg_g, cell.fg_b), (0x12, 0x34, 0x56));

        // Not retroactive
        term.write(b"\x1b]104;1\x07");
        assert_eq!(term.palette().get(1), Rgb::new(205, 0, 0));
        let cell = term.line(0).unwrap()[0];
        assert_eq!(cell.fg_r, 0x12);
    }

    #[test]
    fn test_terminal_osc_reset_invalid_index_keeps_palette() {
        let mut term = term(10, 2);
        term.write(b"\x1b]4;1;#010203;2;#040506\x07");
        term.write(b"\x1b]104;999\x07");
        assert_eq!(term.palette().get(1), Rgb::new(1, 2, 3));
        assert_eq!(term.palette().get(2), Rgb::new(4, 5, 6));

        term.write(b"\x1b]104\x07");
        assert_eq!(term.palette().get(1), Rgb::new(205, 0, 0));
        assert_eq!(term.palette().get(2), Rgb::new(0, 205, 0));
    }

    #[test]
    fn test_terminal_osc_default_colors() {
        let mut term = term(10, 2);
        term.write(b"A");
        term.clear_dirty();
        term.write(b"\x1b]11;#102030\x1b\\");
        assert!(term.is_row_dirty(1).unwrap());
        let cell = term.line(0).unwrap()[0];
        assert_eq!((cell.bg_r, cell.bg_g, cell.bg_b), (0x10, 0x20, 0x30));

        term.write(b"\x1b]111\x07");
        assert_eq!(term.palette().background(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_terminal_line_into() {
        let mut term = term(4, 2);
        term.write(b"ab");
        let mut buf = [CellData::default(); 6];
        assert_eq!(term.line_into(0, &mut buf).unwrap(), 4);
        assert_eq!(buf[1].ch(), Some('b'));
        assert_eq!(buf[4], CellData::default());

        let mut small = [CellData::default(); 3];
        assert!(matches!(
            term.line_into(0, &mut small),
            Err(Error::BufferTooSmall { needed: 4, got: 3 })
        ));
        assert!(matches!(
            term.line_into(2, &mut buf),
            Err(Error::RowOutOfRange { row: 2, rows: 2 })
        ));
    }

    #[test]
    fn test_terminal_scrollback_line() {
        let mut term = term(4, 2);
        term.write(b"abcd\r\nef\r\ngh");
        assert_eq!(term.scrollback_len(), 1);
        let line = term.scrollback_line(0).unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(line[3].ch(), Some('d'));

        term.resize(6, 2).unwrap();
        let line = term.scrollback_line(0).unwrap();
        assert_eq!(line.len(), 6);
        assert_eq!(line[5].ch(), None);

        assert!(matches!(
            term.scrollback_line(1),
            Err(Error::ScrollbackOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_terminal_wide_cells() {
        let mut term = term(10, 2);
        term.write("中x".as_bytes());
        let line = term.line(0).unwrap();
        assert_eq!((line[0].codepoint, line[0].width), ('中' as u32, 2));
        assert_eq!((line[1].codepoint, line[1].width), (0, 0));
        assert_eq!(line[2].ch(), Some('x'));
    }

    #[test]
    fn test_terminal_reverse_video() {
        let mut term = term(10, 2);
        term.write(b"A");
        term.clear_dirty();
        term.write(b"\x1b[?5h");
        assert!(term.is_row_dirty(1).unwrap());
        assert!(term.line(0).unwrap()[0].style().contains(StyleFlags::INVERSE));
    }

    #[test]
    fn test_terminal_charset() {
        let mut term = term(10, 2);
        term.write(b"\x1b(0qx\x1b(Bq");
        assert_eq!(term.line_text(0).unwrap(), "─│q");
        term.write(b"\r\n\x1b)0\x0eq\x0fq");
        assert_eq!(term.line_text(1).unwrap(), "─q");
    }

    #[test]
    fn test_terminal_repeat() {
        let mut term = term(10, 2);
        term.write(b"-\x1b[4b");
        assert_eq!(term.line_text(0).unwrap(), "-----");
    }

    #[test]
    fn test_terminal_decscusr() {
        let mut term = term(10, 2);
        term.write(b"\x1b[6 q");
        assert_eq!(term.screen().cursor_style(), vtgrid_core::CursorStyle::Bar);
        assert!(!term.modes().cursor_blink);
    }

    #[test]
    fn test_terminal_soft_reset() {
        let mut term = term(10, 4);
        term.write(b"\x1b[1mA\x1b[2;3r\x1b[4h\x1b[!p");
        assert_eq!(term.screen().scroll_region(), (0, 3));
        assert!(!term.modes().insert_mode);
        assert!(term.screen().pen().flags.is_empty());
        assert_eq!(term.line_text(0).unwrap(), "A");
    }

    #[test]
    fn test_terminal_full_reset() {
        let mut term = term(10, 2);
        term.write(b"\x1b]2;t\x07abc\r\n\r\n\x1b[?25l\x1bc");
        assert_eq!(term.line_text(0).unwrap(), "");
        assert_eq!(term.title(), "");
        assert_eq!(term.scrollback_len(), 0);
        assert!(term.cursor_visible());
        term.write(b"x");
        assert_eq!(term.line_text(0).unwrap(), "x");
    }

    #[test]
    fn test_terminal_xtsave_restore() {
        let mut term = term(10, 2);
        term.write(b"\x1b[?7s\x1b[?7l");
        assert!(!term.modes().auto_wrap);
        term.write(b"\x1b[?7r");
        assert!(term.modes().auto_wrap);
    }

    #[test]
    fn test_terminal_c1_controls() {
        let mut term = term(10, 3);
        term.write("\u{9b}2;3Hx".as_bytes());
        assert_eq!((term.cursor_x(), term.cursor_y()), (3, 1));
        term.write("\u{84}".as_bytes());
        assert_eq!(term.cursor_y(), 2);
    }

    #[test]
    fn test_terminal_dcs_and_apc_ignored() {
        let mut term = term(10, 2);
        term.write(b"\x1bP1$r0m\x1b\\\x1b_payload\x1b\\ok");
        assert_eq!(term.line_text(0).unwrap(), "ok");
    }

    #[test]
    fn test_terminal_with_config() {
        let config = TerminalConfig {
            scrollback_limit: 2,
            foreground: Rgb::new(1, 1, 1),
            ..TerminalConfig::default()
        };
        let mut term = Terminal::with_config(4, 1, &config).unwrap();
        term.write(b"a\nb\nc\nd");
        assert_eq!(term.scrollback_len(), 2);
        assert_eq!(term.line(0).unwrap()[0].fg_r, 1);
    }
}
