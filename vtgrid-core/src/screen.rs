//! Terminal screen - the main interface for terminal state
//!
//! The Screen ties together the primary and alternate buffers (each with its
//! own grid and cursor), scrollback, modes, palette and dirty tracking. Every
//! mutation that touches cells marks the affected rows dirty.

use std::collections::{BTreeMap, TryReserveError};

use crate::cell::{char_width, CellAttributes, CellWidth};
use crate::charset::{Charset, CharsetState};
use crate::color::Palette;
use crate::cursor::{Cursor, CursorStyle, SavedCursor};
use crate::dirty::DirtyRows;
use crate::grid::Grid;
use crate::line::Line;
use crate::modes::Modes;
use crate::scrollback::Scrollback;
use crate::snapshot::Snapshot;
use crate::Dimensions;

/// Tab stop interval (default)
const DEFAULT_TAB_WIDTH: usize = 8;
/// Longest title or icon name kept, in characters
pub const MAX_TITLE_LEN: usize = 4096;

/// One of the two screen buffers
#[derive(Debug, Clone)]
struct Buffer {
    grid: Grid,
    cursor: Cursor,
    saved: Option<SavedCursor>,
}

impl Buffer {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            cursor: Cursor::new(),
            saved: None,
        }
    }
}

/// The complete terminal screen state
#[derive(Debug, Clone)]
pub struct Screen {
    primary: Buffer,
    /// Alternate screen (for full-screen apps), never feeds scrollback
    alternate: Buffer,
    using_alternate: bool,
    scrollback: Scrollback,
    dirty: DirtyRows,
    modes: Modes,
    /// DEC private modes stashed by XTSAVE
    saved_modes: BTreeMap<u16, bool>,
    /// Scroll region, 0-indexed and inclusive
    scroll_top: usize,
    scroll_bottom: usize,
    tab_stops: Vec<bool>,
    charset: CharsetState,
    palette: Palette,
    cursor_style: CursorStyle,
    title: String,
    icon_name: String,
    /// Last printed graphic character, for REP
    last_printed: Option<char>,
    /// (row, col) of the last base cell written
    last_base: Option<(usize, usize)>,
}

impl Screen {
    /// Create a screen with default scrollback and palette
    pub fn new(dims: Dimensions) -> Self {
        Self::from_grids(
            Grid::new(dims),
            Grid::new(dims),
            Scrollback::default(),
            Palette::default(),
        )
    }

    /// Create a screen, reporting allocation failure of the grids
    pub fn try_new(
        dims: Dimensions,
        scrollback_limit: usize,
        palette: Palette,
    ) -> Result<Self, TryReserveError> {
        let primary = Grid::try_new(dims)?;
        let alternate = Grid::try_new(dims)?;
        Ok(Self::from_grids(
            primary,
            alternate,
            Scrollback::new(scrollback_limit),
            palette,
        ))
    }

    fn from_grids(primary: Grid, alternate: Grid, scrollback: Scrollback, palette: Palette) -> Self {
        let dims = primary.dimensions();
        Self {
            primary: Buffer::new(primary),
            alternate: Buffer::new(alternate),
            using_alternate: false,
            scrollback,
            dirty: DirtyRows::new(dims.rows),
            modes: Modes::new(),
            saved_modes: BTreeMap::new(),
            scroll_top: 0,
            scroll_bottom: dims.rows.saturating_sub(1),
            tab_stops: default_tab_stops(dims.cols),
            charset: CharsetState::new(),
            palette,
            cursor_style: CursorStyle::default(),
            title: String::new(),
            icon_name: String::new(),
            last_printed: None,
            last_base: None,
        }
    }

    fn active(&self) -> &Buffer {
        if self.using_alternate {
            &self.alternate
        } else {
            &self.primary
        }
    }

    fn active_mut(&mut self) -> &mut Buffer {
        if self.using_alternate {
            &mut self.alternate
        } else {
            &mut self.primary
        }
    }

    /// Get the current grid (primary or alternate)
    pub fn grid(&self) -> &Grid {
        &self.active().grid
    }

    pub fn line(&self, row: usize) -> &Line {
        self.grid().line(row)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.grid().dimensions()
    }

    pub fn cols(&self) -> usize {
        self.grid().cols()
    }

    pub fn rows(&self) -> usize {
        self.grid().rows()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.active().cursor
    }

    /// The pen applied to newly printed cells
    pub fn pen(&self) -> &CellAttributes {
        &self.active().cursor.attrs
    }

    pub fn pen_mut(&mut self) -> &mut CellAttributes {
        &mut self.active_mut().cursor.attrs
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut Modes {
        &mut self.modes
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.using_alternate
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.chars().take(MAX_TITLE_LEN).collect();
    }

    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn set_icon_name(&mut self, name: &str) {
        self.icon_name = name.chars().take(MAX_TITLE_LEN).collect();
    }

    /// Scroll region bounds (top, bottom), 0-indexed and inclusive
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    pub fn dirty_rows(&self) -> &DirtyRows {
        &self.dirty
    }

    pub fn is_row_dirty(&self, row: usize) -> bool {
        self.dirty.is_dirty(row)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Flag every row, e.g. after a change that affects how all cells render
    pub fn mark_all_dirty(&mut self) {
        self.dirty.mark_all();
    }

    /// Pen with indexed colors resolved through the palette
    fn resolved_pen(&self) -> CellAttributes {
        let pen = self.active().cursor.attrs;
        CellAttributes {
            fg: self.palette.resolve(pen.fg),
            bg: self.palette.resolve(pen.bg),
            underline_color: self.palette.resolve(pen.underline_color),
            flags: pen.flags,
        }
    }

    fn erase_attrs(&self) -> CellAttributes {
        self.resolved_pen().erased()
    }

    /// Print a character at the current cursor position
    pub fn print(&mut self, c: char) {
        let c = self.charset.translate(c);
        self.put_char(c);
    }

    fn put_char(&mut self, c: char) {
        let width = char_width(c);
        if width == 0 {
            self.combine(c);
            return;
        }

        let cols = self.cols();
        if width > cols {
            log::trace!("Dropping {:?}, wider than the screen", c);
            return;
        }

        let auto_wrap = self.modes.auto_wrap;
        if auto_wrap && self.cursor().pending_wrap {
            self.wrap();
        }

        // A wide glyph never straddles the right margin
        if width == 2 && self.cursor().col + 1 >= cols {
            if auto_wrap {
                let erase = self.erase_attrs();
                let row = self.cursor().row;
                let line = self.active_mut().grid.line_mut(row);
                line.clear_wide_pair_at(cols - 1, erase);
                line.cell_mut(cols - 1).clear(erase);
                self.dirty.mark(row);
                self.wrap();
            } else {
                self.active_mut().cursor.col = cols - 2;
            }
        }

        let attrs = self.resolved_pen();
        let erase = attrs.erased();
        let insert = self.modes.insert_mode;
        let buf = self.active_mut();
        let (row, col) = (buf.cursor.row, buf.cursor.col);
        let line = buf.grid.line_mut(row);

        if insert {
            line.insert_cells(col, width, erase);
        }
        line.clear_wide_pair_at(col, erase);
        if width == 2 {
            line.clear_wide_pair_at(col + 1, erase);
            line.cell_mut(col).set(c, attrs, CellWidth::Wide);
            line.cell_mut(col + 1).set_continuation(attrs);
        } else {
            line.cell_mut(col).set(c, attrs, CellWidth::Narrow);
        }

        let next = col + width;
        if next >= cols {
            buf.cursor.col = cols - 1;
            buf.cursor.pending_wrap = auto_wrap;
        } else {
            buf.cursor.col = next;
            buf.cursor.pending_wrap = false;
        }

        self.dirty.mark(row);
        self.last_printed = Some(c);
        self.last_base = Some((row, col));
    }

    /// Attach a zero-width character to the previously printed cell
    fn combine(&mut self, c: char) {
        let cols = self.cols();
        // Without autowrap a print at the right margin leaves the cursor on it
        let held_at_margin = !self.modes.auto_wrap
            && self.last_base == Some((self.cursor().row, cols - 1))
            && self.cursor().col == cols - 1;
        let buf = self.active_mut();
        let row = buf.cursor.row;
        let mut col = buf.cursor.col;
        if !buf.cursor.pending_wrap && !held_at_margin {
            if col == 0 {
                log::trace!("Dropping combining mark {:?} with no base", c);
                return;
            }
            col -= 1;
        }

        let line = buf.grid.line_mut(row);
        if col > 0 && line.cell(col).is_continuation() {
            col -= 1;
        }
        if line.cell_mut(col).push_combining(c) {
            self.dirty.mark(row);
        } else {
            log::trace!("Dropping combining mark {:?} at ({}, {})", c, col, row);
        }
    }

    /// Resolve a pending wrap: mark the row as wrapped and move to the next
    fn wrap(&mut self) {
        let buf = self.active_mut();
        let row = buf.cursor.row;
        buf.grid.line_mut(row).wrapped = true;
        buf.cursor.col = 0;
        buf.cursor.pending_wrap = false;
        self.index();
    }

    /// Repeat the last printed character n times (REP)
    pub fn repeat_last(&mut self, n: usize) {
        let Some(c) = self.last_printed else {
            return;
        };
        let n = n.min(self.cols() * self.rows());
        for _ in 0..n {
            self.put_char(c);
        }
    }

    /// Handle backspace (BS)
    pub fn backspace(&mut self) {
        let cursor = &mut self.active_mut().cursor;
        cursor.col = cursor.col.saturating_sub(1);
        cursor.pending_wrap = false;
    }

    /// Advance to the n-th next tab stop (HT, CHT)
    pub fn tab(&mut self, n: usize) {
        let cols = self.cols();
        let mut col = self.cursor().col;
        for _ in 0..n {
            match (col + 1..cols).find(|&c| self.tab_stops.get(c).copied().unwrap_or(false)) {
                Some(stop) => col = stop,
                None => {
                    col = cols - 1;
                    break;
                }
            }
        }
        let cursor = &mut self.active_mut().cursor;
        cursor.col = col;
        cursor.pending_wrap = false;
    }

    /// Move back to the n-th previous tab stop (CBT)
    pub fn back_tab(&mut self, n: usize) {
        let mut col = self.cursor().col;
        for _ in 0..n {
            col = (0..col)
                .rev()
                .find(|&c| self.tab_stops.get(c).copied().unwrap_or(false))
                .unwrap_or(0);
        }
        let cursor = &mut self.active_mut().cursor;
        cursor.col = col;
        cursor.pending_wrap = false;
    }

    /// Handle carriage return (CR)
    pub fn carriage_return(&mut self) {
        let cursor = &mut self.active_mut().cursor;
        cursor.col = 0;
        cursor.pending_wrap = false;
    }

    /// Handle line feed (LF), vertical tab (VT), form feed (FF)
    pub fn linefeed(&mut self) {
        self.index();
        if self.modes.linefeed_mode {
            self.carriage_return();
        }
    }

    /// Index (IND) - move cursor down, scroll if at the region bottom
    pub fn index(&mut self) {
        let row = {
            let cursor = &mut self.active_mut().cursor;
            cursor.pending_wrap = false;
            cursor.row
        };
        if row == self.scroll_bottom {
            self.scroll_region_up(1, true);
        } else if row + 1 < self.rows() {
            self.active_mut().cursor.row += 1;
        }
    }

    /// Reverse index (RI) - move cursor up, scroll if at the region top
    pub fn reverse_index(&mut self) {
        let row = {
            let cursor = &mut self.active_mut().cursor;
            cursor.pending_wrap = false;
            cursor.row
        };
        if row == self.scroll_top {
            self.scroll_down(1);
        } else if row > 0 {
            self.active_mut().cursor.row -= 1;
        }
    }

    /// Next line (NEL) - move to start of next line
    pub fn next_line(&mut self) {
        self.index();
        self.carriage_return();
    }

    fn scroll_region_up(&mut self, n: usize, to_scrollback: bool) {
        let (top, bottom) = self.scroll_region();
        let erase = self.erase_attrs();
        let feed = to_scrollback && top == 0 && !self.using_alternate;
        let evicted = self.active_mut().grid.scroll_up(top, bottom, n, erase);
        if feed {
            for line in evicted {
                self.scrollback.push(line);
            }
        }
        self.dirty.mark_range(top..=bottom);
    }

    /// Scroll the region up by n lines (SU); lines leaving the top are discarded
    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_region_up(n, false);
    }

    /// Scroll the region down by n lines (SD)
    pub fn scroll_down(&mut self, n: usize) {
        let (top, bottom) = self.scroll_region();
        let erase = self.erase_attrs();
        self.active_mut().grid.scroll_down(top, bottom, n, erase);
        self.dirty.mark_range(top..=bottom);
    }

    /// Move cursor to position (1-indexed, relative to the region in origin mode)
    pub fn move_cursor_to(&mut self, row: usize, col: usize) {
        let (cols, rows) = (self.cols(), self.rows());
        let row = row.saturating_sub(1);
        let row = if self.modes.origin_mode {
            self.scroll_top.saturating_add(row).min(self.scroll_bottom)
        } else {
            row
        };
        self.active_mut()
            .cursor
            .move_to(col.saturating_sub(1), row, cols, rows);
    }

    /// Move cursor up by n rows, stopping at the region top when inside it
    pub fn move_cursor_up(&mut self, n: usize) {
        let top = self.scroll_top;
        let cursor = &mut self.active_mut().cursor;
        let min = if cursor.row >= top { top } else { 0 };
        cursor.row = cursor.row.saturating_sub(n).max(min);
        cursor.pending_wrap = false;
    }

    /// Move cursor down by n rows, stopping at the region bottom when inside it
    pub fn move_cursor_down(&mut self, n: usize) {
        let bottom = self.scroll_bottom;
        let last = self.rows() - 1;
        let cursor = &mut self.active_mut().cursor;
        let max = if cursor.row <= bottom { bottom } else { last };
        cursor.row = cursor.row.saturating_add(n).min(max);
        cursor.pending_wrap = false;
    }

    pub fn move_cursor_left(&mut self, n: usize) {
        let cursor = &mut self.active_mut().cursor;
        cursor.col = cursor.col.saturating_sub(n);
        cursor.pending_wrap = false;
    }

    pub fn move_cursor_right(&mut self, n: usize) {
        let last = self.cols() - 1;
        let cursor = &mut self.active_mut().cursor;
        cursor.col = cursor.col.saturating_add(n).min(last);
        cursor.pending_wrap = false;
    }

    /// Set cursor column (1-indexed)
    pub fn set_cursor_col(&mut self, col: usize) {
        let last = self.cols() - 1;
        let cursor = &mut self.active_mut().cursor;
        cursor.col = col.saturating_sub(1).min(last);
        cursor.pending_wrap = false;
    }

    /// Set cursor row (1-indexed, relative to the region in origin mode)
    pub fn set_cursor_row(&mut self, row: usize) {
        let col = self.cursor().col;
        self.move_cursor_to(row, col + 1);
    }

    /// Save cursor state (DECSC)
    pub fn save_cursor(&mut self) {
        let saved = SavedCursor::save(self.cursor(), self.modes.origin_mode, &self.charset);
        self.active_mut().saved = Some(saved);
    }

    /// Restore cursor state (DECRC); with nothing saved the cursor goes home
    pub fn restore_cursor(&mut self) {
        let (cols, rows) = (self.cols(), self.rows());
        match self.active().saved.clone() {
            Some(saved) => {
                saved.restore(&mut self.active_mut().cursor, cols, rows);
                self.modes.origin_mode = saved.origin_mode;
                self.charset = saved.charset;
            }
            None => {
                self.active_mut().cursor.reset();
                self.modes.origin_mode = false;
                self.charset.reset();
            }
        }
    }

    /// Erase display (ED)
    pub fn erase_display(&mut self, mode: u16) {
        let erase = self.erase_attrs();
        let (row, col) = (self.cursor().row, self.cursor().col);
        let last = self.rows() - 1;

        match mode {
            0 => {
                self.active_mut().grid.clear_below(row, col, erase);
                self.dirty.mark_range(row..=last);
            }
            1 => {
                self.active_mut().grid.clear_above(row, col, erase);
                self.dirty.mark_range(0..=row);
            }
            2 => {
                self.active_mut().grid.clear(erase);
                self.dirty.mark_all();
            }
            // Erases never reach into scrollback
            3 => log::debug!("Ignoring ED 3 (erase saved lines)"),
            _ => log::debug!("Unknown ED mode: {}", mode),
        }
    }

    /// Erase line (EL)
    pub fn erase_line(&mut self, mode: u16) {
        let erase = self.erase_attrs();
        let (row, col) = (self.cursor().row, self.cursor().col);
        let cols = self.cols();
        let (start, end) = match mode {
            0 => (col, cols),
            1 => (0, col + 1),
            2 => (0, cols),
            _ => {
                log::debug!("Unknown EL mode: {}", mode);
                return;
            }
        };
        self.active_mut().grid.line_mut(row).erase(start, end, erase);
        self.dirty.mark(row);
    }

    /// Erase characters (ECH)
    pub fn erase_chars(&mut self, n: usize) {
        let erase = self.erase_attrs();
        let (row, col) = (self.cursor().row, self.cursor().col);
        self.active_mut()
            .grid
            .line_mut(row)
            .erase(col, col.saturating_add(n), erase);
        self.dirty.mark(row);
    }

    /// Insert blank characters at the cursor (ICH)
    pub fn insert_chars(&mut self, n: usize) {
        let erase = self.erase_attrs();
        let buf = self.active_mut();
        let (row, col) = (buf.cursor.row, buf.cursor.col);
        buf.grid.line_mut(row).insert_cells(col, n, erase);
        buf.cursor.pending_wrap = false;
        self.dirty.mark(row);
    }

    /// Delete characters at the cursor (DCH)
    pub fn delete_chars(&mut self, n: usize) {
        let erase = self.erase_attrs();
        let buf = self.active_mut();
        let (row, col) = (buf.cursor.row, buf.cursor.col);
        buf.grid.line_mut(row).delete_cells(col, n, erase);
        buf.cursor.pending_wrap = false;
        self.dirty.mark(row);
    }

    /// Insert lines (IL); ignored outside the scroll region
    pub fn insert_lines(&mut self, n: usize) {
        let (top, bottom) = self.scroll_region();
        let row = self.cursor().row;
        if row < top || row > bottom {
            return;
        }
        let erase = self.erase_attrs();
        let buf = self.active_mut();
        buf.grid.insert_lines(row, n, bottom, erase);
        buf.cursor.col = 0;
        buf.cursor.pending_wrap = false;
        self.dirty.mark_range(row..=bottom);
    }

    /// Delete lines (DL); ignored outside the scroll region
    pub fn delete_lines(&mut self, n: usize) {
        let (top, bottom) = self.scroll_region();
        let row = self.cursor().row;
        if row < top || row > bottom {
            return;
        }
        let erase = self.erase_attrs();
        let buf = self.active_mut();
        buf.grid.delete_lines(row, n, bottom, erase);
        buf.cursor.col = 0;
        buf.cursor.pending_wrap = false;
        self.dirty.mark_range(row..=bottom);
    }

    /// Set tab stop at current column (HTS)
    pub fn set_tab_stop(&mut self) {
        let col = self.cursor().col;
        if let Some(stop) = self.tab_stops.get_mut(col) {
            *stop = true;
        }
    }

    /// Clear tab stops (TBC): 0 = at cursor, 3 = all
    pub fn clear_tab_stop(&mut self, mode: u16) {
        match mode {
            0 => {
                let col = self.cursor().col;
                if let Some(stop) = self.tab_stops.get_mut(col) {
                    *stop = false;
                }
            }
            3 => self.tab_stops.fill(false),
            _ => log::debug!("Unknown TBC mode: {}", mode),
        }
    }

    /// Set scroll region (DECSTBM), 1-indexed with 0 meaning the screen edge
    ///
    /// Regions with top >= bottom are ignored. The cursor moves home.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let rows = self.rows();
        let top = top.max(1) - 1;
        let bottom = if bottom == 0 { rows } else { bottom.min(rows) } - 1;
        if top >= bottom {
            log::debug!("Ignoring scroll region {}..{}", top + 1, bottom + 1);
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        self.move_cursor_to(1, 1);
    }

    fn reset_scroll_region(&mut self) {
        self.scroll_top = 0;
        self.scroll_bottom = self.rows() - 1;
    }

    /// Switch to the alternate screen, which starts blank with a copy of the
    /// primary cursor
    pub fn enter_alternate_screen(&mut self) {
        if self.using_alternate {
            return;
        }
        self.alternate.cursor = self.primary.cursor.clone();
        self.alternate.saved = None;
        self.alternate.grid.clear(CellAttributes::default());
        self.using_alternate = true;
        self.modes.alternate_screen = true;
        self.last_base = None;
        self.dirty.mark_all();
    }

    /// Switch back to the primary screen, untouched since it was left
    pub fn exit_alternate_screen(&mut self) {
        if !self.using_alternate {
            return;
        }
        self.using_alternate = false;
        self.modes.alternate_screen = false;
        self.last_base = None;
        self.dirty.mark_all();
    }

    /// DECSET/DECRST
    pub fn set_dec_mode(&mut self, mode: u16, value: bool) {
        match mode {
            5 => {
                if self.modes.reverse_video != value {
                    self.dirty.mark_all();
                }
                self.modes.reverse_video = value;
            }
            6 => {
                self.modes.origin_mode = value;
                self.move_cursor_to(1, 1);
            }
            47 | 1047 => {
                if value {
                    self.enter_alternate_screen();
                } else {
                    self.exit_alternate_screen();
                }
            }
            1048 => {
                if value {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => {
                if value && !self.using_alternate {
                    self.save_cursor();
                    self.enter_alternate_screen();
                } else if !value && self.using_alternate {
                    self.exit_alternate_screen();
                    self.restore_cursor();
                }
            }
            _ => {
                self.modes.set_dec_mode(mode, value);
            }
        }
    }

    /// SM/RM
    pub fn set_ansi_mode(&mut self, mode: u16, value: bool) {
        self.modes.set_mode(mode, value);
    }

    /// XTSAVE: remember the listed DEC private modes
    pub fn save_dec_modes(&mut self, modes: &[u16]) {
        for &mode in modes {
            if let Some(value) = self.modes.dec_mode(mode) {
                self.saved_modes.insert(mode, value);
            }
        }
    }

    /// XTRESTORE: reapply the listed DEC private modes as saved
    pub fn restore_dec_modes(&mut self, modes: &[u16]) {
        for &mode in modes {
            if let Some(value) = self.saved_modes.get(&mode).copied() {
                self.set_dec_mode(mode, value);
            }
        }
    }

    /// Designate a character set into G0-G3
    pub fn designate_charset(&mut self, slot: u8, designation: char) {
        self.charset
            .designate(slot, Charset::from_designation(designation));
    }

    /// Shift In (SI) - select G0 into GL
    pub fn shift_in(&mut self) {
        self.charset.shift_in();
    }

    /// Shift Out (SO) - select G1 into GL
    pub fn shift_out(&mut self) {
        self.charset.shift_out();
    }

    /// SS2/SS3
    pub fn single_shift(&mut self, slot: u8) {
        self.charset.single_shift(slot);
    }

    /// DECSCUSR
    pub fn set_cursor_style(&mut self, param: u16) {
        match CursorStyle::from_decscusr(param) {
            Some((style, blinking)) => {
                self.cursor_style = style;
                self.modes.cursor_blink = blinking;
            }
            None => log::debug!("Unknown cursor style: {}", param),
        }
    }

    /// DEC screen alignment test (DECALN): fill with 'E'
    pub fn screen_alignment_test(&mut self) {
        self.reset_scroll_region();
        let attrs = CellAttributes::default();
        let (cols, rows) = (self.cols(), self.rows());
        let buf = self.active_mut();
        for row in 0..rows {
            let line = buf.grid.line_mut(row);
            for col in 0..cols {
                line.cell_mut(col).set('E', attrs, CellWidth::Narrow);
            }
            line.wrapped = false;
        }
        buf.cursor.move_to(0, 0, cols, rows);
        self.dirty.mark_all();
    }

    /// Soft reset (DECSTR): modes, margins, pen and charsets; content stays
    pub fn soft_reset(&mut self) {
        self.modes.insert_mode = false;
        self.modes.origin_mode = false;
        self.modes.auto_wrap = true;
        self.modes.cursor_visible = true;
        self.modes.cursor_keys_application = false;
        self.modes.application_keypad = false;
        self.reset_scroll_region();
        self.charset.reset();
        let buf = self.active_mut();
        buf.cursor.attrs.reset();
        buf.cursor.pending_wrap = false;
        buf.saved = None;
    }

    /// Full reset (RIS): everything except dimensions and configured colors
    pub fn full_reset(&mut self) {
        for buf in [&mut self.primary, &mut self.alternate] {
            buf.grid.clear(CellAttributes::default());
            buf.cursor.reset();
            buf.saved = None;
        }
        self.using_alternate = false;
        self.scrollback.clear();
        self.modes.reset();
        self.saved_modes.clear();
        self.reset_scroll_region();
        self.tab_stops = default_tab_stops(self.cols());
        self.charset.reset();
        self.palette.reset_all();
        self.cursor_style = CursorStyle::default();
        self.title.clear();
        self.icon_name.clear();
        self.last_printed = None;
        self.last_base = None;
        self.dirty.mark_all();
    }

    /// Resize both buffers, truncating or padding rows and columns
    ///
    /// Rows cut from the bottom are discarded, not pushed to scrollback.
    /// Either everything is resized or, on allocation failure, nothing is.
    pub fn resize(&mut self, dims: Dimensions) -> Result<(), TryReserveError> {
        let dims = Dimensions::new(dims.cols.max(1), dims.rows.max(1));
        if dims == self.dimensions() {
            return Ok(());
        }

        let blank = CellAttributes::default();
        let primary_rows = self.primary.grid.reserve_resize(dims, blank)?;
        let alternate_rows = self.alternate.grid.reserve_resize(dims, blank)?;
        self.tab_stops
            .try_reserve_exact(dims.cols.saturating_sub(self.tab_stops.len()))?;
        self.dirty.reserve(dims.rows)?;

        let cols_changed = dims.cols != self.cols();
        self.primary.grid.apply_resize(dims, blank, primary_rows);
        self.alternate.grid.apply_resize(dims, blank, alternate_rows);

        let old_cols = self.tab_stops.len();
        self.tab_stops.truncate(dims.cols);
        self.tab_stops
            .extend((old_cols..dims.cols).map(|c| c % DEFAULT_TAB_WIDTH == 0));

        for buf in [&mut self.primary, &mut self.alternate] {
            let cursor = &mut buf.cursor;
            let (col, row) = (cursor.col, cursor.row);
            let pending = cursor.pending_wrap && !cols_changed;
            cursor.move_to(col, row, dims.cols, dims.rows);
            cursor.pending_wrap = pending;
        }

        self.reset_scroll_region();
        self.last_base = None;
        self.dirty.resize(dims.rows);
        Ok(())
    }

    /// Create a snapshot of the current state
    pub fn snapshot(&self, include_scrollback: bool) -> Snapshot {
        Snapshot::from_screen(self, include_scrollback)
    }
}

fn default_tab_stops(cols: usize) -> Vec<bool> {
    (0..cols).map(|c| c % DEFAULT_TAB_WIDTH == 0).collect()
}
