//! Terminal line representation
//!
//! A line is a row of cells in the terminal grid. Every operation that can
//! split a wide glyph from its continuation repairs the row afterwards, so a
//! line never holds a lone half.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellAttributes, CellWidth};

/// A single line in the terminal grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<Cell>,
    /// Whether this line was soft-wrapped into the next one
    pub wrapped: bool,
}

impl Line {
    /// Create a new line with the specified number of columns
    pub fn new(cols: usize) -> Self {
        Self::with_attrs(cols, CellAttributes::default())
    }

    /// Create a blank line whose cells carry `attrs`
    pub fn with_attrs(cols: usize, attrs: CellAttributes) -> Self {
        Self {
            cells: vec![Cell::blank(attrs); cols],
            wrapped: false,
        }
    }

    /// Like [`Line::with_attrs`], reporting allocation failure
    pub fn try_with_attrs(cols: usize, attrs: CellAttributes) -> Result<Self, TryReserveError> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(cols)?;
        cells.resize(cols, Cell::blank(attrs));
        Ok(Self {
            cells,
            wrapped: false,
        })
    }

    pub fn cols(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get cell at column, panics if out of bounds
    pub fn cell(&self, col: usize) -> &Cell {
        &self.cells[col]
    }

    /// Get mutable cell at column, panics if out of bounds
    pub fn cell_mut(&mut self, col: usize) -> &mut Cell {
        &mut self.cells[col]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire line with given attributes
    pub fn clear(&mut self, attrs: CellAttributes) {
        for cell in &mut self.cells {
            cell.clear(attrs);
        }
        self.wrapped = false;
    }

    /// Blank the cells in `start..end` (clamped), without shifting
    pub fn erase(&mut self, start: usize, end: usize, attrs: CellAttributes) {
        let end = end.min(self.cells.len());
        if start >= end {
            return;
        }
        for cell in &mut self.cells[start..end] {
            cell.clear(attrs);
        }
        self.repair_wide(attrs);
    }

    /// Before overwriting `col`, blank the other half of any wide glyph there
    pub fn clear_wide_pair_at(&mut self, col: usize, attrs: CellAttributes) {
        match self.cells.get(col).map(Cell::width) {
            Some(CellWidth::Continuation) if col > 0 => self.cells[col - 1].clear(attrs),
            Some(CellWidth::Wide) if col + 1 < self.cells.len() => {
                self.cells[col + 1].clear(attrs)
            }
            _ => {}
        }
    }

    /// Blank any wide cell missing its continuation and any orphan continuation
    pub fn repair_wide(&mut self, attrs: CellAttributes) {
        let len = self.cells.len();
        for col in 0..len {
            let broken = match self.cells[col].width() {
                CellWidth::Wide => {
                    col + 1 >= len || self.cells[col + 1].width() != CellWidth::Continuation
                }
                CellWidth::Continuation => {
                    col == 0 || self.cells[col - 1].width() != CellWidth::Wide
                }
                CellWidth::Narrow => false,
            };
            if broken {
                self.cells[col].clear(attrs);
            }
        }
    }

    /// Insert n blank cells at column, shifting cells right
    /// Cells that shift past the end are lost
    pub fn insert_cells(&mut self, col: usize, n: usize, attrs: CellAttributes) {
        let len = self.cells.len();
        if col >= len || n == 0 {
            return;
        }
        let n = n.min(len - col);
        self.cells[col..].rotate_right(n);
        for cell in &mut self.cells[col..col + n] {
            cell.clear(attrs);
        }
        self.repair_wide(attrs);
    }

    /// Delete n cells at column, shifting cells left
    /// New cells at the end are filled with attrs
    pub fn delete_cells(&mut self, col: usize, n: usize, attrs: CellAttributes) {
        let len = self.cells.len();
        if col >= len || n == 0 {
            return;
        }
        let n = n.min(len - col);
        self.cells[col..].rotate_left(n);
        for cell in &mut self.cells[len - n..] {
            cell.clear(attrs);
        }
        self.repair_wide(attrs);
    }

    /// Make room for `cols` cells without changing the content
    pub fn reserve_cols(&mut self, cols: usize) -> Result<(), TryReserveError> {
        match cols.checked_sub(self.cells.len()) {
            Some(extra) if extra > 0 => self.cells.try_reserve_exact(extra),
            _ => Ok(()),
        }
    }

    /// Truncate or pad to `cols` columns
    pub fn resize(&mut self, cols: usize, attrs: CellAttributes) {
        if cols >= self.cells.len() {
            self.cells.resize(cols, Cell::blank(attrs));
        } else {
            self.cells.truncate(cols);
            self.repair_wide(attrs);
        }
    }

    /// Get the text content of the line, trailing blanks trimmed
    pub fn text(&self) -> String {
        let mut result = String::new();
        for cell in &self.cells {
            if !cell.is_continuation() {
                cell.push_text(&mut result);
            }
        }
        result.truncate(result.trim_end().len());
        result
    }

    /// Check if line is empty (all cells are empty/space)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abcde() -> Line {
        let mut line = Line::new(5);
        for i in 0..5 {
            line.cell_mut(i)
                .set((b'A' + i as u8) as char, CellAttributes::default(), CellWidth::Narrow);
        }
        line
    }

    fn wide_at(line: &mut Line, col: usize, c: char) {
        line.cell_mut(col).set(c, CellAttributes::default(), CellWidth::Wide);
        line.cell_mut(col + 1).set_continuation(CellAttributes::default());
    }

    #[test]
    fn test_line_new() {
        let line = Line::new(80);
        assert_eq!(line.cols(), 80);
        assert!(!line.wrapped);
        assert!(line.is_empty());
    }

    #[test]
    fn test_line_erase_range() {
        let mut line = abcde();
        line.erase(1, 3, CellAttributes::default());
        assert_eq!(line.text(), "A  DE");

        line.erase(4, 100, CellAttributes::default());
        assert_eq!(line.text(), "A  D");
    }

    #[test]
    fn test_line_text_skips_continuation() {
        let mut line = Line::new(6);
        line.cell_mut(0).set('a', CellAttributes::default(), CellWidth::Narrow);
        wide_at(&mut line, 1, '中');
        line.cell_mut(3).set('b', CellAttributes::default(), CellWidth::Narrow);
        assert_eq!(line.text(), "a中b");
    }

    #[test]
    fn test_line_insert_cells() {
        let mut line = abcde();
        line.insert_cells(2, 2, CellAttributes::default());
        assert_eq!(line.text(), "AB  C");
    }

    #[test]
    fn test_line_delete_cells() {
        let mut line = abcde();
        line.delete_cells(1, 2, CellAttributes::default());
        assert_eq!(line.text(), "ADE");
        assert_eq!(line.cols(), 5);
    }

    #[test]
    fn test_line_delete_more_than_available() {
        let mut line = abcde();
        line.delete_cells(3, 99, CellAttributes::default());
        assert_eq!(line.text(), "ABC");
    }

    #[test]
    fn test_erase_half_of_wide_clears_both() {
        let mut line = Line::new(4);
        wide_at(&mut line, 1, '中');
        line.erase(2, 3, CellAttributes::default());
        assert!(line.cell(1).is_empty());
        assert!(!line.cell(1).is_wide());
        assert!(!line.cell(2).is_continuation());
    }

    #[test]
    fn test_insert_pushes_wide_off_edge() {
        let mut line = Line::new(4);
        wide_at(&mut line, 2, '中');
        line.insert_cells(0, 1, CellAttributes::default());
        // Wide glyph would straddle the right margin
        assert!(!line.cell(3).is_wide());
        assert!(line.iter().all(|c| !c.is_continuation()));
    }

    #[test]
    fn test_delete_splits_wide() {
        let mut line = Line::new(4);
        wide_at(&mut line, 0, '中');
        line.delete_cells(0, 1, CellAttributes::default());
        assert!(!line.cell(0).is_continuation());
    }

    #[test]
    fn test_clear_wide_pair_at() {
        let mut line = Line::new(4);
        wide_at(&mut line, 1, '中');
        line.clear_wide_pair_at(2, CellAttributes::default());
        assert!(line.cell(1).is_empty());

        wide_at(&mut line, 1, '中');
        line.clear_wide_pair_at(1, CellAttributes::default());
        assert!(!line.cell(2).is_continuation());
    }

    #[test]
    fn test_resize_truncate_and_pad() {
        let mut line = abcde();
        line.resize(3, CellAttributes::default());
        assert_eq!(line.text(), "ABC");

        line.resize(6, CellAttributes::default());
        assert_eq!(line.cols(), 6);
        assert_eq!(line.text(), "ABC");
    }

    #[test]
    fn test_resize_cuts_wide_glyph() {
        let mut line = Line::new(4);
        wide_at(&mut line, 2, '中');
        line.resize(3, CellAttributes::default());
        assert!(line.cell(2).is_empty());
        assert!(!line.cell(2).is_wide());
    }
}
