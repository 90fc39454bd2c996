//! Terminal grid - the visible screen area
//!
//! The grid is a 2D array of cells representing the visible terminal area.
//! Row shuffles (scrolling, line insert/delete) rotate whole lines in place.

use std::collections::TryReserveError;

use crate::cell::CellAttributes;
use crate::line::Line;
use crate::Dimensions;

/// The terminal grid (visible screen area)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Lines in the grid (row 0 is top)
    lines: Vec<Line>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a new grid with the specified dimensions
    pub fn new(dims: Dimensions) -> Self {
        Self {
            lines: (0..dims.rows).map(|_| Line::new(dims.cols)).collect(),
            cols: dims.cols,
            rows: dims.rows,
        }
    }

    /// Like [`Grid::new`], reporting allocation failure
    pub fn try_new(dims: Dimensions) -> Result<Self, TryReserveError> {
        let mut lines = Vec::new();
        lines.try_reserve_exact(dims.rows)?;
        for _ in 0..dims.rows {
            lines.push(Line::try_with_attrs(dims.cols, CellAttributes::default())?);
        }
        Ok(Self {
            lines,
            cols: dims.cols,
            rows: dims.rows,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.cols, self.rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get a reference to a line, panics if out of bounds
    pub fn line(&self, row: usize) -> &Line {
        &self.lines[row]
    }

    /// Get a mutable reference to a line, panics if out of bounds
    pub fn line_mut(&mut self, row: usize) -> &mut Line {
        &mut self.lines[row]
    }

    pub fn get_line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Clear the entire grid
    pub fn clear(&mut self, attrs: CellAttributes) {
        for line in &mut self.lines {
            line.clear(attrs);
        }
    }

    /// Clear from (row, col) to end of screen
    pub fn clear_below(&mut self, row: usize, col: usize, attrs: CellAttributes) {
        if row >= self.rows {
            return;
        }
        self.lines[row].erase(col, self.cols, attrs);
        for line in self.lines.iter_mut().skip(row + 1) {
            line.clear(attrs);
        }
    }

    /// Clear from start of screen to (row, col) inclusive
    pub fn clear_above(&mut self, row: usize, col: usize, attrs: CellAttributes) {
        if row >= self.rows {
            return;
        }
        for line in self.lines.iter_mut().take(row) {
            line.clear(attrs);
        }
        self.lines[row].erase(0, col + 1, attrs);
    }

    /// Scroll the region `top..=bottom` up by n lines
    ///
    /// Returns the lines that left the top of the region, oldest first.
    pub fn scroll_up(
        &mut self,
        top: usize,
        bottom: usize,
        n: usize,
        attrs: CellAttributes,
    ) -> Vec<Line> {
        if top > bottom || bottom >= self.rows || n == 0 {
            return Vec::new();
        }
        let n = n.min(bottom - top + 1);
        let cols = self.cols;

        self.lines[top..=bottom].rotate_left(n);
        self.lines[bottom + 1 - n..=bottom]
            .iter_mut()
            .map(|line| std::mem::replace(line, Line::with_attrs(cols, attrs)))
            .collect()
    }

    /// Scroll the region `top..=bottom` down by n lines, blank lines enter at the top
    pub fn scroll_down(&mut self, top: usize, bottom: usize, n: usize, attrs: CellAttributes) {
        if top > bottom || bottom >= self.rows || n == 0 {
            return;
        }
        let n = n.min(bottom - top + 1);
        self.lines[top..=bottom].rotate_right(n);
        for line in &mut self.lines[top..top + n] {
            line.clear(attrs);
        }
    }

    /// Insert n blank lines at row, pushing lines below it down to `bottom`
    pub fn insert_lines(&mut self, row: usize, n: usize, bottom: usize, attrs: CellAttributes) {
        self.scroll_down(row, bottom, n, attrs);
    }

    /// Delete n lines at row, pulling lines up from `bottom`
    pub fn delete_lines(&mut self, row: usize, n: usize, bottom: usize, attrs: CellAttributes) {
        if row > bottom || bottom >= self.rows || n == 0 {
            return;
        }
        let n = n.min(bottom - row + 1);
        self.lines[row..=bottom].rotate_left(n);
        for line in &mut self.lines[bottom + 1 - n..=bottom] {
            line.clear(attrs);
        }
    }

    /// Reserve everything a resize to `dims` needs
    ///
    /// Returns the new rows to hand to [`Grid::apply_resize`]. On error the
    /// grid content is unchanged.
    pub fn reserve_resize(
        &mut self,
        dims: Dimensions,
        attrs: CellAttributes,
    ) -> Result<Vec<Line>, TryReserveError> {
        let added = dims.rows.saturating_sub(self.rows);
        let mut extra = Vec::new();
        extra.try_reserve_exact(added)?;
        for _ in 0..added {
            extra.push(Line::try_with_attrs(dims.cols, attrs)?);
        }
        self.lines.try_reserve_exact(added)?;
        for line in self.lines.iter_mut().take(dims.rows) {
            line.reserve_cols(dims.cols)?;
        }
        Ok(extra)
    }

    /// Truncate or pad rows and columns to `dims`; cannot fail after
    /// [`Grid::reserve_resize`]
    pub fn apply_resize(&mut self, dims: Dimensions, attrs: CellAttributes, extra: Vec<Line>) {
        self.lines.truncate(dims.rows);
        for line in &mut self.lines {
            line.resize(dims.cols, attrs);
        }
        self.lines.extend(extra);
        self.cols = dims.cols;
        self.rows = dims.rows;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Line> {
        self.lines.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellWidth;

    fn lettered(rows: usize) -> Grid {
        let mut grid = Grid::new(Dimensions::new(10, rows));
        for row in 0..rows {
            grid.line_mut(row).cell_mut(0).set(
                (b'A' + row as u8) as char,
                CellAttributes::default(),
                CellWidth::Narrow,
            );
        }
        grid
    }

    fn column0(grid: &Grid) -> String {
        grid.iter().map(|l| l.cell(0).display_char()).collect()
    }

    #[test]
    fn test_grid_new() {
        let grid = Grid::try_new(Dimensions::new(80, 24)).unwrap();
        assert_eq!(grid.cols(), 80);
        assert_eq!(grid.rows(), 24);
    }

    #[test]
    fn test_grid_scroll_up() {
        let mut grid = lettered(5);
        let scrolled = grid.scroll_up(0, 4, 2, CellAttributes::default());

        assert_eq!(scrolled.len(), 2);
        assert_eq!(scrolled[0].text(), "A");
        assert_eq!(scrolled[1].text(), "B");
        assert_eq!(column0(&grid), "CDE  ");
    }

    #[test]
    fn test_grid_scroll_down() {
        let mut grid = lettered(5);
        grid.scroll_down(0, 4, 2, CellAttributes::default());
        assert_eq!(column0(&grid), "  ABC");
    }

    #[test]
    fn test_grid_scroll_region() {
        let mut grid = lettered(5);
        grid.scroll_up(1, 3, 1, CellAttributes::default());
        assert_eq!(column0(&grid), "ACD E");
    }

    #[test]
    fn test_grid_scroll_more_than_region() {
        let mut grid = lettered(5);
        let scrolled = grid.scroll_up(1, 2, 10, CellAttributes::default());
        assert_eq!(scrolled.len(), 2);
        assert_eq!(column0(&grid), "A  DE");
    }

    #[test]
    fn test_grid_insert_lines() {
        let mut grid = lettered(5);
        grid.insert_lines(1, 2, 4, CellAttributes::default());
        assert_eq!(column0(&grid), "A  BC");
    }

    #[test]
    fn test_grid_delete_lines() {
        let mut grid = lettered(5);
        grid.delete_lines(1, 2, 4, CellAttributes::default());
        assert_eq!(column0(&grid), "ADE  ");
    }

    #[test]
    fn test_grid_delete_lines_inside_region() {
        let mut grid = lettered(5);
        grid.delete_lines(1, 1, 3, CellAttributes::default());
        assert_eq!(column0(&grid), "ACD E");
    }

    #[test]
    fn test_grid_clear_below_and_above() {
        let mut grid = lettered(3);
        grid.clear_below(1, 0, CellAttributes::default());
        assert_eq!(column0(&grid), "A  ");

        let mut grid = lettered(3);
        grid.clear_above(1, 0, CellAttributes::default());
        assert_eq!(column0(&grid), "  C");
    }

    #[test]
    fn test_grid_resize() {
        let mut grid = lettered(5);
        let dims = Dimensions::new(20, 3);
        let extra = grid.reserve_resize(dims, CellAttributes::default()).unwrap();
        grid.apply_resize(dims, CellAttributes::default(), extra);

        assert_eq!(grid.dimensions(), dims);
        assert_eq!(column0(&grid), "ABC");
        assert!(grid.iter().all(|l| l.cols() == 20));

        let dims = Dimensions::new(4, 6);
        let extra = grid.reserve_resize(dims, CellAttributes::default()).unwrap();
        grid.apply_resize(dims, CellAttributes::default(), extra);
        assert_eq!(grid.rows(), 6);
        assert!(grid.iter().all(|l| l.cols() == 4));
    }
}
