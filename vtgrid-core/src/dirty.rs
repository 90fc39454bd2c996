//! Per-row change tracking
//!
//! A row is set when any of its cells change and stays set until the
//! consumer clears the whole tracker after rendering.

use std::collections::TryReserveError;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRows {
    rows: Vec<bool>,
}

impl DirtyRows {
    /// Tracker for `rows` rows, all clean
    pub fn new(rows: usize) -> Self {
        Self {
            rows: vec![false; rows],
        }
    }

    pub fn mark(&mut self, row: usize) {
        if let Some(flag) = self.rows.get_mut(row) {
            *flag = true;
        }
    }

    /// Mark an inclusive row range, clamped to the tracked rows
    pub fn mark_range(&mut self, range: RangeInclusive<usize>) {
        let end = (*range.end()).min(self.rows.len().saturating_sub(1));
        for row in *range.start()..=end {
            self.mark(row);
        }
    }

    pub fn mark_all(&mut self) {
        self.rows.fill(true);
    }

    pub fn is_dirty(&self, row: usize) -> bool {
        self.rows.get(row).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.rows.iter().any(|&d| d)
    }

    pub fn clear(&mut self) {
        self.rows.fill(false);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn reserve(&mut self, rows: usize) -> Result<(), TryReserveError> {
        self.rows
            .try_reserve_exact(rows.saturating_sub(self.rows.len()))
    }

    /// Track `rows` rows; every row is marked since the layout changed
    pub fn resize(&mut self, rows: usize) {
        self.rows.resize(rows, true);
        self.mark_all();
    }

    /// Dirty row indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row, &dirty)| dirty.then_some(row))
    }
}
