//! Scrollback buffer for terminal history
//!
//! Lines that scroll off the top of the primary screen, oldest first. A
//! limit of 0 means unbounded; otherwise the oldest line is evicted once the
//! limit is reached.

use std::collections::VecDeque;

use crate::line::Line;

/// Default maximum scrollback lines
pub const DEFAULT_SCROLLBACK_LIMIT: usize = 10000;

#[derive(Debug, Clone)]
pub struct Scrollback {
    lines: VecDeque<Line>,
    /// Maximum number of lines to keep (0 = unbounded)
    limit: usize,
}

impl Scrollback {
    pub fn new(limit: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line, evicting the oldest when full
    ///
    /// If memory for an unbounded history runs out, the oldest line makes
    /// room instead; an empty history drops the line.
    pub fn push(&mut self, line: Line) {
        if self.limit > 0 && self.lines.len() >= self.limit {
            self.lines.pop_front();
        } else if self.lines.try_reserve(1).is_err() && self.lines.pop_front().is_none() {
            log::warn!("Scrollback allocation failed, dropping line");
            return;
        }
        self.lines.push_back(line);
    }

    /// Get a line by index (0 = oldest, len-1 = newest)
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Change the limit, dropping the oldest lines beyond it
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        if limit > 0 && self.lines.len() > limit {
            let excess = self.lines.len() - limit;
            self.lines.drain(..excess);
        }
    }

    /// Iterator over lines from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Line> {
        self.lines.iter()
    }
}

impl Default for Scrollback {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLBACK_LIMIT)
    }
}
