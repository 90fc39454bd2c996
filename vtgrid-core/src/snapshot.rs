//! Terminal snapshot for testing and debugging
//!
//! A serializable picture of the visible screen (and optionally scrollback),
//! used by golden tests and the headless binary.

use serde::{Deserialize, Serialize};

use crate::cell::{CellAttributes, StyleFlags};
use crate::color::Color;
use crate::cursor::CursorStyle;
use crate::line::Line;
use crate::screen::Screen;

/// A complete snapshot of terminal state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub dimensions: SnapshotDimensions,
    pub cursor: SnapshotCursor,
    /// Screen content (rows of text with attributes)
    pub screen: Vec<SnapshotLine>,
    /// Scrollback content, oldest first (if requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrollback: Option<Vec<SnapshotLine>>,
    pub modes: SnapshotModes,
    /// Scroll region (top, bottom), 0-indexed inclusive
    pub scroll_region: (usize, usize),
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDimensions {
    pub cols: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCursor {
    pub col: usize,
    pub row: usize,
    pub visible: bool,
    pub style: CursorStyle,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending_wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
    pub text: String,
    /// Whether the line was soft-wrapped
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrapped: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<SnapshotAttrSpan>,
}

/// A run of cells `start..end` sharing non-default attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotAttrSpan {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "StyleFlags::is_empty")]
    pub flags: StyleFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotModes {
    pub origin_mode: bool,
    pub auto_wrap: bool,
    pub insert_mode: bool,
    pub reverse_video: bool,
    pub bracketed_paste: bool,
    pub alternate_screen: bool,
}

impl Snapshot {
    pub fn from_screen(screen: &Screen, include_scrollback: bool) -> Self {
        let dims = screen.dimensions();
        let cursor = screen.cursor();
        let modes = screen.modes();

        let scrollback = include_scrollback
            .then(|| screen.scrollback().iter().map(SnapshotLine::from_line).collect());

        Self {
            dimensions: SnapshotDimensions {
                cols: dims.cols,
                rows: dims.rows,
            },
            cursor: SnapshotCursor {
                col: cursor.col,
                row: cursor.row,
                visible: modes.cursor_visible,
                style: screen.cursor_style(),
                pending_wrap: cursor.pending_wrap,
            },
            screen: screen.grid().iter().map(SnapshotLine::from_line).collect(),
            scrollback,
            modes: SnapshotModes {
                origin_mode: modes.origin_mode,
                auto_wrap: modes.auto_wrap,
                insert_mode: modes.insert_mode,
                reverse_video: modes.reverse_video,
                bracketed_paste: modes.bracketed_paste,
                alternate_screen: screen.is_alternate_screen(),
            },
            scroll_region: screen.scroll_region(),
            title: screen.title().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Screen text, one line per row
    pub fn screen_text(&self) -> String {
        self.screen
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SnapshotLine {
    fn from_line(line: &Line) -> Self {
        Self {
            text: line.text(),
            wrapped: line.wrapped,
            attrs: attr_spans(line),
        }
    }
}

fn color_name(color: Color) -> Option<String> {
    match color {
        Color::Default => None,
        Color::Indexed(idx) => Some(format!("idx:{}", idx)),
        Color::Rgb(rgb) => Some(rgb.to_string()),
    }
}

fn attr_spans(line: &Line) -> Vec<SnapshotAttrSpan> {
    let mut spans: Vec<SnapshotAttrSpan> = Vec::new();
    let mut current: Option<SnapshotAttrSpan> = None;

    for (col, cell) in line.iter().enumerate() {
        if cell.is_continuation() {
            continue;
        }

        let attrs: &CellAttributes = &cell.attrs;
        let span = SnapshotAttrSpan {
            start: col,
            end: col + 1,
            fg: color_name(attrs.fg),
            bg: color_name(attrs.bg),
            flags: attrs.flags,
        };
        let plain = span.fg.is_none() && span.bg.is_none() && span.flags.is_empty();

        match current.as_mut() {
            Some(open) if !plain && open.fg == span.fg && open.bg == span.bg && open.flags == span.flags => {
                open.end = col + 1;
                if cell.is_wide() {
                    open.end += 1;
                }
                continue;
            }
            _ => {}
        }

        spans.extend(current.take());
        if !plain {
            let wide = cell.is_wide();
            current = Some(SnapshotAttrSpan {
                end: if wide { col + 2 } else { col + 1 },
                ..span
            });
        }
    }

    spans.extend(current);
    spans
}
