//! SGR (Select Graphic Rendition) attribute resolver
//!
//! Applies `CSI ... m` parameters to the pen in order. Unknown parameters
//! are skipped.

use vtgrid_core::{CellAttributes, Color, StyleFlags};
use vtgrid_parser::Params;

/// Which color slot an extended color (38/48/58) targets
#[derive(Debug, Clone, Copy)]
enum Slot {
    Foreground,
    Background,
    Underline,
}

/// Apply an SGR parameter list to `pen`
pub fn apply_sgr(pen: &mut CellAttributes, params: &Params) {
    if params.is_empty() {
        pen.reset();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let value = params.raw(i);
        match value {
            0 => pen.reset(),
            1 => pen.flags.insert(StyleFlags::BOLD),
            2 => pen.flags.insert(StyleFlags::FAINT),
            3 => pen.flags.insert(StyleFlags::ITALIC),
            // 4:0 turns underline off, any other style turns it on
            4 => pen
                .flags
                .set(StyleFlags::UNDERLINE, params.subparams(i).first() != Some(&0)),
            5 | 6 => pen.flags.insert(StyleFlags::BLINK),
            7 => pen.flags.insert(StyleFlags::INVERSE),
            8 => pen.flags.insert(StyleFlags::INVISIBLE),
            9 => pen.flags.insert(StyleFlags::STRIKETHROUGH),
            21 => pen.flags.insert(StyleFlags::UNDERLINE),
            22 => pen.flags.remove(StyleFlags::BOLD | StyleFlags::FAINT),
            23 => pen.flags.remove(StyleFlags::ITALIC),
            24 => pen.flags.remove(StyleFlags::UNDERLINE),
            25 => pen.flags.remove(StyleFlags::BLINK),
            27 => pen.flags.remove(StyleFlags::INVERSE),
            28 => pen.flags.remove(StyleFlags::INVISIBLE),
            29 => pen.flags.remove(StyleFlags::STRIKETHROUGH),
            30..=37 => pen.fg = Color::Indexed((value - 30) as u8),
            38 => i += extended_color(pen, params, i, Slot::Foreground),
            39 => pen.fg = Color::Default,
            40..=47 => pen.bg = Color::Indexed((value - 40) as u8),
            48 => i += extended_color(pen, params, i, Slot::Background),
            49 => pen.bg = Color::Default,
            58 => i += extended_color(pen, params, i, Slot::Underline),
            59 => pen.underline_color = Color::Default,
            90..=97 => pen.fg = Color::Indexed((value - 90 + 8) as u8),
            100..=107 => pen.bg = Color::Indexed((value - 100 + 8) as u8),
            _ => tracing::debug!("Unknown SGR parameter: {}", value),
        }
        i += 1;
    }
}

/// Parse the color following 38/48/58 at `index` and store it
///
/// Returns how many extra `;`-separated parameters were consumed.
fn extended_color(pen: &mut CellAttributes, params: &Params, index: usize, slot: Slot) -> usize {
    let sub = params.subparams(index);
    let (color, consumed) = if sub.is_empty() {
        semicolon_color(params, index)
    } else {
        (colon_color(sub), 0)
    };

    match color {
        Some(color) => match slot {
            Slot::Foreground => pen.fg = color,
            Slot::Background => pen.bg = color,
            Slot::Underline => pen.underline_color = color,
        },
        None => tracing::debug!("Malformed extended color at SGR parameter {}", index),
    }
    consumed
}

/// `38;5;n` or `38;2;r;g;b`
fn semicolon_color(params: &Params, index: usize) -> (Option<Color>, usize) {
    let remaining = params.len() - index - 1;
    match params.raw(index + 1) {
        5 if remaining >= 2 => (indexed(params.raw(index + 2)), 2),
        2 if remaining >= 4 => (
            rgb(
                params.raw(index + 2),
                params.raw(index + 3),
                params.raw(index + 4),
            ),
            4,
        ),
        // Truncated or unknown color space: swallow the rest
        _ => (None, remaining),
    }
}

/// `38:5:n`, `38:2:r:g:b` or `38:2:cs:r:g:b`
fn colon_color(sub: &[u16]) -> Option<Color> {
    match sub {
        [5, n, ..] => indexed(*n),
        [2, _, r, g, b, ..] => rgb(*r, *g, *b),
        [2, r, g, b] => rgb(*r, *g, *b),
        _ => None,
    }
}

fn indexed(n: u16) -> Option<Color> {
    u8::try_from(n).ok().map(Color::Indexed)
}

fn rgb(r: u16, g: u16, b: u16) -> Option<Color> {
    Some(Color::rgb(
        u8::try_from(r).ok()?,
        u8::try_from(g).ok()?,
        u8::try_from(b).ok()?,
    ))
}
