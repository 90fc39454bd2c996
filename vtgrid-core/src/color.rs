//! Color representation and palette resolution
//!
//! Supports:
//! - Default foreground/background (resolved when read)
//! - 256-color xterm palette (0-255), redefinable per terminal
//! - 24-bit true color (RGB)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default foreground when none is configured
pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(0xe5, 0xe5, 0xe5);
/// Default background when none is configured
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// A color string that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #rgb or #rrggbb")]
pub struct ParseColorError(pub String);

/// A fully resolved 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`; the top byte is ignored
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Pack as `0xRRGGBB`
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#rgb` (each digit doubled) or `#rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize, n: usize| u8::from_str_radix(&hex[i * n..(i + 1) * n], 16);
        match hex.len() {
            3 => {
                let (r, g, b) = (channel(0, 1), channel(1, 1), channel(2, 1));
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r * 17, g * 17, b * 17)),
                    _ => Err(err()),
                }
            }
            6 => match (channel(0, 2), channel(1, 2), channel(2, 2)) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
                _ => Err(err()),
            },
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Parse an X11 color spec as used by OSC 4/10/11
///
/// Accepts `rgb:r/g/b` with 1-4 hex digits per channel (scaled to 8 bits)
/// and `#` followed by 3, 6, 9 or 12 hex digits (most significant bits kept).
pub fn parse_color_spec(spec: &str) -> Option<Rgb> {
    fn hex(s: &str) -> Option<u32> {
        if s.is_empty() || s.len() > 4 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(s, 16).ok()
    }

    let spec = spec.trim();
    if let Some(rest) = spec.strip_prefix("rgb:") {
        let mut channels = [0u8; 3];
        let mut parts = rest.split('/');
        for channel in &mut channels {
            let part = parts.next()?;
            let max = (1u32 << (4 * part.len())) - 1;
            *channel = (hex(part)? * 255 / max) as u8;
        }
        if parts.next().is_some() {
            return None;
        }
        return Some(Rgb::new(channels[0], channels[1], channels[2]));
    }

    let digits = spec.strip_prefix('#')?;
    let width = match digits.len() {
        3 | 6 | 9 | 12 => digits.len() / 3,
        _ => return None,
    };
    let mut channels = [0u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let value = hex(&digits[i * width..(i + 1) * width])?;
        // Left-align to 16 bits, keep the top 8
        *channel = ((value << (16 - 4 * width)) >> 8) as u8;
    }
    Some(Rgb::new(channels[0], channels[1], channels[2]))
}

/// Color as selected by SGR and stored in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Indexed color (0-255)
    /// 0-7: standard colors
    /// 8-15: bright colors
    /// 16-231: 6x6x6 color cube
    /// 232-255: grayscale
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(Rgb),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(Rgb::new(r, g, b))
    }
}

/// The stock xterm value of a 256-color palette index
pub fn xterm_color(index: u8) -> Rgb {
    const ANSI: [Rgb; 16] = [
        Rgb::new(0, 0, 0),
        Rgb::new(205, 0, 0),
        Rgb::new(0, 205, 0),
        Rgb::new(205, 205, 0),
        Rgb::new(0, 0, 238),
        Rgb::new(205, 0, 205),
        Rgb::new(0, 205, 205),
        Rgb::new(229, 229, 229),
        Rgb::new(127, 127, 127),
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(255, 255, 0),
        Rgb::new(92, 92, 255),
        Rgb::new(255, 0, 255),
        Rgb::new(0, 255, 255),
        Rgb::new(255, 255, 255),
    ];

    match index {
        0..=15 => ANSI[usize::from(index)],
        16..=231 => {
            let idx = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Rgb::new(level(idx / 36), level((idx % 36) / 6), level(idx % 6))
        }
        232..=255 => {
            let gray = 8 + (index - 232) * 10;
            Rgb::new(gray, gray, gray)
        }
    }
}

/// Per-terminal color table
///
/// Keeps the configured values next to the live ones so OSC 104/110/111
/// can restore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
    base_colors: [Rgb; 256],
    foreground: Rgb,
    background: Rgb,
    base_foreground: Rgb,
    base_background: Rgb,
}

impl Palette {
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        let mut colors = [Rgb::default(); 256];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = xterm_color(i as u8);
        }
        Self {
            colors,
            base_colors: colors,
            foreground,
            background,
            base_foreground: foreground,
            base_background: background,
        }
    }

    /// Replace the configured values of entries `0..overrides.len()`
    pub fn with_overrides(mut self, overrides: &[Rgb]) -> Self {
        for (i, &color) in overrides.iter().take(256).enumerate() {
            self.base_colors[i] = color;
            self.colors[i] = color;
        }
        self
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.colors[usize::from(index)]
    }

    pub fn set(&mut self, index: u8, color: Rgb) {
        self.colors[usize::from(index)] = color;
    }

    pub fn reset(&mut self, index: u8) {
        let i = usize::from(index);
        self.colors[i] = self.base_colors[i];
    }

    pub fn reset_all(&mut self) {
        self.colors = self.base_colors;
        self.foreground = self.base_foreground;
        self.background = self.base_background;
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn set_foreground(&mut self, color: Rgb) {
        self.foreground = color;
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.background = color;
    }

    pub fn reset_foreground(&mut self) {
        self.foreground = self.base_foreground;
    }

    pub fn reset_background(&mut self) {
        self.background = self.base_background;
    }

    /// Turn an indexed color into RGB, leaving default and RGB untouched
    pub fn resolve(&self, color: Color) -> Color {
        match color {
            Color::Indexed(index) => Color::Rgb(self.get(index)),
            other => other,
        }
    }

    /// Final RGB for a foreground color
    pub fn foreground_rgb(&self, color: Color) -> Rgb {
        match color {
            Color::Default => self.foreground,
            Color::Indexed(index) => self.get(index),
            Color::Rgb(rgb) => rgb,
        }
    }

    /// Final RGB for a background color
    pub fn background_rgb(&self, color: Color) -> Rgb {
        match color {
            Color::Default => self.background,
            Color::Indexed(index) => self.get(index),
            Color::Rgb(rgb) => rgb,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_FOREGROUND, DEFAULT_BACKGROUND)
    }
}
