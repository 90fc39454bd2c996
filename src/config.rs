//! Construction-time configuration for a terminal
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! scrollback_limit = 5000
//! foreground = "#d0d0d0"
//! background = "#101010"
//! palette = ["#000000", "#ff5555"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use vtgrid_core::{Palette, Rgb, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SCROLLBACK_LIMIT};

use crate::error::{Error, Result};

/// Number of indexed palette entries that can be overridden
pub const PALETTE_SIZE: usize = 256;

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    /// Maximum scrollback lines (0 = unbounded)
    pub scrollback_limit: usize,
    /// Color that default-foreground cells resolve to
    pub foreground: Rgb,
    /// Color that default-background cells resolve to
    pub background: Rgb,
    /// Overrides for palette entries 0..n
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<Rgb>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            scrollback_limit: DEFAULT_SCROLLBACK_LIMIT,
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            palette: Vec::new(),
        }
    }
}

impl TerminalConfig {
    /// Build from packed `0xRRGGBB` colors, where 0 selects the default color
    pub fn from_raw(scrollback_limit: usize, fg_color: u32, bg_color: u32) -> Self {
        let pick = |raw: u32, default: Rgb| {
            if raw == 0 {
                default
            } else {
                Rgb::from_u32(raw)
            }
        };
        Self {
            scrollback_limit,
            foreground: pick(fg_color, DEFAULT_FOREGROUND),
            background: pick(bg_color, DEFAULT_BACKGROUND),
            palette: Vec::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TerminalConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.len() > PALETTE_SIZE {
            return Err(Error::Config {
                field: "palette",
                message: format!(
                    "{} entries given, at most {} allowed",
                    self.palette.len(),
                    PALETTE_SIZE
                ),
            });
        }
        Ok(())
    }

    /// The palette this configuration describes
    pub fn palette(&self) -> Palette {
        Palette::new(self.foreground, self.background).with_overrides(&self.palette)
    }
}
