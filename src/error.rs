//! Error types for the terminal engine

use std::collections::TryReserveError;

/// Errors reported by [`Terminal`](crate::Terminal) and configuration loading
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid dimensions {cols}x{rows}: both must be at least 1")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("failed to allocate terminal storage: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("row {row} out of range (rows: {rows})")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("scrollback line {index} out of range (len: {len})")]
    ScrollbackOutOfRange { index: usize, len: usize },

    #[error("buffer too small: need {needed} cells, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    #[error("invalid config value for {field}: {message}")]
    Config { field: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
