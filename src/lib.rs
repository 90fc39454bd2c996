//! vtgrid - headless VT/xterm terminal emulation engine
//!
//! Feed the byte stream an application writes to its terminal into
//! [`Terminal::write`] and read back the resulting character grid:
//!
//! - `vtgrid_parser`: streaming UTF-8 decoder and escape sequence state machine
//! - `vtgrid_core`: screen model, cells, cursor, scrollback, dirty tracking
//! - this crate: action dispatch, SGR handling, configuration and the read API
//!
//! ```
//! use vtgrid::Terminal;
//!
//! let mut term = Terminal::new(80, 24).unwrap();
//! term.write(b"A\x1b[31mB\x1b[0mC");
//! assert_eq!(term.line_text(0).unwrap(), "ABC");
//! assert_eq!((term.cursor_x(), term.cursor_y()), (3, 0));
//! ```

mod cell_data;
mod config;
mod error;
mod sgr;
mod terminal;

pub use cell_data::CellData;
pub use config::{TerminalConfig, PALETTE_SIZE};
pub use error::{Error, Result};
pub use sgr::apply_sgr;
pub use terminal::{dispatch, Terminal};

pub use vtgrid_core as core;
pub use vtgrid_parser as parser;
