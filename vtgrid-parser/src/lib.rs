//! vtgrid-parser - VT/xterm escape sequence parser
//!
//! This crate implements a streaming parser for terminal escape sequences.
//! It converts a byte stream into semantic terminal actions.
//!
//! The parser is designed to:
//! - Handle arbitrary chunk boundaries (streaming)
//! - Decode UTF-8 with one replacement character per maximal invalid subpart
//! - Recover locally from malformed or interrupted sequences
//! - Parse CSI, OSC, ESC and DCS sequences, and consume SOS/PM/APC strings
//!
//! Reference: https://www.x.org/docs/xterm/ctlseqs.pdf

mod action;
mod params;
mod parser;
mod utf8;

pub use action::{Action, CsiAction, DcsAction, EscAction, OscAction, StringKind};
pub use params::{Params, MAX_PARAMS};
pub use parser::{Parser, ParserState, MAX_STRING_LEN};
pub use utf8::{Utf8Decoder, Utf8Result, REPLACEMENT_CHAR};
