//! Terminal escape sequence parser
//!
//! Implements a state machine parser based on the VT500 series parser model.
//! Reference: https://vt100.net/emu/dec_ansi_parser
//!
//! Input is first run through the streaming UTF-8 decoder, so the state
//! machine sees either C0 controls, C1 controls (decoded U+0080..U+009F) or
//! printable scalars. Error recovery is local: a control that arrives in the
//! middle of a sequence cancels the sequence and is executed from Ground, and
//! no byte sequence can leave the parser stuck outside Ground.

use crate::action::{Action, CsiAction, DcsAction, EscAction, OscAction, StringKind};
use crate::params::Params;
use crate::utf8::{Utf8Decoder, Utf8Result, REPLACEMENT_CHAR};

/// Maximum length for OSC/DCS/SOS/PM/APC payloads; excess is dropped
pub const MAX_STRING_LEN: usize = 65536;
/// Maximum number of intermediate bytes before a sequence is ignored
const MAX_INTERMEDIATES: usize = 4;
/// Maximum raw parameter bytes before a sequence is ignored
const MAX_PARAM_BYTES: usize = 256;

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Normal text processing
    Ground,
    /// After ESC
    Escape,
    /// ESC followed by intermediate bytes
    EscapeIntermediate,
    /// After ESC [
    CsiEntry,
    /// Collecting CSI parameters
    CsiParam,
    /// Collecting CSI intermediate bytes
    CsiIntermediate,
    /// Malformed CSI, consume until final byte
    CsiIgnore,
    /// After ESC ]
    OscString,
    /// After ESC P
    DcsEntry,
    /// Collecting DCS parameters
    DcsParam,
    /// Collecting DCS intermediate bytes
    DcsIntermediate,
    /// Collecting DCS payload
    DcsPassthrough,
    /// Malformed DCS, consume until ST
    DcsIgnore,
    /// After ESC X, ESC ^ or ESC _
    SosPmApcString,
}

/// The terminal parser
#[derive(Debug, Clone)]
pub struct Parser {
    state: ParserState,
    utf8: Utf8Decoder,
    /// Raw CSI/DCS parameter bytes
    params_buf: Vec<u8>,
    /// CSI/DCS/ESC intermediate bytes
    intermediates: Vec<u8>,
    /// CSI private marker byte (0 = none)
    marker: u8,
    /// DCS final byte
    dcs_final: u8,
    /// OSC/DCS/SOS/PM/APC payload
    string_data: String,
    string_kind: StringKind,
}

impl Parser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            state: ParserState::Ground,
            utf8: Utf8Decoder::new(),
            params_buf: Vec::with_capacity(32),
            intermediates: Vec::with_capacity(MAX_INTERMEDIATES),
            marker: 0,
            dcs_final: 0,
            string_data: String::new(),
            string_kind: StringKind::Sos,
        }
    }

    /// Get current parser state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Reset parser to ground state, dropping any partial input
    pub fn reset(&mut self) {
        self.state = ParserState::Ground;
        self.utf8.reset();
        self.clear_sequence();
    }

    /// Parse a chunk of bytes, calling the callback for each action
    ///
    /// Partial UTF-8 and escape sequences at the end of `data` are kept and
    /// completed by the next call.
    pub fn parse<F>(&mut self, data: &[u8], mut callback: F)
    where
        F: FnMut(Action),
    {
        for &byte in data {
            self.advance(byte, &mut callback);
        }
    }

    /// Parse a chunk and collect actions into a vector
    pub fn parse_collect(&mut self, data: &[u8]) -> Vec<Action> {
        let mut actions = Vec::new();
        self.parse(data, |action| actions.push(action));
        actions
    }

    fn advance<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match self.utf8.feed(byte) {
            Utf8Result::Pending => {}
            Utf8Result::Char(c) => self.advance_char(c, callback),
            Utf8Result::Invalid => self.advance_char(REPLACEMENT_CHAR, callback),
            Utf8Result::InvalidRetry => {
                self.advance_char(REPLACEMENT_CHAR, callback);
                // The decoder is empty again, so this cannot retry twice
                self.advance(byte, callback);
            }
        }
    }

    fn advance_char<F>(&mut self, c: char, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match u32::from(c) {
            cp @ 0x00..=0x1F => self.handle_c0(cp as u8, callback),
            0x7F => {}
            cp @ 0x80..=0x9F => self.handle_c1(cp as u8, callback),
            _ => self.handle_char(c, callback),
        }
    }

    fn handle_c0<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            0x1B => {
                self.finish_string(callback);
                self.enter_escape();
            }
            0x18 | 0x1A => {
                // CAN, SUB - cancel whatever is in progress
                self.clear_sequence();
                self.state = ParserState::Ground;
                callback(Action::Execute(byte));
            }
            _ => match self.state {
                ParserState::Ground => callback(Action::Execute(byte)),
                ParserState::OscString if byte == 0x07 => {
                    // BEL terminates OSC (xterm extension)
                    self.finish_string(callback);
                    self.state = ParserState::Ground;
                }
                ParserState::DcsPassthrough | ParserState::SosPmApcString => {
                    self.push_string_char(char::from(byte));
                }
                ParserState::DcsIgnore => {}
                _ => {
                    log::trace!("C0 {:#04x} aborted sequence in {:?}", byte, self.state);
                    self.clear_sequence();
                    self.state = ParserState::Ground;
                    callback(Action::Execute(byte));
                }
            },
        }
    }

    fn handle_c1<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        if byte == 0x9C {
            // ST
            self.finish_string(callback);
            self.state = ParserState::Ground;
            return;
        }

        self.clear_sequence();
        self.state = ParserState::Ground;
        let esc = match byte {
            0x90 => return self.enter_dcs(),
            0x9B => return self.enter_csi(),
            0x9D => return self.enter_osc(),
            0x98 => return self.enter_string(StringKind::Sos),
            0x9E => return self.enter_string(StringKind::Pm),
            0x9F => return self.enter_string(StringKind::Apc),
            0x84 => EscAction::Index,
            0x85 => EscAction::NextLine,
            0x88 => EscAction::HorizontalTabSet,
            0x8D => EscAction::ReverseIndex,
            0x8E => EscAction::SingleShift2,
            0x8F => EscAction::SingleShift3,
            _ => {
                log::debug!("Ignoring C1 control {:#04x}", byte);
                return;
            }
        };
        callback(Action::EscDispatch(esc));
    }

    fn handle_char<F>(&mut self, c: char, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match self.state {
            ParserState::Ground => callback(Action::Print(c)),
            ParserState::OscString
            | ParserState::DcsPassthrough
            | ParserState::SosPmApcString => self.push_string_char(c),
            ParserState::DcsIgnore => {}
            state => {
                // Every remaining state only understands 7-bit bytes
                let Ok(byte) = u8::try_from(c) else {
                    self.state = match state {
                        ParserState::Escape | ParserState::EscapeIntermediate => {
                            ParserState::Ground
                        }
                        ParserState::DcsEntry
                        | ParserState::DcsParam
                        | ParserState::DcsIntermediate => ParserState::DcsIgnore,
                        _ => ParserState::CsiIgnore,
                    };
                    return;
                };
                match state {
                    ParserState::Escape => self.handle_escape(byte, callback),
                    ParserState::EscapeIntermediate => {
                        self.handle_escape_intermediate(byte, callback)
                    }
                    ParserState::CsiEntry => self.handle_csi_entry(byte, callback),
                    ParserState::CsiParam => self.handle_csi_param(byte, callback),
                    ParserState::CsiIntermediate => self.handle_csi_intermediate(byte, callback),
                    ParserState::CsiIgnore => {
                        if (0x40..=0x7E).contains(&byte) {
                            self.state = ParserState::Ground;
                        }
                    }
                    ParserState::DcsEntry => self.handle_dcs_entry(byte),
                    ParserState::DcsParam => self.handle_dcs_param(byte),
                    ParserState::DcsIntermediate => self.handle_dcs_intermediate(byte),
                    _ => {}
                }
            }
        }
    }

    fn clear_sequence(&mut self) {
        self.params_buf.clear();
        self.intermediates.clear();
        self.marker = 0;
        self.dcs_final = 0;
        self.string_data.clear();
    }

    fn enter_escape(&mut self) {
        self.clear_sequence();
        self.state = ParserState::Escape;
    }

    fn handle_escape<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            b'[' => self.enter_csi(),
            b']' => self.enter_osc(),
            b'P' => self.enter_dcs(),
            b'X' => self.enter_string(StringKind::Sos),
            b'^' => self.enter_string(StringKind::Pm),
            b'_' => self.enter_string(StringKind::Apc),
            b'\\' => {
                // ST with nothing to terminate
                self.state = ParserState::Ground;
            }
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = ParserState::EscapeIntermediate;
            }
            _ => {
                self.dispatch_esc(byte, callback);
                self.state = ParserState::Ground;
            }
        }
    }

    fn handle_escape_intermediate<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            0x20..=0x2F => {
                if self.intermediates.len() < MAX_INTERMEDIATES {
                    self.intermediates.push(byte);
                }
            }
            _ => {
                self.dispatch_esc(byte, callback);
                self.state = ParserState::Ground;
            }
        }
    }

    fn dispatch_esc<F>(&mut self, final_byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        let action = match (self.intermediates.as_slice(), final_byte) {
            ([], b'7') => EscAction::SaveCursor,
            ([], b'8') => EscAction::RestoreCursor,
            ([], b'D') => EscAction::Index,
            ([], b'M') => EscAction::ReverseIndex,
            ([], b'E') => EscAction::NextLine,
            ([], b'H') => EscAction::HorizontalTabSet,
            ([], b'c') => EscAction::FullReset,
            ([], b'=') => EscAction::ApplicationKeypad,
            ([], b'>') => EscAction::NormalKeypad,
            ([], b'N') => EscAction::SingleShift2,
            ([], b'O') => EscAction::SingleShift3,
            ([b'('], c) => EscAction::Designate {
                slot: 0,
                charset: char::from(c),
            },
            ([b')' | b'-'], c) => EscAction::Designate {
                slot: 1,
                charset: char::from(c),
            },
            ([b'*' | b'.'], c) => EscAction::Designate {
                slot: 2,
                charset: char::from(c),
            },
            ([b'+' | b'/'], c) => EscAction::Designate {
                slot: 3,
                charset: char::from(c),
            },
            ([b'#'], b'8') => EscAction::DecAlignmentTest,
            (intermediates, final_byte) => EscAction::Unknown {
                intermediates: intermediates.to_vec(),
                final_byte,
            },
        };
        callback(Action::EscDispatch(action));
    }

    fn enter_csi(&mut self) {
        self.clear_sequence();
        self.state = ParserState::CsiEntry;
    }

    fn push_param_byte(&mut self, byte: u8, ignore_state: ParserState) {
        if self.params_buf.len() < MAX_PARAM_BYTES {
            self.params_buf.push(byte);
        } else {
            self.state = ignore_state;
        }
    }

    fn handle_csi_entry<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            b'<'..=b'?' => {
                self.marker = byte;
                self.state = ParserState::CsiParam;
            }
            _ => self.handle_csi_param(byte, callback),
        }
    }

    fn handle_csi_param<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            b'0'..=b'9' | b';' | b':' => {
                self.state = ParserState::CsiParam;
                self.push_param_byte(byte, ParserState::CsiIgnore);
            }
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = ParserState::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.dispatch_csi(byte, callback);
                self.state = ParserState::Ground;
            }
            _ => {
                // Private marker in wrong position
                self.state = ParserState::CsiIgnore;
            }
        }
    }

    fn handle_csi_intermediate<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            0x20..=0x2F if self.intermediates.len() < MAX_INTERMEDIATES => {
                self.intermediates.push(byte);
            }
            0x40..=0x7E => {
                self.dispatch_csi(byte, callback);
                self.state = ParserState::Ground;
            }
            _ => {
                self.state = ParserState::CsiIgnore;
            }
        }
    }

    fn dispatch_csi<F>(&mut self, final_byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        let action = CsiAction {
            params: Params::parse(&self.params_buf),
            intermediates: std::mem::take(&mut self.intermediates),
            final_byte,
            marker: self.marker,
        };
        self.params_buf.clear();
        callback(Action::CsiDispatch(action));
    }

    fn enter_osc(&mut self) {
        self.clear_sequence();
        self.state = ParserState::OscString;
    }

    fn enter_dcs(&mut self) {
        self.clear_sequence();
        self.state = ParserState::DcsEntry;
    }

    fn handle_dcs_entry(&mut self, byte: u8) {
        match byte {
            b'<'..=b'?' => {
                self.marker = byte;
                self.state = ParserState::DcsParam;
            }
            _ => self.handle_dcs_param(byte),
        }
    }

    fn handle_dcs_param(&mut self, byte: u8) {
        match byte {
            b'0'..=b'9' | b';' | b':' => {
                self.state = ParserState::DcsParam;
                self.push_param_byte(byte, ParserState::DcsIgnore);
            }
            0x20..=0x2F => {
                self.intermediates.push(byte);
                self.state = ParserState::DcsIntermediate;
            }
            0x40..=0x7E => {
                self.dcs_final = byte;
                self.state = ParserState::DcsPassthrough;
            }
            _ => {
                self.state = ParserState::DcsIgnore;
            }
        }
    }

    fn handle_dcs_intermediate(&mut self, byte: u8) {
        match byte {
            0x20..=0x2F if self.intermediates.len() < MAX_INTERMEDIATES => {
                self.intermediates.push(byte);
            }
            0x40..=0x7E => {
                self.dcs_final = byte;
                self.state = ParserState::DcsPassthrough;
            }
            _ => {
                self.state = ParserState::DcsIgnore;
            }
        }
    }

    fn enter_string(&mut self, kind: StringKind) {
        self.clear_sequence();
        self.string_kind = kind;
        self.state = ParserState::SosPmApcString;
    }

    fn push_string_char(&mut self, c: char) {
        if self.string_data.len() + c.len_utf8() <= MAX_STRING_LEN {
            self.string_data.push(c);
        }
    }

    /// Dispatch the payload of a string state; no-op in any other state
    fn finish_string<F>(&mut self, callback: &mut F)
    where
        F: FnMut(Action),
    {
        let action = match self.state {
            ParserState::OscString => Action::OscDispatch(OscAction::parse(&self.string_data)),
            ParserState::DcsPassthrough => Action::DcsDispatch(DcsAction {
                params: Params::parse(&self.params_buf),
                intermediates: std::mem::take(&mut self.intermediates),
                final_byte: self.dcs_final,
                data: std::mem::take(&mut self.string_data),
            }),
            ParserState::SosPmApcString => Action::StringDispatch {
                kind: self.string_kind,
                data: std::mem::take(&mut self.string_data),
            },
            _ => return,
        };
        self.clear_sequence();
        callback(action);
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_csi(actions: &[Action]) -> &CsiAction {
        assert_eq!(actions.len(), 1, "expected one action, got {:?}", actions);
        match &actions[0] {
            Action::CsiDispatch(csi) => csi,
            other => panic!("Expected CSI action, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_print() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"Hello");

        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], Action::Print('H'));
        assert_eq!(actions[4], Action::Print('o'));
    }

    #[test]
    fn test_parser_execute() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x07\x08\x09\x0A\x0D\x0E\x0F");

        let bytes: Vec<u8> = actions
            .iter()
            .map(|a| match a {
                Action::Execute(b) => *b,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(bytes, vec![0x07, 0x08, 0x09, 0x0A, 0x0D, 0x0E, 0x0F]);
    }

    #[test]
    fn test_parser_csi_cursor() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[10;20H");
        let csi = single_csi(&actions);

        assert_eq!(csi.final_byte, b'H');
        assert_eq!(csi.param(0, 1), 10);
        assert_eq!(csi.param(1, 1), 20);
        assert_eq!(csi.marker, 0);
    }

    #[test]
    fn test_parser_csi_private() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[?1049h");
        let csi = single_csi(&actions);

        assert!(csi.is_private(b'h'));
        assert_eq!(csi.param(0, 0), 1049);
    }

    #[test]
    fn test_parser_csi_intermediate() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[4 q");
        let csi = single_csi(&actions);

        assert_eq!(csi.intermediates, vec![b' ']);
        assert_eq!(csi.final_byte, b'q');
        assert_eq!(csi.param(0, 0), 4);
    }

    #[test]
    fn test_parser_csi_sgr_subparams() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[1;38:2::10:20:30m");
        let csi = single_csi(&actions);

        assert_eq!(csi.params.len(), 2);
        assert_eq!(csi.params.raw(1), 38);
        assert_eq!(csi.params.subparams(1), &[2, 0, 10, 20, 30]);
    }

    #[test]
    fn test_parser_marker_in_wrong_position_ignored() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[1?2hA");
        assert_eq!(actions, vec![Action::Print('A')]);
    }

    #[test]
    fn test_parser_control_aborts_csi() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[1\n31mX");

        assert_eq!(
            actions,
            vec![
                Action::Execute(b'\n'),
                Action::Print('3'),
                Action::Print('1'),
                Action::Print('m'),
                Action::Print('X'),
            ]
        );
        assert_eq!(parser.state(), ParserState::Ground);
    }

    #[test]
    fn test_parser_can_aborts_sequence() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b[31\x18A");
        assert_eq!(actions, vec![Action::Execute(0x18), Action::Print('A')]);
    }

    #[test]
    fn test_parser_esc_sequences() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b7\x1b8\x1bD\x1bM\x1bE\x1b#8\x1b(0");

        assert_eq!(
            actions,
            vec![
                Action::EscDispatch(EscAction::SaveCursor),
                Action::EscDispatch(EscAction::RestoreCursor),
                Action::EscDispatch(EscAction::Index),
                Action::EscDispatch(EscAction::ReverseIndex),
                Action::EscDispatch(EscAction::NextLine),
                Action::EscDispatch(EscAction::DecAlignmentTest),
                Action::EscDispatch(EscAction::Designate {
                    slot: 0,
                    charset: '0'
                }),
            ]
        );
    }

    #[test]
    fn test_parser_osc_bel_and_st() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b]0;My Title\x07\x1b]2;Other\x1b\\A");

        assert_eq!(
            actions,
            vec![
                Action::OscDispatch(OscAction::SetIconAndTitle("My Title".to_string())),
                Action::OscDispatch(OscAction::SetTitle("Other".to_string())),
                Action::Print('A'),
            ]
        );
    }

    #[test]
    fn test_parser_osc_utf8_payload() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect("\x1b]2;日本\x07".as_bytes());
        assert_eq!(
            actions,
            vec![Action::OscDispatch(OscAction::SetTitle("日本".to_string()))]
        );
    }

    #[test]
    fn test_parser_osc_length_capped() {
        let mut parser = Parser::new();
        let mut input = b"\x1b]2;".to_vec();
        input.extend(std::iter::repeat(b'x').take(MAX_STRING_LEN + 100));
        input.push(0x07);
        let actions = parser.parse_collect(&input);

        match &actions[..] {
            [Action::OscDispatch(OscAction::SetTitle(title))] => {
                assert_eq!(title.len(), MAX_STRING_LEN - 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parser_dcs_passthrough() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1bP1$qm\x1b\\");

        assert_eq!(
            actions,
            vec![Action::DcsDispatch(DcsAction {
                params: Params::parse(b"1"),
                intermediates: vec![b'$'],
                final_byte: b'q',
                data: "m".to_string(),
            })]
        );
    }

    #[test]
    fn test_parser_apc_consumed() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\x1b_Gf=100;AAAA\x1b\\ok");

        assert_eq!(
            actions,
            vec![
                Action::StringDispatch {
                    kind: StringKind::Apc,
                    data: "Gf=100;AAAA".to_string()
                },
                Action::Print('o'),
                Action::Print('k'),
            ]
        );
    }

    #[test]
    fn test_parser_c1_csi() {
        // U+009B encoded as UTF-8
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\xc2\x9b5A");
        let csi = single_csi(&actions);
        assert!(csi.is(b'A'));
        assert_eq!(csi.param(0, 1), 5);
    }

    #[test]
    fn test_parser_c1_index() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\xc2\x84");
        assert_eq!(actions, vec![Action::EscDispatch(EscAction::Index)]);
    }

    #[test]
    fn test_parser_utf8() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect("Hi 世界 🎉".as_bytes());

        let chars: Vec<char> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Print(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(chars, vec!['H', 'i', ' ', '世', '界', ' ', '🎉']);
    }

    #[test]
    fn test_parser_invalid_utf8_then_escape() {
        let mut parser = Parser::new();
        let actions = parser.parse_collect(b"\xe4\xb8\x1b[2J");

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], Action::Print(REPLACEMENT_CHAR));
        assert!(single_csi(&actions[1..]).is(b'J'));
    }

    #[test]
    fn test_parser_streaming() {
        let mut parser = Parser::new();

        assert!(parser.parse_collect(b"\x1b[10").is_empty());
        let actions = parser.parse_collect(b";20H");
        let csi = single_csi(&actions);
        assert_eq!(csi.param(0, 1), 10);
        assert_eq!(csi.param(1, 1), 20);
    }

    #[test]
    fn test_parser_streaming_utf8() {
        let mut parser = Parser::new();

        // '中' = 0xE4 0xB8 0xAD
        assert!(parser.parse_collect(&[0xE4]).is_empty());
        assert!(parser.parse_collect(&[0xB8]).is_empty());
        assert_eq!(parser.parse_collect(&[0xAD]), vec![Action::Print('中')]);
    }

    #[test]
    fn test_parser_reset() {
        let mut parser = Parser::new();

        parser.parse_collect(b"\x1b[10");
        assert_eq!(parser.state(), ParserState::CsiParam);

        parser.reset();
        assert_eq!(parser.state(), ParserState::Ground);
        assert_eq!(parser.parse_collect(b"A"), vec![Action::Print('A')]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn terminal_bytes() -> impl Strategy<Value = Vec<u8>> {
            let fragments = prop_oneof![
                Just(b"\x1b[".to_vec()),
                Just(b"\x1b]".to_vec()),
                Just(b"\x1bP".to_vec()),
                Just(b"\x1b\\".to_vec()),
                Just("é中😀".as_bytes().to_vec()),
                proptest::collection::vec(any::<u8>(), 1..8),
                proptest::collection::vec(0x20u8..0x7f, 1..8),
            ];
            proptest::collection::vec(fragments, 0..24).prop_map(|v| v.concat())
        }

        proptest! {
            #[test]
            fn split_writes_produce_same_actions(
                data in terminal_bytes(),
                cut in any::<prop::sample::Index>(),
            ) {
                let whole = Parser::new().parse_collect(&data);

                let at = if data.is_empty() { 0 } else { cut.index(data.len() + 1) };
                let mut parser = Parser::new();
                let mut split = parser.parse_collect(&data[..at]);
                split.extend(parser.parse_collect(&data[at..]));

                prop_assert_eq!(whole, split);
            }

            #[test]
            fn garbage_never_sticks(data in proptest::collection::vec(any::<u8>(), 0..256)) {
                let mut parser = Parser::new();
                parser.parse_collect(&data);
                // CAN always returns to ground and the next char prints
                let tail = parser.parse_collect(b"\x18Z");
                prop_assert_eq!(tail.last(), Some(&Action::Print('Z')));
            }
        }
    }
}
