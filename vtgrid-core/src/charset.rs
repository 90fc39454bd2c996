//! Character set handling for terminal emulation
//!
//! Supports DEC Special Graphics (line drawing) and the UK national set,
//! designated into G0-G3 and invoked with SO/SI or a single shift.

use serde::{Deserialize, Serialize};

/// Character set designations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Charset {
    /// ASCII (US) - default
    #[default]
    Ascii,
    /// DEC Special Graphics (line drawing characters)
    DecSpecialGraphics,
    /// UK character set
    Uk,
}

impl Charset {
    /// Map the final byte of a designation sequence (`ESC ( 0` etc.)
    pub fn from_designation(c: char) -> Self {
        match c {
            '0' | '2' => Charset::DecSpecialGraphics,
            'A' => Charset::Uk,
            'B' | '@' => Charset::Ascii,
            other => {
                log::debug!("Unknown charset designation {:?}, using ASCII", other);
                Charset::Ascii
            }
        }
    }

    /// Translate a character through this set
    pub fn map(self, c: char) -> char {
        match self {
            Charset::Ascii => c,
            Charset::Uk if c == '#' => '£',
            Charset::Uk => c,
            Charset::DecSpecialGraphics => match c {
                '_'..='~' => DEC_SPECIAL_GRAPHICS[c as usize - '_' as usize],
                _ => c,
            },
        }
    }
}

/// Glyphs for 0x5F..=0x7E in DEC Special Graphics
const DEC_SPECIAL_GRAPHICS: [char; 32] = [
    '\u{00A0}', '◆', '▒', '␉', '␌', '␍', '␊', '°', '±', '␤', '␋', '┘', '┐', '┌', '└', '┼',
    '⎺', '⎻', '─', '⎼', '⎽', '├', '┤', '┴', '┬', '│', '≤', '≥', 'π', '≠', '£', '·',
];

/// G0-G3 designations plus the shift state selecting among them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetState {
    slots: [Charset; 4],
    /// Slot invoked into GL (0 after SI, 1 after SO)
    gl: u8,
    /// Slot used for the next printed character only (SS2/SS3)
    single_shift: Option<u8>,
}

impl CharsetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Designate `charset` into slot 0-3; other slots are ignored
    pub fn designate(&mut self, slot: u8, charset: Charset) {
        if let Some(entry) = self.slots.get_mut(usize::from(slot)) {
            *entry = charset;
        }
    }

    pub fn slot(&self, slot: u8) -> Charset {
        self.slots.get(usize::from(slot)).copied().unwrap_or_default()
    }

    /// Shift In (SI) - select G0 into GL
    pub fn shift_in(&mut self) {
        self.gl = 0;
    }

    /// Shift Out (SO) - select G1 into GL
    pub fn shift_out(&mut self) {
        self.gl = 1;
    }

    /// SS2 (slot 2) or SS3 (slot 3) for the next character
    pub fn single_shift(&mut self, slot: u8) {
        self.single_shift = Some(slot);
    }

    /// Translate one printed character, consuming any pending single shift
    pub fn translate(&mut self, c: char) -> char {
        let slot = self.single_shift.take().unwrap_or(self.gl);
        self.slot(slot).map(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_default() {
        let mut state = CharsetState::new();
        assert_eq!(state.slot(0), Charset::Ascii);
        assert_eq!(state.translate('q'), 'q');
    }

    #[test]
    fn test_dec_special_graphics() {
        let dec = Charset::DecSpecialGraphics;
        assert_eq!(dec.map('j'), '┘');
        assert_eq!(dec.map('k'), '┐');
        assert_eq!(dec.map('l'), '┌');
        assert_eq!(dec.map('m'), '└');
        assert_eq!(dec.map('q'), '─');
        assert_eq!(dec.map('x'), '│');
        assert_eq!(dec.map('~'), '·');
        assert_eq!(dec.map('A'), 'A');
    }

    #[test]
    fn test_uk_pound() {
        assert_eq!(Charset::Uk.map('#'), '£');
        assert_eq!(Charset::Uk.map('a'), 'a');
    }

    #[test]
    fn test_shift_in_out() {
        let mut state = CharsetState::new();
        state.designate(1, Charset::from_designation('0'));

        assert_eq!(state.translate('q'), 'q');
        state.shift_out();
        assert_eq!(state.translate('q'), '─');
        state.shift_in();
        assert_eq!(state.translate('q'), 'q');
    }

    #[test]
    fn test_single_shift_applies_once() {
        let mut state = CharsetState::new();
        state.designate(2, Charset::DecSpecialGraphics);
        state.single_shift(2);

        assert_eq!(state.translate('x'), '│');
        assert_eq!(state.translate('x'), 'x');
    }

    #[test]
    fn test_designate_out_of_range_ignored() {
        let mut state = CharsetState::new();
        state.designate(7, Charset::Uk);
        assert_eq!(state, CharsetState::new());
    }
}
