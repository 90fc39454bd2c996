//! Streaming UTF-8 decoding for the terminal parser
//!
//! Bytes arrive in arbitrary chunks, so a multi-byte sequence may be split
//! across two writes. The decoder keeps the partial sequence between calls
//! and validates each continuation byte against the range allowed at that
//! position (Unicode "maximal subpart" rule), so overlong forms, surrogates
//! and values above U+10FFFF are rejected as soon as they become detectable.

/// The replacement character emitted for malformed input
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// UTF-8 decoder state
#[derive(Debug, Clone)]
pub struct Utf8Decoder {
    /// Code point bits accumulated so far
    codepoint: u32,
    /// Continuation bytes still required
    needed: u8,
    /// Inclusive range allowed for the next continuation byte
    lower: u8,
    upper: u8,
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// A complete scalar value (ASCII and C0 controls come through here too)
    Char(char),
    /// The byte can never start a sequence; emit one replacement character
    Invalid,
    /// The byte broke a pending sequence; emit one replacement character,
    /// then feed the same byte again as the start of a new sequence
    InvalidRetry,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self {
            codepoint: 0,
            needed: 0,
            lower: 0x80,
            upper: 0xBF,
        }
    }

    /// Drop any partially decoded sequence
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.needed > 0
    }

    /// Feed a byte to the decoder
    pub fn feed(&mut self, byte: u8) -> Utf8Result {
        if self.needed == 0 {
            return self.start(byte);
        }

        if byte < self.lower || byte > self.upper {
            self.reset();
            return Utf8Result::InvalidRetry;
        }

        self.codepoint = (self.codepoint << 6) | u32::from(byte & 0x3F);
        self.needed -= 1;
        self.lower = 0x80;
        self.upper = 0xBF;

        if self.needed > 0 {
            return Utf8Result::Pending;
        }

        let cp = self.codepoint;
        self.codepoint = 0;
        char::from_u32(cp).map_or(Utf8Result::Invalid, Utf8Result::Char)
    }

    fn start(&mut self, byte: u8) -> Utf8Result {
        let (needed, bits, lower, upper) = match byte {
            0x00..=0x7F => return Utf8Result::Char(char::from(byte)),
            0xC2..=0xDF => (1, byte & 0x1F, 0x80, 0xBF),
            0xE0 => (2, byte & 0x0F, 0xA0, 0xBF),
            0xED => (2, byte & 0x0F, 0x80, 0x9F),
            0xE1..=0xEF => (2, byte & 0x0F, 0x80, 0xBF),
            0xF0 => (3, byte & 0x07, 0x90, 0xBF),
            0xF4 => (3, byte & 0x07, 0x80, 0x8F),
            0xF1..=0xF3 => (3, byte & 0x07, 0x80, 0xBF),
            // Stray continuation bytes, overlong leads C0/C1, and F5..FF
            _ => return Utf8Result::Invalid,
        };
        self.codepoint = u32::from(bits);
        self.needed = needed;
        self.lower = lower;
        self.upper = upper;
        Utf8Result::Pending
    }
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}
