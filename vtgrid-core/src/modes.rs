//! Terminal mode flags
//!
//! ANSI modes (SM/RM) and the DEC private modes (DECSET/DECRST) that only
//! flip a flag. Modes with side effects on the screen (origin, alternate
//! buffer, reverse video) are applied by the screen, which records the flag
//! here as well.

use serde::{Deserialize, Serialize};

/// Terminal mode flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// Insert mode (IRM) - characters shift right instead of overwriting
    pub insert_mode: bool,
    /// Automatic newline mode (LNM) - LF also does CR
    pub linefeed_mode: bool,
    /// DECCKM - Cursor key mode (application vs normal)
    pub cursor_keys_application: bool,
    /// DECSCNM - Reverse video mode
    pub reverse_video: bool,
    /// DECOM - Origin mode (cursor relative to scroll region)
    pub origin_mode: bool,
    /// DECAWM - Auto-wrap mode
    pub auto_wrap: bool,
    /// DECTCEM - Cursor visible
    pub cursor_visible: bool,
    /// Cursor blink (mode 12, also set by DECSCUSR)
    pub cursor_blink: bool,
    /// DECKPAM/DECKPNM
    pub application_keypad: bool,
    /// Bracketed paste (mode 2004)
    pub bracketed_paste: bool,
    /// Synchronized output (mode 2026)
    pub synchronized_output: bool,
    /// Alternate screen buffer active
    pub alternate_screen: bool,
}

impl Modes {
    pub fn new() -> Self {
        Self {
            insert_mode: false,
            linefeed_mode: false,
            cursor_keys_application: false,
            reverse_video: false,
            origin_mode: false,
            auto_wrap: true,
            cursor_visible: true,
            cursor_blink: true,
            application_keypad: false,
            bracketed_paste: false,
            synchronized_output: false,
            alternate_screen: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Set a DEC private mode by number; returns false if unknown
    pub fn set_dec_mode(&mut self, mode: u16, value: bool) -> bool {
        match mode {
            1 => self.cursor_keys_application = value,
            5 => self.reverse_video = value,
            6 => self.origin_mode = value,
            7 => self.auto_wrap = value,
            12 => self.cursor_blink = value,
            25 => self.cursor_visible = value,
            47 | 1047 | 1049 => self.alternate_screen = value,
            2004 => self.bracketed_paste = value,
            2026 => self.synchronized_output = value,
            _ => {
                log::debug!("Unknown DEC private mode: {}", mode);
                return false;
            }
        }
        true
    }

    /// Get a DEC private mode by number, None if unknown
    pub fn dec_mode(&self, mode: u16) -> Option<bool> {
        Some(match mode {
            1 => self.cursor_keys_application,
            5 => self.reverse_video,
            6 => self.origin_mode,
            7 => self.auto_wrap,
            12 => self.cursor_blink,
            25 => self.cursor_visible,
            47 | 1047 | 1049 => self.alternate_screen,
            2004 => self.bracketed_paste,
            2026 => self.synchronized_output,
            _ => return None,
        })
    }

    /// Set a standard (non-DEC) mode by number; returns false if unknown
    pub fn set_mode(&mut self, mode: u16, value: bool) -> bool {
        match mode {
            4 => self.insert_mode = value,
            20 => self.linefeed_mode = value,
            _ => {
                log::debug!("Unknown standard mode: {}", mode);
                return false;
            }
        }
        true
    }
}

impl Default for Modes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = Modes::new();
        assert!(modes.auto_wrap);
        assert!(modes.cursor_visible);
        assert!(!modes.alternate_screen);
        assert!(!modes.insert_mode);
    }

    #[test]
    fn test_set_dec_mode() {
        let mut modes = Modes::new();
        assert!(modes.set_dec_mode(25, false));
        assert!(!modes.cursor_visible);
        assert!(modes.set_dec_mode(2004, true));
        assert_eq!(modes.dec_mode(2004), Some(true));
        assert!(!modes.set_dec_mode(9999, true));
        assert_eq!(modes.dec_mode(9999), None);
    }

    #[test]
    fn test_set_mode() {
        let mut modes = Modes::new();
        assert!(modes.set_mode(4, true));
        assert!(modes.insert_mode);
        assert!(modes.set_mode(20, true));
        assert!(modes.linefeed_mode);
        assert!(!modes.set_mode(3, true));
    }

    #[test]
    fn test_modes_reset() {
        let mut modes = Modes::new();
        modes.cursor_visible = false;
        modes.auto_wrap = false;
        modes.reset();
        assert!(modes.cursor_visible);
        assert!(modes.auto_wrap);
    }
}
