//! Terminal actions produced by the parser
//!
//! Every byte stream decomposes into a flat sequence of these tagged
//! actions. The consumer owns a single dispatch function that matches on
//! them; the parser never touches screen state.

use crate::params::Params;

/// Actions produced by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print a character at the cursor
    Print(char),

    /// Execute a C0 control (0x00-0x1F except ESC)
    /// BEL, BS, HT, LF, VT, FF, CR, SO, SI, ...
    Execute(u8),

    /// CSI (Control Sequence Introducer) sequence
    CsiDispatch(CsiAction),

    /// ESC sequence (non-CSI), also produced by 8-bit C1 controls
    EscDispatch(EscAction),

    /// OSC (Operating System Command) sequence
    OscDispatch(OscAction),

    /// DCS (Device Control String), collected until ST
    DcsDispatch(DcsAction),

    /// SOS, PM or APC string, collected until ST
    StringDispatch { kind: StringKind, data: String },
}

/// ESC sequence actions (non-CSI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscAction {
    /// ESC 7 - Save cursor (DECSC)
    SaveCursor,
    /// ESC 8 - Restore cursor (DECRC)
    RestoreCursor,
    /// ESC D - Index (IND)
    Index,
    /// ESC M - Reverse Index (RI)
    ReverseIndex,
    /// ESC E - Next Line (NEL)
    NextLine,
    /// ESC H - Horizontal Tab Set (HTS)
    HorizontalTabSet,
    /// ESC c - Full Reset (RIS)
    FullReset,
    /// ESC = - Application Keypad (DECKPAM)
    ApplicationKeypad,
    /// ESC > - Normal Keypad (DECKPNM)
    NormalKeypad,
    /// ESC N - Single Shift 2
    SingleShift2,
    /// ESC O - Single Shift 3
    SingleShift3,
    /// ESC ( / ) / * / + C - designate a character set into G0..G3
    Designate { slot: u8, charset: char },
    /// ESC # 8 - DEC Screen Alignment Test (DECALN)
    DecAlignmentTest,
    /// Anything else, kept for logging
    Unknown { intermediates: Vec<u8>, final_byte: u8 },
}

/// CSI sequence actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsiAction {
    /// Parameters (semicolon-separated numbers)
    pub params: Params,
    /// Intermediate bytes (0x20-0x2F)
    pub intermediates: Vec<u8>,
    /// Final byte (0x40-0x7E)
    pub final_byte: u8,
    /// Private marker byte: 0=none, b'?', b'>', b'<', b'='
    pub marker: u8,
}

impl CsiAction {
    /// Parameter at `index`, or `default` when absent or zero
    pub fn param(&self, index: usize, default: u16) -> u16 {
        self.params.get_or(index, default)
    }

    /// Check if this is a plain `CSI ... final` sequence
    pub fn is(&self, final_byte: u8) -> bool {
        self.final_byte == final_byte && self.intermediates.is_empty() && self.marker == 0
    }

    /// Check if this is a `CSI ? ... final` sequence
    pub fn is_private(&self, final_byte: u8) -> bool {
        self.final_byte == final_byte && self.intermediates.is_empty() && self.marker == b'?'
    }
}

/// DCS payload with its introducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcsAction {
    pub params: Params,
    pub intermediates: Vec<u8>,
    pub final_byte: u8,
    pub data: String,
}

/// Which ignored string family a payload belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    Sos,
    Pm,
    Apc,
}

/// OSC sequence actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OscAction {
    /// OSC 0 - Set icon name and window title
    SetIconAndTitle(String),
    /// OSC 1 - Set icon name
    SetIconName(String),
    /// OSC 2 - Set window title
    SetTitle(String),
    /// OSC 4 - Set palette entries, one `(index, spec)` pair per entry
    SetPaletteColors(Vec<(u8, String)>),
    /// OSC 10 - Set default foreground color
    SetDefaultForeground(String),
    /// OSC 11 - Set default background color
    SetDefaultBackground(String),
    /// OSC 104 - Reset palette entries (`None` = all)
    ///
    /// Invalid indices are dropped, so `Some` may hold an empty list.
    ResetPaletteColors(Option<Vec<u8>>),
    /// OSC 110 - Reset default foreground color
    ResetDefaultForeground,
    /// OSC 111 - Reset default background color
    ResetDefaultBackground,
    /// Any other command number, kept for logging
    Unknown { command: u16, data: String },
}

impl OscAction {
    /// Classify a complete OSC payload (`Ps ; Pt`)
    pub fn parse(data: &str) -> Self {
        let (cmd, payload) = match data.split_once(';') {
            Some((cmd, payload)) => (cmd, payload),
            None => (data, ""),
        };
        let Ok(command) = cmd.parse::<u16>() else {
            return OscAction::Unknown {
                command: 0,
                data: data.to_string(),
            };
        };

        match command {
            0 => OscAction::SetIconAndTitle(payload.to_string()),
            1 => OscAction::SetIconName(payload.to_string()),
            2 => OscAction::SetTitle(payload.to_string()),
            4 => {
                let mut pairs = Vec::new();
                let mut parts = payload.split(';');
                while let (Some(index), Some(spec)) = (parts.next(), parts.next()) {
                    if let Ok(index) = index.parse::<u8>() {
                        pairs.push((index, spec.to_string()));
                    }
                }
                OscAction::SetPaletteColors(pairs)
            }
            10 => OscAction::SetDefaultForeground(first_field(payload)),
            11 => OscAction::SetDefaultBackground(first_field(payload)),
            104 => OscAction::ResetPaletteColors((!payload.is_empty()).then(|| {
                payload
                    .split(';')
                    .filter_map(|s| s.parse::<u8>().ok())
                    .collect()
            })),
            110 => OscAction::ResetDefaultForeground,
            111 => OscAction::ResetDefaultBackground,
            _ => OscAction::Unknown {
                command,
                data: payload.to_string(),
            },
        }
    }
}

fn first_field(payload: &str) -> String {
    payload.split(';').next().unwrap_or_default().to_string()
}
