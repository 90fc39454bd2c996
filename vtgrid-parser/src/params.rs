//! CSI parameter parsing
//!
//! Parameters are `;`-separated decimal numbers. Each parameter may carry
//! `:`-separated sub-parameters (`38:2::255:128:64`), which are kept apart
//! from the main value so that `38;2;...` and `38:2:...` stay distinguishable.

/// Maximum number of parameters we'll track
pub const MAX_PARAMS: usize = 32;

/// CSI parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Main value per parameter (0 means default/unspecified)
    values: Vec<u16>,
    /// Sub-parameters following each main value
    subparams: Vec<Vec<u16>>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create params without sub-parameters
    pub fn from_slice(values: &[u16]) -> Self {
        Self {
            values: values.to_vec(),
            subparams: vec![Vec::new(); values.len()],
        }
    }

    /// Parse a raw parameter string such as `1;31` or `4:3`
    ///
    /// Values saturate at 65535. Parameters beyond [`MAX_PARAMS`] are dropped.
    pub fn parse(bytes: &[u8]) -> Self {
        let mut params = Self::new();
        if bytes.is_empty() {
            return params;
        }

        let mut group: Vec<u16> = Vec::new();
        let mut current: u16 = 0;

        for &byte in bytes {
            match byte {
                b'0'..=b'9' => {
                    current = current
                        .saturating_mul(10)
                        .saturating_add(u16::from(byte - b'0'));
                }
                b':' => {
                    group.push(current);
                    current = 0;
                }
                b';' => {
                    group.push(current);
                    params.push_group(&mut group);
                    current = 0;
                }
                _ => {}
            }
        }
        group.push(current);
        params.push_group(&mut group);

        params
    }

    fn push_group(&mut self, group: &mut Vec<u16>) {
        if self.values.len() < MAX_PARAMS {
            if let Some((&main, rest)) = group.split_first() {
                self.values.push(main);
                self.subparams.push(rest.to_vec());
            }
        }
        group.clear();
    }

    /// Get parameter at index, returning None if absent or zero
    pub fn get(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied().filter(|&v| v != 0)
    }

    /// Get parameter at index, substituting `default` when absent or zero
    pub fn get_or(&self, index: usize, default: u16) -> u16 {
        self.get(index).unwrap_or(default)
    }

    /// Get raw value at index (0 if not present)
    pub fn raw(&self, index: usize) -> u16 {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sub-parameters of the parameter at `index` (empty when none)
    pub fn subparams(&self, index: usize) -> &[u16] {
        self.subparams.get(index).map_or(&[], Vec::as_slice)
    }

    /// Iterate over main values
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.iter().copied()
    }

    /// Iterate over `(value, sub-parameters)` pairs
    pub fn iter_with_subparams(&self) -> impl Iterator<Item = (u16, &[u16])> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, self.subparams(i)))
    }
}
