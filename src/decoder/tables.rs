//! EAN-8 code tables, 7-bit patterns MSB first (1 = bar)

/// Left-hand (odd parity) set, indexed by digit
pub const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Right-hand set, indexed by digit. Each entry is the complement of its L-set entry.
pub const R_CODES: [u8; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100, 0b1001110, 0b1010000, 0b1000100,
    0b1001000, 0b1110100,
];

/// Which half of the symbol a digit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    /// Digits between the start and middle guards
    Left,
    /// Digits between the middle and end guards
    Right,
}

impl CodeSet {
    /// The 10-entry table for this set
    pub fn codes(self) -> &'static [u8; 10] {
        match self {
            CodeSet::Left => &L_CODES,
            CodeSet::Right => &R_CODES,
        }
    }

    /// Exact-match lookup of a packed 7-bit pattern
    pub fn lookup(self, pattern: u8) -> Option<u8> {
        self.codes()
            .iter()
            .position(|&code| code == pattern)
            .map(|digit| digit as u8)
    }

    /// Pattern encoding `digit`, if it is 0-9
    pub fn pattern(self, digit: u8) -> Option<u8> {
        self.codes().get(digit as usize).copied()
    }
}
