//! EAN-8 symbol layout, measured in modules
//!
//! ```text
//! | 101 | L L L L | 01010 | R R R R | 101 |
//!   3      4 x 7     5       4 x 7     3    = 67 modules
//! ```

/// Start and end guard (bar, space, bar)
pub const EDGE_GUARD: [bool; 3] = [true, false, true];
/// Middle guard (space, bar, space, bar, space)
pub const MIDDLE_GUARD: [bool; 5] = [false, true, false, true, false];

/// Width of the start and end guards
pub const EDGE_GUARD_MODULES: usize = EDGE_GUARD.len();
/// Width of the middle guard
pub const MIDDLE_GUARD_MODULES: usize = MIDDLE_GUARD.len();
/// Width of one encoded digit
pub const DIGIT_MODULES: usize = 7;
/// Digits on each side of the middle guard
pub const DIGITS_PER_SET: usize = 4;
/// Width of one half (left or right set)
pub const SET_MODULES: usize = DIGITS_PER_SET * DIGIT_MODULES;
/// Total digits in a symbol, check digit included
pub const EAN8_DIGITS: usize = 2 * DIGITS_PER_SET;

/// Offset of the middle guard relative to the start guard
pub const MIDDLE_OFFSET: usize = EDGE_GUARD_MODULES + SET_MODULES;
/// Offset of the end guard relative to the start guard
pub const END_OFFSET: usize = MIDDLE_OFFSET + MIDDLE_GUARD_MODULES + SET_MODULES;
/// Total modules of an EAN-8 symbol
pub const EAN8_MODULES: usize = END_OFFSET + EDGE_GUARD_MODULES;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_offsets() {
        assert_eq!(MIDDLE_OFFSET, 31);
        assert_eq!(END_OFFSET, 64);
        assert_eq!(EAN8_MODULES, 67);
    }
}
