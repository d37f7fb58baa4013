use tracing::trace;

use super::error::{DecodeError, Result};
use super::tables::CodeSet;
use crate::models::layout::{DIGIT_MODULES, DIGITS_PER_SET, EAN8_DIGITS};
use crate::models::{DecodedDigits, Segment};

/// Decodes the digit windows of a located [`Segment`]
pub struct DigitDecoder;

impl DigitDecoder {
    /// Pack a module window into an integer, first module in the most significant bit
    pub fn pack(window: &[bool]) -> u8 {
        window
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
    }

    /// Look a 7-module window up in `set`
    pub fn decode_code(window: &[bool], set: CodeSet) -> Option<u8> {
        if window.len() != DIGIT_MODULES {
            return None;
        }
        set.lookup(Self::pack(window))
    }

    /// Decode the four left-set digits
    pub fn decode_left(segment: &Segment) -> Result<[u8; DIGITS_PER_SET]> {
        Self::decode_set(segment, CodeSet::Left)
    }

    /// Decode the four right-set digits
    pub fn decode_right(segment: &Segment) -> Result<[u8; DIGITS_PER_SET]> {
        Self::decode_set(segment, CodeSet::Right)
    }

    /// Decode all eight digits; fails on the first window that matches no code
    pub fn decode(segment: &Segment) -> Result<DecodedDigits> {
        let left = Self::decode_left(segment)?;
        let right = Self::decode_right(segment)?;

        let mut digits = [0u8; EAN8_DIGITS];
        digits[..DIGITS_PER_SET].copy_from_slice(&left);
        digits[DIGITS_PER_SET..].copy_from_slice(&right);
        Ok(DecodedDigits::new(digits))
    }

    fn decode_set(segment: &Segment, set: CodeSet) -> Result<[u8; DIGITS_PER_SET]> {
        let base = match set {
            CodeSet::Left => 0,
            CodeSet::Right => DIGITS_PER_SET,
        };

        let mut digits = [0u8; DIGITS_PER_SET];
        for (i, digit) in digits.iter_mut().enumerate() {
            let window = match set {
                CodeSet::Left => segment.left_window(i),
                CodeSet::Right => segment.right_window(i),
            }
            .ok_or(DecodeError::InvalidInput {
                reason: "digit window outside segment",
            })?;

            let pattern = Self::pack(window);
            *digit = set.lookup(pattern).ok_or(DecodeError::DecodeFailure {
                position: base + i,
                pattern,
            })?;
            trace!(position = base + i, pattern, digit = *digit, "decoded digit");
        }
        Ok(digits)
    }
}
