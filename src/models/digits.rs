use std::fmt;

use super::layout::{DIGITS_PER_SET, EAN8_DIGITS};
use crate::decoder::checksum::Checksum;
use crate::decoder::error::{DecodeError, Result};

/// Eight decoded EAN-8 digits and whether the check digit agrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedDigits {
    /// Left-set digits followed by right-set digits; the last one is the check digit
    pub digits: [u8; EAN8_DIGITS],
    /// Result of recomputing the check digit over the first seven digits
    pub checksum_valid: bool,
}

impl DecodedDigits {
    /// Wrap decoded digits, recomputing checksum validity
    pub fn new(digits: [u8; EAN8_DIGITS]) -> Self {
        Self {
            digits,
            checksum_valid: Checksum::validate(&digits),
        }
    }

    /// The four left-set digits
    pub fn left(&self) -> &[u8] {
        &self.digits[..DIGITS_PER_SET]
    }

    /// The four right-set digits
    pub fn right(&self) -> &[u8] {
        &self.digits[DIGITS_PER_SET..]
    }

    /// The trailing check digit as read from the symbol
    pub fn check_digit(&self) -> u8 {
        self.digits[EAN8_DIGITS - 1]
    }

    /// Promote to an error when the check digit disagrees
    pub fn verified(self) -> Result<Self> {
        if self.checksum_valid {
            Ok(self)
        } else {
            Err(DecodeError::ChecksumMismatch {
                digits: self.digits,
                expected: Checksum::compute(&self.digits[..EAN8_DIGITS - 1]),
            })
        }
    }
}

impl fmt::Display for DecodedDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_digits() {
        let decoded = DecodedDigits::new([9, 6, 3, 8, 5, 0, 7, 4]);
        assert!(decoded.checksum_valid);
        assert_eq!(decoded.left(), &[9, 6, 3, 8]);
        assert_eq!(decoded.right(), &[5, 0, 7, 4]);
        assert_eq!(decoded.check_digit(), 4);
        assert_eq!(decoded.to_string(), "96385074");
        assert_eq!(decoded.verified(), Ok(decoded));
    }

    #[test]
    fn test_invalid_digits_verified() {
        let decoded = DecodedDigits::new([9, 6, 3, 8, 5, 0, 7, 1]);
        assert!(!decoded.checksum_valid);
        assert_eq!(
            decoded.verified(),
            Err(DecodeError::ChecksumMismatch {
                digits: [9, 6, 3, 8, 5, 0, 7, 1],
                expected: 4,
            })
        );
    }
}
