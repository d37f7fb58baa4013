use std::fmt;

use super::layout::{
    DIGIT_MODULES, DIGITS_PER_SET, EAN8_MODULES, EDGE_GUARD_MODULES, END_OFFSET,
    MIDDLE_GUARD_MODULES, MIDDLE_OFFSET,
};

/// Module bitstream with the guard offsets of one located EAN-8 symbol
///
/// A `Segment` only exists in a valid state: it is built by
/// [`SegmentExtractor`](crate::detector::structure::SegmentExtractor) once the
/// three guards have been checked, and `middle`/`end` are always derived from
/// `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    bits: Vec<bool>,
    start: usize,
    middle: usize,
    end: usize,
}

impl Segment {
    /// Wrap a bitstream whose structure at `start` has already been validated
    pub(crate) fn from_validated(bits: Vec<bool>, start: usize) -> Self {
        debug_assert!(start + EAN8_MODULES <= bits.len());
        Self {
            bits,
            start,
            middle: start + MIDDLE_OFFSET,
            end: start + END_OFFSET,
        }
    }

    /// Full module bitstream (true = bar)
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Index of the first module of the start guard
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the first module of the middle guard
    pub fn middle(&self) -> usize {
        self.middle
    }

    /// Index of the first module of the end guard
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of modules in the underlying bitstream
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the bitstream is empty (never true for a located segment)
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// 7-module window of the `index`-th left-set digit
    pub fn left_window(&self, index: usize) -> Option<&[bool]> {
        if index >= DIGITS_PER_SET {
            return None;
        }
        let offset = self.start + EDGE_GUARD_MODULES + index * DIGIT_MODULES;
        self.bits.get(offset..offset + DIGIT_MODULES)
    }

    /// 7-module window of the `index`-th right-set digit
    pub fn right_window(&self, index: usize) -> Option<&[bool]> {
        if index >= DIGITS_PER_SET {
            return None;
        }
        let offset = self.middle + MIDDLE_GUARD_MODULES + index * DIGIT_MODULES;
        self.bits.get(offset..offset + DIGIT_MODULES)
    }

    /// Give the bitstream back to the caller
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

/// Renders the symbol span as `0`/`1` with `|` at every guard boundary
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let boundaries = [
            self.start + EDGE_GUARD_MODULES,
            self.middle,
            self.middle + MIDDLE_GUARD_MODULES,
            self.end,
        ];
        for (i, &bit) in self.bits[self.start..self.end + EDGE_GUARD_MODULES]
            .iter()
            .enumerate()
        {
            if boundaries.contains(&(self.start + i)) {
                f.write_str("|")?;
            }
            f.write_str(if bit { "1" } else { "0" })?;
        }
        write!(
            f,
            " (start={}, middle={}, end={})",
            self.start, self.middle, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_modules;

    #[test]
    fn test_offsets_derived_from_start() {
        let mut bits = vec![false; 4];
        bits.extend(encode_modules(&[9, 6, 3, 8, 5, 0, 7, 4]).unwrap());
        let segment = Segment::from_validated(bits, 4);
        assert_eq!(segment.start(), 4);
        assert_eq!(segment.middle(), 35);
        assert_eq!(segment.end(), 68);
        assert_eq!(segment.len(), 71);
    }

    #[test]
    fn test_windows() {
        let bits = encode_modules(&[9, 6, 3, 8, 5, 0, 7, 4]).unwrap();
        let segment = Segment::from_validated(bits, 0);

        // L-set 9 = 0001011, R-set 4 = 1011100
        let left = segment.left_window(0).unwrap();
        assert_eq!(left, [false, false, false, true, false, true, true]);
        let right = segment.right_window(3).unwrap();
        assert_eq!(right, [true, false, true, true, true, false, false]);

        assert!(segment.left_window(4).is_none());
        assert!(segment.right_window(4).is_none());
    }

    #[test]
    fn test_display() {
        let bits = encode_modules(&[9, 6, 3, 8, 5, 0, 7, 4]).unwrap();
        let segment = Segment::from_validated(bits, 0);
        let text = segment.to_string();
        assert!(text.starts_with("101|0001011"));
        assert_eq!(text.matches('|').count(), 4);
        assert!(text.ends_with("(start=0, middle=31, end=64)"));
    }
}
