use tracing::debug;

use crate::decoder::error::{DecodeError, Result};
use crate::models::Segment;
use crate::models::layout::{
    EAN8_MODULES, EDGE_GUARD, EDGE_GUARD_MODULES, END_OFFSET, MIDDLE_GUARD,
    MIDDLE_GUARD_MODULES, MIDDLE_OFFSET,
};

/// Finds the EAN-8 guard layout in a module bitstream
pub struct StructureLocator;

impl StructureLocator {
    /// Whether start, middle and end guards sit at their fixed offsets from `index`
    /// and the whole 67-module span fits in `bits`
    pub fn is_valid_structure(bits: &[bool], index: usize) -> bool {
        match index.checked_add(EAN8_MODULES) {
            Some(span_end) if span_end <= bits.len() => {}
            _ => return false,
        }

        let start = &bits[index..index + EDGE_GUARD_MODULES];
        let middle = &bits[index + MIDDLE_OFFSET..index + MIDDLE_OFFSET + MIDDLE_GUARD_MODULES];
        let end = &bits[index + END_OFFSET..index + END_OFFSET + EDGE_GUARD_MODULES];

        start == EDGE_GUARD && middle == MIDDLE_GUARD && end == EDGE_GUARD
    }

    /// First index at which a valid structure starts
    ///
    /// Candidates are tried in increasing order and the first one wins; later
    /// candidates are never compared against it.
    pub fn locate(bits: &[bool]) -> Result<usize> {
        let not_found = DecodeError::StructureNotFound {
            modules: bits.len(),
        };
        if bits.len() < EAN8_MODULES {
            return Err(not_found);
        }

        (0..=bits.len() - EAN8_MODULES)
            .find(|&index| Self::is_valid_structure(bits, index))
            .ok_or(not_found)
    }
}

/// Packages a bitstream and its located guards into a [`Segment`]
pub struct SegmentExtractor;

impl SegmentExtractor {
    /// Locate the structure in `bits` and take ownership of the bitstream
    pub fn extract(bits: Vec<bool>) -> Result<Segment> {
        let start = StructureLocator::locate(&bits)?;
        debug!(
            start,
            middle = start + MIDDLE_OFFSET,
            end = start + END_OFFSET,
            modules = bits.len(),
            "located EAN-8 structure"
        );
        Ok(Segment::from_validated(bits, start))
    }

    /// Build a segment at a caller-chosen start, re-checking the guards there
    pub fn at(bits: Vec<bool>, start: usize) -> Result<Segment> {
        if !StructureLocator::is_valid_structure(&bits, start) {
            return Err(DecodeError::StructureNotFound {
                modules: bits.len(),
            });
        }
        Ok(Segment::from_validated(bits, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_modules;

    fn symbol() -> Vec<bool> {
        encode_modules(&[9, 6, 3, 8, 5, 0, 7, 4]).unwrap()
    }

    #[test]
    fn test_locate_exact() {
        let bits = symbol();
        assert_eq!(bits.len(), 67);
        assert!(StructureLocator::is_valid_structure(&bits, 0));
        assert_eq!(StructureLocator::locate(&bits), Ok(0));
    }

    #[test]
    fn test_locate_with_padding() {
        let mut bits = vec![false; 5];
        bits.extend(symbol());
        bits.extend(vec![false; 5]);
        assert_eq!(StructureLocator::locate(&bits), Ok(5));

        let segment = SegmentExtractor::extract(bits).unwrap();
        assert_eq!(segment.start(), 5);
        assert_eq!(segment.middle(), 36);
        assert_eq!(segment.end(), 69);
    }

    #[test]
    fn test_first_fit() {
        // Two complete symbols: the earlier one is reported
        let mut bits = vec![false; 2];
        bits.extend(symbol());
        bits.extend(vec![false; 3]);
        bits.extend(symbol());
        assert_eq!(StructureLocator::locate(&bits), Ok(2));
    }

    #[test]
    fn test_short_stream_rejected() {
        let bits = symbol();
        assert_eq!(
            StructureLocator::locate(&bits[..66]),
            Err(DecodeError::StructureNotFound { modules: 66 })
        );
        assert_eq!(
            StructureLocator::locate(&[]),
            Err(DecodeError::StructureNotFound { modules: 0 })
        );
        assert!(!StructureLocator::is_valid_structure(&bits, 1));
        assert!(!StructureLocator::is_valid_structure(&bits, usize::MAX));
    }

    #[test]
    fn test_broken_guards() {
        for flip in [1, MIDDLE_OFFSET + 1, END_OFFSET + 2] {
            let mut bits = symbol();
            bits[flip] = !bits[flip];
            assert!(!StructureLocator::is_valid_structure(&bits, 0));
            assert!(matches!(
                StructureLocator::locate(&bits),
                Err(DecodeError::StructureNotFound { .. })
            ));
        }
    }

    #[test]
    fn test_extract_at() {
        let mut bits = vec![false; 3];
        bits.extend(symbol());
        assert!(SegmentExtractor::at(bits.clone(), 2).is_err());
        let segment = SegmentExtractor::at(bits, 3).unwrap();
        assert_eq!(segment.middle(), 34);
        assert_eq!(segment.end(), 67);
    }
}
